//! Parser error types.

use core::fmt;

use crate::lexer::{Span, Token, TokenKind};

/// The category of a parse failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The found token matches no viable alternative of the current rule.
    UnexpectedToken,
    /// Every alternative of a backtracking choice failed.
    AmbiguousAlternativeExhausted,
    /// A reference definition repeats `ON UPDATE` or `ON DELETE`.
    MalformedReferenceOptions,
    /// A parenthesised or braced list ran out before its closing token.
    UnterminatedConstruct,
    /// Expression or subquery nesting went past the configured depth.
    RecursionLimitExceeded,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::UnexpectedToken => "unexpected token",
            Self::AmbiguousAlternativeExhausted => "no alternative matched",
            Self::MalformedReferenceOptions => "malformed reference options",
            Self::UnterminatedConstruct => "unterminated construct",
            Self::RecursionLimitExceeded => "recursion limit exceeded",
        })
    }
}

/// A parse error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at position {}", .span.start)]
pub struct ParseError {
    /// The error category.
    pub kind: ParseErrorKind,
    /// The error message.
    pub message: String,
    /// Token kinds that would have been accepted, deduplicated. Empty when the
    /// expectation is a whole construct rather than a single token.
    pub expected: Vec<TokenKind>,
    /// Human readable description of what was expected.
    pub expected_desc: String,
    /// The kind of the token found.
    pub found: TokenKind,
    /// The text of the token found.
    pub lexeme: String,
    /// The location of the error.
    pub span: Span,
    /// Names of the alternatives tried, for `AmbiguousAlternativeExhausted`.
    pub alternatives: Vec<String>,
    /// The furthest-reaching failure among the alternatives tried.
    #[source]
    pub cause: Option<Box<ParseError>>,
}

fn describe_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => String::from("nothing"),
        [single] => single.describe().to_string(),
        [init @ .., last] => {
            let init: Vec<&str> = init.iter().map(TokenKind::describe).collect();
            format!("{} or {}", init.join(", "), last.describe())
        }
    }
}

fn describe_found(token: &Token) -> String {
    match token.kind {
        TokenKind::Eof => String::from("end of input"),
        TokenKind::Error => format!("invalid input ({})", token.lexeme),
        TokenKind::String => format!("string '{}'", token.lexeme),
        kind => format!("{kind} `{}`", token.lexeme),
    }
}

impl ParseError {
    fn base(kind: ParseErrorKind, message: String, token: &Token) -> Self {
        Self {
            kind,
            message,
            expected: Vec::new(),
            expected_desc: String::new(),
            found: token.kind,
            lexeme: token.lexeme.clone(),
            span: token.span,
            alternatives: Vec::new(),
            cause: None,
        }
    }

    /// Creates an "unexpected token" error from a set of acceptable kinds.
    #[must_use]
    pub fn expected_kinds(expected: &[TokenKind], token: &Token) -> Box<Self> {
        let mut kinds: Vec<TokenKind> = Vec::with_capacity(expected.len());
        for kind in expected {
            if !kinds.contains(kind) {
                kinds.push(*kind);
            }
        }
        let desc = describe_expected(&kinds);
        let mut error = Self::unexpected(desc, token);
        error.expected = kinds;
        error
    }

    /// Creates an "unexpected token" error for a construct described in words.
    #[must_use]
    pub fn unexpected(expected_desc: impl Into<String>, token: &Token) -> Box<Self> {
        let expected_desc = expected_desc.into();
        let message = format!(
            "Unexpected token: expected {expected_desc}, found {}",
            describe_found(token)
        );
        let mut error = Self::base(ParseErrorKind::UnexpectedToken, message, token);
        error.expected_desc = expected_desc;
        Box::new(error)
    }

    /// Creates an "unterminated construct" error: `closing` never arrived.
    #[must_use]
    pub fn unterminated(closing: TokenKind, token: &Token) -> Box<Self> {
        let message = format!(
            "Unterminated construct: expected {}, found {}",
            closing.describe(),
            describe_found(token)
        );
        let mut error = Self::base(ParseErrorKind::UnterminatedConstruct, message, token);
        error.expected = vec![closing];
        error.expected_desc = closing.describe().to_string();
        Box::new(error)
    }

    /// Creates a "malformed reference options" error.
    #[must_use]
    pub fn malformed_reference(detail: &str, token: &Token) -> Box<Self> {
        let message = format!("Malformed reference options: {detail}");
        Box::new(Self::base(
            ParseErrorKind::MalformedReferenceOptions,
            message,
            token,
        ))
    }

    /// Creates a "recursion limit exceeded" error.
    #[must_use]
    pub fn recursion_limit(max_depth: usize, token: &Token) -> Box<Self> {
        let message = format!("Nesting deeper than {max_depth} levels");
        Box::new(Self::base(
            ParseErrorKind::RecursionLimitExceeded,
            message,
            token,
        ))
    }

    /// Wraps the failures of every tried alternative. The reported position
    /// is that of the failure which got furthest.
    #[must_use]
    pub fn exhausted(alternatives: &[&str], failures: Vec<Box<Self>>) -> Box<Self> {
        let furthest = failures
            .into_iter()
            .max_by_key(|error| error.span.start);
        let alternatives: Vec<String> = alternatives.iter().map(|a| (*a).to_string()).collect();
        let message = format!(
            "No alternative matched (tried {})",
            alternatives.join(", ")
        );
        Box::new(match furthest {
            Some(cause) => Self {
                kind: ParseErrorKind::AmbiguousAlternativeExhausted,
                message: format!("{message}: {}", cause.message),
                expected: cause.expected.clone(),
                expected_desc: cause.expected_desc.clone(),
                found: cause.found,
                lexeme: cause.lexeme.clone(),
                span: cause.span,
                alternatives,
                cause: Some(cause),
            },
            None => Self {
                kind: ParseErrorKind::AmbiguousAlternativeExhausted,
                message,
                expected: Vec::new(),
                expected_desc: String::new(),
                found: TokenKind::Eof,
                lexeme: String::new(),
                span: Span::default(),
                alternatives,
                cause: None,
            },
        })
    }
}

/// Result type for parser operations.
pub type Result<T> = core::result::Result<T, Box<ParseError>>;
