//! Token types for the SQL lexer.

use core::fmt;

use super::{Keyword, Span};

/// The kind of token.
///
/// Kinds are fieldless so they can be compared, hashed and collected into
/// "expected" sets; the text of a token lives in [`Token::lexeme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TokenKind {
    // Literals
    /// Numeric literal (e.g., 42, 3.14, 1e10)
    Number,
    /// String literal; the lexeme is the unescaped content
    String,
    /// Hexadecimal literal (X'0F' or 0x0F); the lexeme holds the digits
    HexNumber,
    /// Bit-value literal (B'01' or 0b01); the lexeme holds the digits
    BitNumber,

    // Identifiers and keywords
    /// Identifier, back-quoted or bare
    Identifier,
    /// SQL keyword
    Keyword(Keyword),

    // Operators
    /// +
    Plus,
    /// -
    Minus,
    /// *
    Star,
    /// /
    Slash,
    /// %
    Percent,
    /// ^
    Caret,
    /// =
    Eq,
    /// <=>
    NullSafeEq,
    /// != or <>
    NotEq,
    /// <
    Lt,
    /// <=
    LtEq,
    /// >
    Gt,
    /// >=
    GtEq,
    /// &
    BitAnd,
    /// |
    BitOr,
    /// ~
    BitNot,
    /// <<
    LeftShift,
    /// >>
    RightShift,
    /// &&
    AndAnd,
    /// ||
    OrOr,
    /// !
    Bang,

    // Delimiters
    /// (
    LeftParen,
    /// )
    RightParen,
    /// {
    LeftBrace,
    /// }
    RightBrace,
    /// ,
    Comma,
    /// ;
    Semicolon,
    /// .
    Dot,
    /// ?
    Question,

    // Special
    /// End of input
    Eof,
    /// Invalid/unknown input; the lexeme describes the problem
    Error,
}

impl TokenKind {
    /// Short human readable description, used in diagnostics.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
            Self::HexNumber => "hex literal",
            Self::BitNumber => "bit literal",
            Self::Identifier => "identifier",
            Self::Keyword(kw) => kw.as_str(),
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Caret => "'^'",
            Self::Eq => "'='",
            Self::NullSafeEq => "'<=>'",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitNot => "'~'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::AndAnd => "'&&'",
            Self::OrOr => "'||'",
            Self::Bang => "'!'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::LeftBrace => "'{'",
            Self::RightBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Question => "'?'",
            Self::Eof => "end of input",
            Self::Error => "invalid token",
        }
    }

    /// Returns true if this kind is the given keyword.
    #[must_use]
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, Self::Keyword(kw) if *kw == keyword)
    }

    /// Whether a token of this kind can name a schema object: a bare or
    /// quoted identifier, or a non-reserved keyword.
    #[must_use]
    pub const fn is_identifier_like(&self) -> bool {
        match self {
            Self::Identifier => true,
            Self::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its text and location in the source code.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// The token text as the parser should see it.
    pub lexeme: String,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    /// Creates an end-of-input token at `offset`.
    #[must_use]
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, String::new(), Span::point(offset))
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}
