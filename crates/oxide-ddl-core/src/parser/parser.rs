//! Parser state and the token-level helpers shared by every grammar rule.

use tracing::trace;

use super::config::ParserConfig;
use super::error::{ParseError, Result};
use super::stream::{Checkpoint, TokenStream};
use crate::ast::{Expr, Statement, TableName};
use crate::lexer::{Keyword, Span, Token, TokenKind};

/// Everything a backtracking attempt has to restore.
#[derive(Debug, Clone, Copy)]
pub(super) struct Snapshot {
    checkpoint: Checkpoint,
    param_counter: usize,
    depth: usize,
}

/// MySQL DDL parser over a token buffer.
///
/// A parser owns no part of the tree it returns; it only borrows the tokens.
pub struct Parser<'a> {
    stream: TokenStream<'a>,
    config: ParserConfig,
    depth: usize,
    /// Parameter counter for ? placeholders.
    param_counter: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `tokens` with the default configuration.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    /// Creates a parser over `tokens`.
    #[must_use]
    pub fn with_config(tokens: &'a [Token], config: ParserConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            config,
            depth: 0,
            param_counter: 0,
        }
    }

    /// Parses a single DDL statement. Tokens after the statement are left
    /// unconsumed; [`Parser::position`] tells where it ended.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the tokens do not start a valid statement.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        self.parse_ddl_statement()
    }

    /// Parses a standalone expression.
    ///
    /// # Errors
    ///
    /// Returns a `ParseError` if the tokens do not start a valid expression.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.parse_expr()
    }

    /// Index of the next unconsumed token.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.stream.position()
    }

    /// Returns true once every token has been consumed.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.stream.is_at_end()
    }

    // --- Helper methods ---

    pub(super) fn current(&self) -> &Token {
        self.stream.current()
    }

    pub(super) fn peek(&self, k: usize) -> TokenKind {
        self.stream.peek(k)
    }

    pub(super) fn nth(&self, k: usize) -> &Token {
        self.stream.nth(k)
    }

    /// Advances to the next token, returning the consumed one.
    pub(super) fn advance(&mut self) -> &Token {
        self.stream.advance()
    }

    /// Checks if the current token is of the given kind.
    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.peek(0) == kind
    }

    /// Checks if the current token is the given keyword.
    pub(super) fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek(0).is_keyword(keyword)
    }

    /// Checks if the token `k` ahead is the given keyword.
    pub(super) fn peek_keyword(&self, k: usize, keyword: Keyword) -> bool {
        self.peek(k).is_keyword(keyword)
    }

    /// Checks if the current token can be used as an identifier.
    pub(super) fn check_identifier(&self) -> bool {
        self.peek(0).is_identifier_like()
    }

    /// Consumes the current token if it is of the given kind.
    pub(super) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consumes the current token if it is the given keyword.
    pub(super) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.eat(TokenKind::Keyword(keyword))
    }

    /// Consumes an optional `=`.
    pub(super) fn eat_eq(&mut self) {
        self.eat(TokenKind::Eq);
    }

    /// Expects the current token to be the given kind.
    pub(super) fn expect(&mut self, kind: TokenKind) -> Result<()> {
        if self.eat(kind) {
            return Ok(());
        }
        let closing = matches!(kind, TokenKind::RightParen | TokenKind::RightBrace);
        let ran_out = matches!(self.peek(0), TokenKind::Eof | TokenKind::Semicolon);
        if closing && ran_out {
            Err(ParseError::unterminated(kind, self.current()))
        } else {
            Err(self.error_expected(&[kind]))
        }
    }

    /// Expects the current token to be the given keyword.
    pub(super) fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        self.expect(TokenKind::Keyword(keyword))
    }

    /// Expects one of `keywords` and returns the one found.
    pub(super) fn expect_one_of(&mut self, keywords: &[Keyword]) -> Result<Keyword> {
        match self.current().as_keyword() {
            Some(found) if keywords.contains(&found) => {
                self.advance();
                Ok(found)
            }
            _ => {
                let kinds: Vec<TokenKind> = keywords.iter().map(|kw| TokenKind::Keyword(*kw)).collect();
                Err(self.error_expected(&kinds))
            }
        }
    }

    /// Expects and returns an identifier. Non-reserved keywords are accepted
    /// with their original spelling.
    pub(super) fn expect_identifier(&mut self) -> Result<String> {
        if self.check_identifier() {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error_unexpected("identifier"))
        }
    }

    /// Builds an "unexpected token" error at the current token.
    pub(super) fn error_expected(&self, kinds: &[TokenKind]) -> Box<ParseError> {
        ParseError::expected_kinds(kinds, self.current())
    }

    /// Builds an "unexpected token" error for a construct described in words.
    pub(super) fn error_unexpected(&self, expected: &str) -> Box<ParseError> {
        ParseError::unexpected(expected, self.current())
    }

    /// Start offset for a node beginning at the current token.
    pub(super) fn start(&self) -> usize {
        self.current().span.start
    }

    /// Span from `start` to the end of the last consumed token.
    pub(super) fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.stream.previous_end().max(start))
    }

    pub(super) fn snapshot(&self) -> Snapshot {
        Snapshot {
            checkpoint: self.stream.mark(),
            param_counter: self.param_counter,
            depth: self.depth,
        }
    }

    pub(super) fn restore(&mut self, snapshot: Snapshot) {
        trace!(
            from = self.stream.position(),
            to = self.snapshot_position(snapshot),
            "backtracking"
        );
        self.stream.reset(snapshot.checkpoint);
        self.param_counter = snapshot.param_counter;
        self.depth = snapshot.depth;
    }

    fn snapshot_position(&self, snapshot: Snapshot) -> usize {
        let mut stream = self.stream.clone();
        stream.reset(snapshot.checkpoint);
        stream.position()
    }

    /// Runs `f` one nesting level deeper, failing once the configured depth
    /// is exceeded.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.deepen()?;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Takes one level of the depth budget. The caller gives it back by
    /// resetting [`Parser::depth`] once the level is closed.
    ///
    /// Besides recursive descent, every operator folded onto a left-deep
    /// chain and every postfix `COLLATE` takes a level, so the budget bounds
    /// the height of the returned tree.
    pub(super) fn deepen(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(ParseError::recursion_limit(
                self.config.max_depth,
                self.current(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    /// Current nesting depth.
    pub(super) const fn depth(&self) -> usize {
        self.depth
    }

    /// Resets the nesting depth to a value taken from [`Parser::depth`].
    pub(super) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    /// Allocates the next `?` placeholder number.
    pub(super) fn next_parameter(&mut self) -> usize {
        self.param_counter += 1;
        self.param_counter
    }

    /// Parses `item (, item)*`.
    pub(super) fn parse_comma_separated<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> Result<T>,
    ) -> Result<Vec<T>> {
        let mut items = vec![item(self)?];
        while self.eat(TokenKind::Comma) {
            items.push(item(self)?);
        }
        Ok(items)
    }

    /// Parses `( inner )`.
    pub(super) fn parse_parenthesized<T>(
        &mut self,
        inner: impl FnOnce(&mut Self) -> Result<T>,
    ) -> Result<T> {
        self.expect(TokenKind::LeftParen)?;
        let value = inner(self)?;
        self.expect(TokenKind::RightParen)?;
        Ok(value)
    }

    /// Parses a comma-separated list of identifiers.
    pub(super) fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        self.parse_comma_separated(Self::expect_identifier)
    }

    /// Parses `( ident, ... )`. The list may be empty when `allow_empty`.
    pub(super) fn parse_paren_identifier_list(&mut self, allow_empty: bool) -> Result<Vec<String>> {
        self.expect(TokenKind::LeftParen)?;
        if allow_empty && self.eat(TokenKind::RightParen) {
            return Ok(vec![]);
        }
        let names = self.parse_identifier_list()?;
        self.expect(TokenKind::RightParen)?;
        Ok(names)
    }

    /// Parses `[schema.]table`.
    pub(super) fn parse_table_name(&mut self) -> Result<TableName> {
        let first = self.expect_identifier()?;
        if self.eat(TokenKind::Dot) {
            let name = self.expect_identifier()?;
            Ok(TableName::qualified(first, name))
        } else {
            Ok(TableName::new(first))
        }
    }

    /// Expects a string literal and returns its content.
    pub(super) fn parse_string(&mut self) -> Result<String> {
        if self.check(TokenKind::String) {
            Ok(self.advance().lexeme.clone())
        } else {
            Err(self.error_expected(&[TokenKind::String]))
        }
    }

    /// Expects an unsigned integer literal.
    pub(super) fn parse_u64(&mut self) -> Result<u64> {
        let token = self.current();
        let value = if token.kind == TokenKind::Number {
            token.lexeme.parse::<u64>().ok()
        } else {
            None
        };
        match value {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(self.error_unexpected("unsigned integer")),
        }
    }

    /// Expects an unsigned integer literal that fits in a `u32`.
    pub(super) fn parse_u32(&mut self) -> Result<u32> {
        let token = self.current();
        let value = if token.kind == TokenKind::Number {
            token.lexeme.parse::<u32>().ok()
        } else {
            None
        };
        match value {
            Some(value) => {
                self.advance();
                Ok(value)
            }
            None => Err(self.error_unexpected("length")),
        }
    }

    /// Parses an optional `(n)`.
    pub(super) fn parse_optional_length(&mut self) -> Result<Option<u32>> {
        if self.check(TokenKind::LeftParen) {
            self.parse_parenthesized(Self::parse_u32).map(Some)
        } else {
            Ok(None)
        }
    }
}
