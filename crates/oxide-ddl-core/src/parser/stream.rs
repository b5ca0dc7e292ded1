//! Random-access cursor over a token buffer.

use crate::lexer::{Token, TokenKind};

/// A saved stream position, restored with [`TokenStream::reset`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

/// A read-only cursor over an already-tokenized statement.
///
/// The buffer does not have to end with an `Eof` token: reading past the end,
/// or reaching an `Eof` token early, yields a synthesized end-of-input token
/// and the cursor stops there.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
}

impl<'a> TokenStream<'a> {
    /// Creates a stream positioned at the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        let end = tokens.last().map_or(0, |token| token.span.end);
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(end),
        }
    }

    /// Returns the kind of the token `k` positions ahead of the cursor.
    #[must_use]
    pub fn peek(&self, k: usize) -> TokenKind {
        self.nth(k).kind
    }

    /// Returns the token `k` positions ahead of the cursor.
    #[must_use]
    pub fn nth(&self, k: usize) -> &Token {
        let mut index = self.pos;
        for _ in 0..k {
            if self.is_end(index) {
                break;
            }
            index += 1;
        }
        self.token_at(index)
    }

    /// Returns the token under the cursor.
    #[must_use]
    pub fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    /// Consumes the current token and returns it. At end of input the cursor
    /// does not move and the end-of-input token is returned again.
    pub fn advance(&mut self) -> &Token {
        let index = self.pos;
        if !self.is_end(index) {
            self.pos += 1;
        }
        self.token_at(index)
    }

    /// Saves the current position.
    #[must_use]
    pub const fn mark(&self) -> Checkpoint {
        Checkpoint(self.pos)
    }

    /// Restores a position saved with [`TokenStream::mark`].
    pub fn reset(&mut self, checkpoint: Checkpoint) {
        self.pos = checkpoint.0;
    }

    /// Index of the next token to be consumed.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Byte offset just past the last consumed token.
    #[must_use]
    pub fn previous_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(index) => self.token_at(index).span.end,
            None => self.current().span.start,
        }
    }

    /// Returns true once the cursor is at end of input.
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.is_end(self.pos)
    }

    fn is_end(&self, index: usize) -> bool {
        self.tokens.get(index).is_none_or(Token::is_eof)
    }

    fn token_at(&self, index: usize) -> &Token {
        self.tokens.get(index).unwrap_or(&self.eof)
    }
}
