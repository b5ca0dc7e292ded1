//! SQL Lexer/Tokenizer
//!
//! A hand-written lexer for the MySQL dialect. It turns statement text into
//! the token buffer the parser consumes; the parser itself never sees raw text.

mod keyword;
mod span;
mod token;
mod tokenizer;

pub use keyword::Keyword;
pub use span::Span;
pub use token::{Token, TokenKind};
pub use tokenizer::Lexer;
