//! # oxide-ddl-core
//!
//! A MySQL DDL parser.
//!
//! This crate provides:
//! - A hand-written lexer producing a token buffer with source spans
//! - A recursive descent parser for `CREATE`/`ALTER`/`DROP`/`TRUNCATE TABLE`
//!   and `CREATE`/`DROP INDEX`, including the expression language used by
//!   defaults, checks, generated columns, partitions and `CREATE TABLE ... SELECT`
//! - An immutable AST whose expressions render back to SQL
//!
//! ## Parsing a statement
//!
//! ```rust
//! use oxide_ddl_core::ast::{AlterSpecification, Statement};
//!
//! let parsed = oxide_ddl_core::parse("ALTER TABLE t1 ADD COLUMN c INT NOT NULL, DROP COLUMN d;")
//!     .unwrap();
//!
//! let Statement::AlterTable(alter) = parsed.statement else {
//!     panic!("expected ALTER TABLE");
//! };
//! assert_eq!(alter.specifications.len(), 2);
//! assert!(matches!(
//!     alter.specifications[1],
//!     AlterSpecification::DropColumn(ref name) if name == "d"
//! ));
//! ```
//!
//! ## Working on tokens
//!
//! The parser only ever reads a token buffer. Callers that already hold
//! tokens, for example after splitting a script at `;`, use [`parse_tokens`]:
//!
//! ```rust
//! use oxide_ddl_core::{Lexer, parse_tokens};
//!
//! let tokens = Lexer::new("DROP TABLE IF EXISTS a, b").tokenize();
//! let parsed = parse_tokens(&tokens).unwrap();
//! assert_eq!(parsed.statement.kind_name(), "DROP TABLE");
//! assert_eq!(parsed.consumed, 0..tokens.len() - 1);
//! ```
//!
//! Errors carry the expected token kinds, the token found and its position:
//!
//! ```rust
//! use oxide_ddl_core::parser::ParseErrorKind;
//!
//! let err = oxide_ddl_core::parse("CREATE TABLE t (a INT DEFAULT (1 +))").unwrap_err();
//! assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
//! assert_eq!(err.span.start, 34);
//! ```

use core::ops::Range;

pub mod ast;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseError, Parser, ParserConfig};

/// A statement together with the tokens it was parsed from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ParsedStatement {
    /// The parsed statement.
    pub statement: Statement,
    /// Indices of the consumed tokens, including a trailing `;`. The end of
    /// input token is not part of the range.
    pub consumed: Range<usize>,
}

/// Lexes and parses a single statement.
///
/// # Errors
///
/// Returns a `ParseError` if the text is not exactly one valid statement,
/// optionally followed by `;`.
pub fn parse(sql: &str) -> parser::Result<ParsedStatement> {
    parse_with_config(sql, ParserConfig::default())
}

/// Lexes and parses a single statement with an explicit configuration.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_config(sql: &str, config: ParserConfig) -> parser::Result<ParsedStatement> {
    let tokens = Lexer::new(sql).tokenize();
    parse_tokens_with_config(&tokens, config)
}

/// Parses a single statement from a token buffer.
///
/// # Errors
///
/// Returns a `ParseError` if the tokens are not exactly one valid statement,
/// optionally followed by `;`.
pub fn parse_tokens(tokens: &[Token]) -> parser::Result<ParsedStatement> {
    parse_tokens_with_config(tokens, ParserConfig::default())
}

/// Parses a single statement from a token buffer with an explicit configuration.
///
/// # Errors
///
/// See [`parse_tokens`].
pub fn parse_tokens_with_config(
    tokens: &[Token],
    config: ParserConfig,
) -> parser::Result<ParsedStatement> {
    let mut parser = Parser::with_config(tokens, config);
    let statement = parser.parse_complete()?;
    Ok(ParsedStatement {
        statement,
        consumed: 0..parser.position(),
    })
}
