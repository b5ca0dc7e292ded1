//! SQL Parser
//!
//! A hand-written recursive descent parser for MySQL DDL. Expressions are
//! parsed by precedence climbing over four layers; ALTER TABLE clauses are
//! resolved by a priority-ordered table of lookahead predicates.

mod alter;
mod column;
mod config;
mod data_type;
mod error;
mod expr;
mod index;
mod literal;
mod parser;
mod partition;
mod precedence;
mod select;
mod statement;
mod stream;
mod table_option;

pub use config::ParserConfig;
pub use error::{ParseError, ParseErrorKind, Result};
pub use parser::Parser;
pub use stream::{Checkpoint, TokenStream};
