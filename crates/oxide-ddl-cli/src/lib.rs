//! # oxide-ddl-cli
//!
//! Surrounding tooling for `oxide-ddl-core`: reads a SQL script, lexes it,
//! splits the token buffer into statements at `;`, parses each statement and
//! renders the results.
//!
//! ```rust
//! use oxide_ddl_cli::{OutputFormat, parse_script, render};
//! use oxide_ddl_core::ParserConfig;
//!
//! let statements = parse_script("TRUNCATE a; DROP TABLE b;", ParserConfig::default()).unwrap();
//! assert_eq!(statements.len(), 2);
//! assert_eq!(
//!     render(&statements, OutputFormat::Summary).unwrap(),
//!     "  1  TRUNCATE TABLE a\n  2  DROP TABLE b\n"
//! );
//! ```

pub mod error;
pub mod output;
pub mod script;

pub use error::{CliError, Result};
pub use output::{OutputFormat, render, summarize};
pub use script::{ScriptStatement, parse_script, read_file, read_stdin, split_statements};
