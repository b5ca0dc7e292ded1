//! Splitting a script into statements and parsing each one.

use std::fs;
use std::io::Read;
use std::ops::Range;
use std::path::Path;

use oxide_ddl_core::ast::Statement;
use oxide_ddl_core::lexer::Span;
use oxide_ddl_core::{Lexer, ParserConfig, Token, TokenKind};
use serde::Serialize;
use tracing::debug;

use crate::error::{CliError, Result};

/// One parsed statement of a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptStatement {
    /// One-based position in the script.
    pub index: usize,
    /// Byte range of the statement in the script text.
    pub span: Span,
    /// Indices of the statement's tokens in the script's token buffer.
    pub tokens: Range<usize>,
    /// The parsed statement.
    pub statement: Statement,
}

/// Reads a script from a file.
///
/// # Errors
///
/// Returns `CliError::Read` if the file cannot be read.
pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a script from standard input.
///
/// # Errors
///
/// Returns `CliError::Io` if standard input cannot be read.
pub fn read_stdin() -> Result<String> {
    let mut sql = String::new();
    std::io::stdin().read_to_string(&mut sql)?;
    Ok(sql)
}

/// Splits a token buffer at `;`. Each range keeps its terminating `;`;
/// ranges holding nothing but a `;` are dropped, and the end of input token
/// is never part of a range.
#[must_use]
pub fn split_statements(tokens: &[Token]) -> Vec<Range<usize>> {
    let end = tokens
        .iter()
        .position(|token| token.kind == TokenKind::Eof)
        .unwrap_or(tokens.len());

    let mut ranges = Vec::new();
    let mut start = 0;
    for (i, token) in tokens[..end].iter().enumerate() {
        if token.kind == TokenKind::Semicolon {
            if i > start {
                ranges.push(start..i + 1);
            }
            start = i + 1;
        }
    }
    if start < end {
        ranges.push(start..end);
    }
    ranges
}

/// Lexes a script and parses every statement in it.
///
/// # Errors
///
/// Returns `CliError::Parse` for the first statement that fails, with its
/// one-based index.
pub fn parse_script(sql: &str, config: ParserConfig) -> Result<Vec<ScriptStatement>> {
    let tokens = Lexer::new(sql).tokenize();
    let ranges = split_statements(&tokens);
    debug!(tokens = tokens.len(), statements = ranges.len(), "split script");

    ranges
        .into_iter()
        .enumerate()
        .map(|(i, range)| {
            let index = i + 1;
            let slice = &tokens[range.clone()];
            let parsed = oxide_ddl_core::parse_tokens_with_config(slice, config)
                .map_err(|source| CliError::Parse { index, source })?;
            debug!(index, statement = parsed.statement.kind_name(), "parsed");

            let tokens = range.start + parsed.consumed.start..range.start + parsed.consumed.end;
            let span = slice
                .first()
                .zip(slice.last())
                .map_or_else(Span::default, |(first, last)| first.span.merge(last.span));
            Ok(ScriptStatement {
                index,
                span,
                tokens,
                statement: parsed.statement,
            })
        })
        .collect()
}
