//! Rendering parsed statements.

use clap::ValueEnum;
use oxide_ddl_core::ast::{AlterSpecification, Statement};

use crate::error::Result;
use crate::script::ScriptStatement;

/// How parsed statements are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// One line per statement.
    #[default]
    Summary,
    /// Pretty-printed JSON array.
    Json,
    /// Rust debug representation of the parse tree.
    Debug,
}

/// Renders the statements in the given format.
///
/// # Errors
///
/// Returns `CliError::Json` if JSON serialization fails.
pub fn render(statements: &[ScriptStatement], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(statements)?),
        OutputFormat::Debug => Ok(format!("{statements:#?}")),
        OutputFormat::Summary => {
            let mut out = String::new();
            for s in statements {
                out.push_str(&format!("{:>3}  {}\n", s.index, summarize(&s.statement)));
            }
            Ok(out)
        }
    }
}

/// A one-line description of a statement.
#[must_use]
pub fn summarize(statement: &Statement) -> String {
    let kind = statement.kind_name();
    match statement {
        Statement::CreateTable(s) => {
            if let Some(like) = &s.like {
                format!("{kind} {} LIKE {like}", s.table)
            } else {
                let mut line = format!(
                    "{kind} {} ({} columns, {} elements, {} options)",
                    s.table,
                    s.columns().count(),
                    s.elements.len(),
                    s.options.len()
                );
                if s.partition.is_some() {
                    line.push_str(" partitioned");
                }
                if s.query.is_some() {
                    line.push_str(" from query");
                }
                line
            }
        }
        Statement::AlterTable(s) => {
            let names: Vec<&str> = s
                .specifications
                .iter()
                .map(AlterSpecification::name)
                .collect();
            format!("{kind} {}: {}", s.table, names.join(", "))
        }
        Statement::DropTable(s) => {
            let tables: Vec<String> = s.tables.iter().map(ToString::to_string).collect();
            format!("{kind} {}", tables.join(", "))
        }
        Statement::TruncateTable(s) => format!("{kind} {}", s.table),
        Statement::CreateIndex(s) => {
            format!("{kind} {} ON {} ({} key parts)", s.name, s.table, s.key_parts.len())
        }
        Statement::DropIndex(s) => format!("{kind} {} ON {}", s.name, s.table),
    }
}
