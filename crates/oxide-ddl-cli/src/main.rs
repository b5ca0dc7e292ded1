//! oxide-ddl CLI
//!
//! Parses MySQL DDL scripts and prints the parse trees.

use std::path::PathBuf;

use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use oxide_ddl_cli::{OutputFormat, parse_script, read_file, read_stdin, render};
use oxide_ddl_core::ParserConfig;

/// Parse MySQL DDL statements.
#[derive(Parser)]
#[command(name = "oxide-ddl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// SQL script to parse (standard input if neither a file nor --sql is given).
    input: Option<PathBuf>,

    /// Inline SQL to parse instead of a file.
    #[arg(short, long, conflicts_with = "input")]
    sql: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, env = "OXIDE_DDL_FORMAT", default_value_t = OutputFormat::Summary)]
    format: OutputFormat,

    /// Maximum expression and subquery nesting depth.
    #[arg(long, env = "OXIDE_DDL_MAX_DEPTH", default_value_t = ParserConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable verbose output (repeat for parser traces).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let sql = match (&cli.input, &cli.sql) {
        (Some(path), _) => read_file(path)?,
        (None, Some(sql)) => sql.clone(),
        (None, None) => read_stdin()?,
    };

    let config = ParserConfig::default().with_max_depth(cli.max_depth);
    let statements = parse_script(&sql, config)?;
    info!("Parsed {} statement(s)", statements.len());

    print!("{}", render(&statements, cli.format)?);
    Ok(())
}
