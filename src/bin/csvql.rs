//! csvql CLI
//!
//! Loads one CSV file as a table and answers SQL queries against it, either
//! interactively or once via `--query`.

use anyhow::{bail, Context};
use clap::Parser;
use csvql::config::{EngineSettings, LoadOptions, TypeMismatchPolicy};
use csvql::export::OutputFormat;
use csvql::Session;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "\\q"];

/// csvql - SQL over a CSV file
#[derive(Parser)]
#[command(name = "csvql")]
#[command(about = "Run simple SELECT queries against a CSV file", long_about = None)]
#[command(version)]
struct Cli {
    /// CSV file to load; the table is named after the file stem
    csv_path: PathBuf,

    /// Field delimiter
    #[arg(long, env = "CSVQL_DELIMITER", default_value = ",")]
    delimiter: char,

    /// Output format (table or json)
    #[arg(long, env = "CSVQL_FORMAT", default_value = "table")]
    format: OutputFormat,

    /// Fail numeric comparisons against non-numeric cells instead of skipping the row
    #[arg(long)]
    strict_types: bool,

    /// Run a single query and exit
    #[arg(long, short)]
    query: Option<String>,

    /// Log filter (e.g. warn, info, csvql=debug)
    #[arg(long, env = "CSVQL_LOG", default_value = "warn")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    // Expand ~ in path
    let csv_path = PathBuf::from(shellexpand::tilde(&cli.csv_path.to_string_lossy()).to_string());

    if !cli.delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", cli.delimiter);
    }
    let options = LoadOptions {
        delimiter: cli.delimiter as u8,
    };
    let settings = EngineSettings {
        type_mismatch: if cli.strict_types {
            TypeMismatchPolicy::Strict
        } else {
            TypeMismatchPolicy::Permissive
        },
    };

    let session = open_session(&csv_path, &options, settings)?;

    match cli.query {
        Some(sql) => cmd_query(&session, &sql, cli.format),
        None => cmd_repl(&session, &csv_path, cli.format),
    }
}

fn init_logging(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_session(
    csv_path: &Path,
    options: &LoadOptions,
    settings: EngineSettings,
) -> anyhow::Result<Session> {
    match Session::open(csv_path, options, settings) {
        Ok(session) => Ok(session),
        Err(e) => bail!("Error loading CSV: {}", e),
    }
}

fn cmd_query(session: &Session, sql: &str, format: OutputFormat) -> anyhow::Result<()> {
    let result = match session.run(sql) {
        Ok(result) => result,
        Err(e) => bail!("{}", e),
    };
    print!("{}", format.render(&result)?);
    Ok(())
}

fn cmd_repl(session: &Session, csv_path: &Path, format: OutputFormat) -> anyhow::Result<()> {
    let name = session.table().name();
    println!("Loaded table '{}' from '{}'", name, csv_path.display());
    println!("Enter SQL queries, or type 'exit', 'quit', or '\\q' to quit.");
    println!("Remember: use FROM {}", name);
    println!();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = io::stdout();

    loop {
        print!("sql> ");
        stdout.flush().context("failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("failed to read from stdin")?,
            None => {
                println!();
                break;
            }
        };

        let stripped = line.trim();
        if EXIT_WORDS.iter().any(|w| stripped.eq_ignore_ascii_case(w)) {
            break;
        }
        if stripped.is_empty() {
            continue;
        }

        match session.run(stripped) {
            Ok(result) => print!("{}", format.render(&result)?),
            Err(e) => println!("{}", e),
        }
        println!();
    }

    println!("Goodbye!");
    Ok(())
}
