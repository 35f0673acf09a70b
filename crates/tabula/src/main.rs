//! Tabula - browse, filter and edit SQL Server tables.
//!
//! Without a subcommand this opens the terminal UI. The listing and `query`
//! subcommands print to stdout and log to stderr; the UI logs to a file so
//! the screen stays clean.

mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{
    Cli, Commands, handle_columns, handle_databases, handle_query, handle_schemas, handle_tables,
    launch_tui,
};
use std::path::PathBuf;
use std::sync::Mutex;
use tabula::{TabulaConfig, establish_connection};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("tabula"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tabula.log")
}

/// Initializes tracing; to a log file for the TUI, to stderr otherwise.
fn init_tracing(to_file: bool) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if to_file {
        let path = log_file_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
        info!(path = %path.display(), "Logging to file");
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // Load .env first so clap sees TABULA_* variables defined there.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);
    init_tracing(matches!(command, Commands::Tui))?;

    let config = TabulaConfig::load(cli.config.as_deref())?;
    let settings = cli.connection.apply(config.connection.clone());
    let page_size = config.browse.page_size;
    info!(server = %settings.target(), page_size, "Starting Tabula");

    let mut driver = establish_connection(&settings)
        .with_context(|| format!("Failed to connect to {}", settings.target()))?;

    match command {
        Commands::Tui => launch_tui(driver, page_size)?,
        Commands::Databases => handle_databases(&mut driver)?,
        Commands::Schemas { database } => handle_schemas(&mut driver, &database)?,
        Commands::Tables { database, schema } => handle_tables(&mut driver, &database, &schema)?,
        Commands::Columns { table } => handle_columns(&mut driver, &table)?,
        Commands::Query {
            table,
            page,
            filters,
            format,
        } => handle_query(&mut driver, &table, page, filters, format, page_size)?,
    }

    Ok(())
}
