//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tabula::{ConnectionSettings, FilterPredicate, OutputFormat};

/// Browse, filter and edit SQL Server tables.
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(about = "Browse, filter and edit SQL Server tables from the terminal")]
#[command(version)]
pub struct Cli {
    /// Path to configuration file (default: <config dir>/tabula/tabula.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Connection overrides
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Command to run; the terminal UI when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Connection flags. Each overrides the matching `[connection]` entry.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Server host name or address
    #[arg(long, global = true, env = "TABULA_HOST")]
    pub host: Option<String>,

    /// Server TCP port
    #[arg(long, global = true, env = "TABULA_PORT")]
    pub port: Option<u16>,

    /// SQL login
    #[arg(short, long, global = true, env = "TABULA_USER")]
    pub user: Option<String>,

    /// SQL login password
    #[arg(long, global = true, env = "TABULA_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// ADO.NET connection string; replaces the discrete fields
    #[arg(
        long,
        global = true,
        env = "TABULA_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub connection_string: Option<String>,
}

impl ConnectionArgs {
    /// Applies the flags that were given on top of `settings`.
    pub fn apply(&self, mut settings: ConnectionSettings) -> ConnectionSettings {
        if let Some(host) = &self.host {
            settings.host = host.clone();
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        if let Some(user) = &self.user {
            settings.username = Some(user.clone());
        }
        if let Some(password) = &self.password {
            settings.password = Some(password.clone());
        }
        if let Some(connection_string) = &self.connection_string {
            settings.connection_string = Some(connection_string.clone());
        }
        settings
    }
}

/// Identifies one table.
#[derive(Args, Debug, Clone)]
pub struct TableArgs {
    /// Database name
    #[arg(short, long)]
    pub database: String,

    /// Schema name
    #[arg(short, long, default_value = "dbo")]
    pub schema: String,

    /// Table or view name
    #[arg(short, long)]
    pub table: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the terminal UI (default)
    Tui,

    /// List user databases
    Databases,

    /// List schemas in a database
    Schemas {
        /// Database name
        #[arg(short, long)]
        database: String,
    },

    /// List tables and views in a schema
    Tables {
        /// Database name
        #[arg(short, long)]
        database: String,

        /// Schema name
        #[arg(short, long, default_value = "dbo")]
        schema: String,
    },

    /// Describe the columns of a table
    Columns {
        #[command(flatten)]
        table: TableArgs,
    },

    /// Print one page of a table
    Query {
        #[command(flatten)]
        table: TableArgs,

        /// Page number (out-of-range pages show page 1)
        #[arg(short, long, default_value_t = 1)]
        page: u64,

        /// Filter as COLUMN:OP:VALUE, e.g. `City:LIKE:Lon` or `Qty:>=:10`; repeatable
        #[arg(short, long = "filter", value_name = "COLUMN:OP:VALUE")]
        filters: Vec<FilterPredicate>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}
