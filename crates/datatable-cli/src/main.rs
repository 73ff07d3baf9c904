//! datatable command line interface
//!
//! Compile, inspect, and execute datatable directives against a SQLite
//! entity-attribute-value store.

mod commands;
mod error;
mod shell;

use clap::{Parser, Subcommand, ValueEnum};
use std::{path::PathBuf, process::ExitCode};
use tracing_subscriber::EnvFilter;

///
/// Cli
///

#[derive(Debug, Parser)]
#[command(name = "datatable", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// TOML file overriding store and directive settings
    #[arg(short, long, env = "DATATABLE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the SQL compiled from the first directive in a file
    Compile {
        file: PathBuf,

        /// Runtime sort override, `key` or `^key`
        #[arg(short, long)]
        sort: Option<String>,

        /// Treat the whole file as a directive body
        #[arg(long)]
        body: bool,
    },

    /// Print the parsed table spec as JSON
    Spec {
        file: PathBuf,

        #[arg(long)]
        body: bool,
    },

    /// Execute the first directive in a file and print the table
    Render {
        file: PathBuf,

        /// SQLite database holding the entity and attribute tables
        #[arg(short, long, env = "DATATABLE_DB")]
        db: PathBuf,

        #[arg(short, long)]
        sort: Option<String>,

        /// Page the header sort links point back to
        #[arg(long, default_value = "")]
        page_url: String,

        #[arg(short, long, value_enum, default_value = "html")]
        format: OutputFormat,

        #[arg(long)]
        body: bool,
    },

    /// Interactive shell; a blank line ends each directive
    Shell {
        #[arg(short, long, env = "DATATABLE_DB")]
        db: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    Html,
    Json,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("datatable=error")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match commands::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
