//! Shelf CLI - book and board game store console.
//!
//! # Usage
//!
//! ```bash
//! # Run the scripted purchase / return scenario
//! shelf demo
//!
//! # List every product with its units sold
//! shelf --inventory data/inventario.txt --users data/usuarios.txt list
//!
//! # Monthly figures, as JSON
//! shelf --json report --month 7 --year 2023 --limit 3
//! ```
//!
//! # Commands
//!
//! - `demo` - Two purchases and a return, then the book figures
//! - `list` - Title and units sold for every product
//! - `report` - Revenue, units, rankings and top customers for a month

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use shelf_core::Catalog;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;
mod report;

use commands::{OutputFormat, ReportArgs};
use config::ShelfConfig;
use error::CliResult;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(author, version, about = "Book and board game store console")]
struct Cli {
    /// Config file (default: shelf.toml in the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Inventory file, overriding config and environment
    #[arg(long, global = true)]
    inventory: Option<PathBuf>,

    /// Users file, overriding config and environment
    #[arg(long, global = true)]
    users: Option<PathBuf>,

    /// Debug level logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Buy L001 and J001, return L001, then print the book figures
    Demo,
    /// List every product with its units sold
    List,
    /// Sales figures for a month
    Report {
        /// Month to report (1-12), default from config
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year to report, default from config
        #[arg(short, long)]
        year: Option<i32>,

        /// Number of top customers to show, default from config
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info,shelf=debug" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> CliResult<()> {
    let mut config = ShelfConfig::load(cli.config)?;
    if let Some(path) = cli.inventory {
        config.data.inventory = path;
    }
    if let Some(path) = cli.users {
        config.data.users = path;
    }

    let mut catalog = Catalog::with_policy(config.catalog_policy()?);
    let today = Local::now().date_naive();
    shelf_io::populate(&mut catalog, &config.data.inventory, &config.data.users, today)?;
    info!(reporting = %catalog.policy().reporting, "Catalog ready");

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Demo => commands::demo(&mut catalog, format, &mut out)?,
        Commands::List => commands::list(&catalog, format, &mut out)?,
        Commands::Report { month, year, limit } => {
            let args = ReportArgs { month, year, limit };
            commands::report(&catalog, args, format, &mut out)?;
        }
    }

    out.flush()?;
    Ok(())
}
