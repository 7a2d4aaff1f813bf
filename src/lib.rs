#![allow(clippy::const_is_empty)]
#![allow(clippy::collapsible_if)]

// Core modules
pub mod analysis;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod models;
pub mod ui;
pub mod utils;

// The reactive control wiring
pub mod engine;

// Re-export commonly used types
pub use analysis::QuoteSelector;
pub use data::{QuoteStore, load_quote_store};
pub use domain::{OhlcField, Quote, TimeWindow};
pub use engine::{ControlEvent, DashboardEngine};
pub use error::SelectionError;
pub use models::{Granularity, QuoteSeries, SelectionResult, SelectionSummary};

use std::path::PathBuf;

// CLI argument parsing
use clap::{Parser, Subcommand};

use config::DEFAULT_DATA_DIR;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Time-windowed stock quote dashboard", long_about = None)]
pub struct Cli {
    /// Directory holding the <SYMBOL>_TIME_SERIES_*.csv files
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Binary snapshot to try before the CSV files
    #[arg(long)]
    pub snapshot: Option<PathBuf>,

    /// Use the CSV files as primary source instead of the snapshot
    #[arg(long, default_value_t = false)]
    pub prefer_csv: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// One selection: slice a symbol's quotes and print the summary
    Show {
        symbol: String,
        /// Window position 0..=6 (1 day .. max)
        #[arg(allow_negative_numbers = true)]
        window: i64,
        /// open | high | low | close
        #[arg(default_value = "close")]
        field: String,
        /// Print the selected slice as JSON instead of a table
        #[arg(long)]
        json: bool,
        /// How many rows of the slice to print
        #[arg(long, default_value_t = 10)]
        rows: usize,
    },
    /// List the catalog and how many rows were loaded per symbol
    Symbols,
    /// Drive the dashboard controls from stdin
    Interactive,
    /// Count missing values per column of any CSV file
    Missing {
        path: PathBuf,
        /// Bars along the y axis instead of the x axis
        #[arg(long)]
        horizontal: bool,
    },
}

impl Command {
    /// Only the dashboard commands need the quote store.
    pub fn needs_quotes(&self) -> bool {
        !matches!(self, Command::Missing { .. })
    }
}
