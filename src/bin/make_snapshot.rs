use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use stock_dash::config::{DASHBOARD, DEFAULT_DATA_DIR};
use stock_dash::data::timeseries::QuoteSource;
use stock_dash::data::timeseries::cache_file::SnapshotFile;
use stock_dash::data::timeseries::csv_version::CsvVersion;
use stock_dash::data::timeseries::serde_version::write_snapshot;

/// Parse the catalog's CSV files once and write them as a binary snapshot.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    data_dir: PathBuf,

    /// Output path (defaults to the path the dashboard looks in)
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = Args::parse();
    let symbols: Vec<&str> = DASHBOARD.catalog.symbols().collect();

    let source = CsvVersion {
        data_dir: args.data_dir.clone(),
    };
    let store = source
        .create_quote_store(&symbols)
        .with_context(|| format!("Failed to read CSV files from {:?}", args.data_dir))?;

    let out = args.out.unwrap_or_else(SnapshotFile::default_snapshot_path);
    write_snapshot(&store, &out)?;

    println!("✅ Snapshot written to {:?} with {} symbols.", out, store.len());
    Ok(())
}
