// Startup loading: runs once before any selection happens

use anyhow::Result;

use crate::Cli;
use crate::config::SNAPSHOT_VERSION;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::data::timeseries::cache_file::SnapshotFile;
use crate::data::timeseries::csv_version::CsvVersion;
use crate::data::timeseries::serde_version::{SerdeVersion, check_snapshot_validity};
use crate::data::timeseries::{QuoteSource, QuoteStore, get_quote_store};

/// Build the quote store for `symbols`.
///
/// If the snapshot fails validation, CSV is the only choice. Otherwise both
/// sources are available and `--prefer-csv` decides which goes first.
pub fn load_quote_store(args: &Cli, symbols: &[&str]) -> Result<(QuoteStore, &'static str)> {
    let snapshot_path = args
        .snapshot
        .clone()
        .unwrap_or_else(SnapshotFile::default_snapshot_path);

    let csv_source = || -> Box<dyn QuoteSource> {
        Box::new(CsvVersion {
            data_dir: args.data_dir.clone(),
        })
    };
    let snapshot_source = || -> Box<dyn QuoteSource> {
        Box::new(SerdeVersion {
            path: snapshot_path.clone(),
        })
    };

    let providers: Vec<Box<dyn QuoteSource>> = match (
        args.prefer_csv,
        check_snapshot_validity(&snapshot_path, SNAPSHOT_VERSION, symbols),
    ) {
        (false, Ok(_)) => vec![snapshot_source(), csv_source()], // snapshot first
        (true, Ok(_)) => vec![csv_source(), snapshot_source()],  // CSV first
        (_, Err(e)) => {
            if snapshot_path.exists() {
                log::warn!("⚠️  Snapshot validation failed: {:#}", e);
                log::warn!("⚠️  Falling back to CSV files...");
            } else {
                log::info!("No snapshot at {:?}, reading CSV files", snapshot_path);
            }
            vec![csv_source()] // CSV only
        }
    };

    let (store, signature) = get_quote_store(&providers, symbols)?;

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_loading {
        log::info!(
            "Successfully loaded {} symbols using: {}.",
            store.len(),
            signature
        );
    }
    Ok((store, signature))
}
