#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::SNAPSHOT_VERSION;
use crate::utils::time_utils::how_many_seconds_ago;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

use crate::data::timeseries::{QuoteSource, QuoteStore, cache_file::SnapshotFile};

/// Checks a snapshot can serve `symbols`: right format version, every symbol present.
pub fn check_snapshot_validity(
    path: &Path,
    version_required: f64,
    symbols: &[&str],
) -> Result<SnapshotFile> {
    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!("Checking validity of snapshot at {:?}...", path);
    }
    let snapshot = SnapshotFile::load_from_path(path)?;

    if snapshot.version != version_required {
        bail!(
            "Snapshot version mismatch: file v{} vs required v{}",
            snapshot.version,
            version_required
        );
    }

    if let Some(missing) = symbols.iter().find(|s| !snapshot.data.contains(s)) {
        bail!("Snapshot has no data for symbol {}", missing);
    }

    #[cfg(debug_assertions)]
    if DEBUG_FLAGS.print_serde {
        log::info!(
            "✅ Snapshot valid: v{}, {} symbols, {}s old",
            snapshot.version,
            snapshot.data.len(),
            how_many_seconds_ago(snapshot.timestamp_ms)
        );
    }

    Ok(snapshot)
}

/// Write a quote store to a binary snapshot
/// Uses bincode so startup skips CSV parsing entirely
pub fn write_snapshot(store: &QuoteStore, path: &Path) -> Result<()> {
    #[cfg(debug_assertions)]
    let start_time = DEBUG_FLAGS.print_serde.then(|| {
        log::info!("Writing snapshot to disk: {:?}...", path);
        std::time::Instant::now()
    });

    let snapshot = SnapshotFile::new(store.clone(), SNAPSHOT_VERSION);
    snapshot.save_to_path(path)?;

    #[cfg(debug_assertions)]
    if let Some(start) = start_time {
        let file_size = std::fs::metadata(path)?.len();
        log::info!(
            "✅ Snapshot written: {:?} ({:.1} MB in {:.2}s)",
            path,
            file_size as f64 / 1_048_576.0,
            start.elapsed().as_secs_f64()
        );
    }

    Ok(())
}

pub struct SerdeVersion {
    pub path: PathBuf,
}

impl QuoteSource for SerdeVersion {
    fn signature(&self) -> &'static str {
        "Local Snapshot"
    }

    fn create_quote_store(&self, symbols: &[&str]) -> Result<QuoteStore> {
        let snapshot = check_snapshot_validity(&self.path, SNAPSHOT_VERSION, symbols)?;
        log::info!(
            "Snapshot loaded: {} symbols, created {}s ago",
            snapshot.data.len(),
            how_many_seconds_ago(snapshot.timestamp_ms)
        );
        let mut store = snapshot.data;
        store.retain_symbols(symbols);
        Ok(store)
    }
}
