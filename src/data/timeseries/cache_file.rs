use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::{SNAPSHOT_DIR, snapshot_filename};
use crate::data::timeseries::QuoteStore;

/// Serialized snapshot of a whole quote store.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SnapshotFile {
    pub version: f64,
    pub timestamp_ms: i64,
    pub data: QuoteStore,
}

impl SnapshotFile {
    pub fn new(data: QuoteStore, version: f64) -> Self {
        Self {
            version,
            timestamp_ms: Utc::now().timestamp_millis(),
            data,
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let file = File::open(path).context(format!("Failed to open snapshot: {:?}", path))?;
        let mut reader = BufReader::new(file);
        let snapshot = bincode::deserialize_from(&mut reader)
            .context(format!("Failed to deserialize snapshot: {:?}", path))?;
        Ok(snapshot)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context(format!("Failed to create directory: {}", parent.display()))?;
        }
        let file =
            File::create(path).context(format!("Failed to create file: {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .context(format!("Failed to serialize snapshot to: {}", path.display()))
    }

    pub fn default_snapshot_path() -> PathBuf {
        PathBuf::from(SNAPSHOT_DIR).join(snapshot_filename())
    }
}
