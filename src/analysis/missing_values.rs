//! Per-column missing-value counts for a CSV table.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

// Compared case-insensitively after trimming
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "-nan", "null", "none", "<na>", "#n/a"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NullCount {
    pub column: String,
    pub count: usize,
}

pub fn is_missing(cell: &str) -> bool {
    let cell = cell.trim();
    MISSING_MARKERS.iter().any(|m| cell.eq_ignore_ascii_case(m))
}

/// Missing cells per column, in header order, columns with zero dropped.
/// Short rows count their absent trailing cells as missing.
pub fn count_missing<R: Read>(reader: R) -> Result<Vec<NullCount>> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let headers = reader.headers().context("Failed to read CSV headers")?.clone();

    let mut counts = vec![0usize; headers.len()];
    for (idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("line {}: malformed row", idx + 2))?;
        for (col, count) in counts.iter_mut().enumerate() {
            if record.get(col).is_none_or(is_missing) {
                *count += 1;
            }
        }
    }

    Ok(headers
        .iter()
        .zip(counts)
        .filter(|(_, count)| *count > 0)
        .map(|(column, count)| NullCount {
            column: column.to_string(),
            count,
        })
        .collect())
}

pub fn count_missing_in_file(path: &Path) -> Result<Vec<NullCount>> {
    let file = File::open(path).with_context(|| format!("Failed to open CSV: {:?}", path))?;
    count_missing(file).with_context(|| format!("Failed to scan CSV: {:?}", path))
}
