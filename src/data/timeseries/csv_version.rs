//! Quote source backed by the per-symbol CSV file pairs.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use csv::StringRecord;
use rayon::prelude::*;

use crate::analysis::missing_values::is_missing;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::quote_csv_filename;
use crate::data::timeseries::{QuoteSource, QuoteStore};
use crate::domain::Quote;
use crate::models::{Granularity, QuoteSeries, SymbolQuotes};
use crate::utils::TimeUtils;

pub struct CsvVersion {
    pub data_dir: PathBuf,
}

impl QuoteSource for CsvVersion {
    fn signature(&self) -> &'static str {
        "CSV Files"
    }

    fn create_quote_store(&self, symbols: &[&str]) -> Result<QuoteStore> {
        #[cfg(debug_assertions)]
        let start_time = DEBUG_FLAGS.print_loading.then(|| {
            log::info!("Reading {} symbols from {:?}...", symbols.len(), self.data_dir);
            std::time::Instant::now()
        });

        // One task per symbol; any failure fails the whole source
        let loaded = symbols
            .par_iter()
            .map(|symbol| load_symbol(&self.data_dir, symbol).map(|q| (symbol.to_string(), q)))
            .collect::<Result<Vec<_>>>()?;

        let mut store = QuoteStore::new("CSV quote store");
        for (symbol, quotes) in loaded {
            store.insert(symbol, quotes);
        }

        #[cfg(debug_assertions)]
        if let Some(start) = start_time {
            log::info!(
                "✅ CSV load: {} symbols in {:.2}s",
                store.len(),
                start.elapsed().as_secs_f64()
            );
        }

        Ok(store)
    }
}

/// Load both series for one symbol from `data_dir`.
pub fn load_symbol(data_dir: &Path, symbol: &str) -> Result<SymbolQuotes> {
    let daily = read_quote_csv(
        &data_dir.join(quote_csv_filename(symbol, Granularity::Daily)),
        symbol,
        Granularity::Daily,
    )?;
    let intraday = read_quote_csv(
        &data_dir.join(quote_csv_filename(symbol, Granularity::Intraday)),
        symbol,
        Granularity::Intraday,
    )?;
    Ok(SymbolQuotes { daily, intraday })
}

pub fn read_quote_csv(path: &Path, symbol: &str, granularity: Granularity) -> Result<QuoteSeries> {
    let file = File::open(path).with_context(|| format!("Failed to open CSV: {:?}", path))?;
    parse_quotes(file, symbol, granularity)
        .with_context(|| format!("Failed to parse CSV: {:?}", path))
}

/// Column positions resolved from the header row.
struct ColumnMap {
    open: usize,
    high: usize,
    low: usize,
    close: usize,
    volume: Option<usize>,
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .skip(1) // First column is always the timestamp
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .map(|i| i + 1)
        };
        let require = |name: &str| find(name).ok_or_else(|| anyhow!("missing column '{}'", name));

        Ok(Self {
            open: require("open")?,
            high: require("high")?,
            low: require("low")?,
            close: require("close")?,
            volume: find("volume"),
        })
    }
}

/// Parse a quote CSV whose first column is the timestamp. Row order is irrelevant.
pub fn parse_quotes<R: Read>(
    reader: R,
    symbol: &str,
    granularity: Granularity,
) -> Result<QuoteSeries> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().context("Failed to read CSV headers")?.clone();
    if headers.is_empty() {
        bail!("CSV has no header row");
    }
    let columns = ColumnMap::from_headers(&headers)?;

    let mut quotes = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2: records() starts after the header, and lines are 1-based
        let line = idx + 2;
        let record = result.with_context(|| format!("line {}: malformed row", line))?;
        let quote = parse_row(&record, &columns).with_context(|| format!("line {}", line))?;
        quotes.push(quote);
    }

    Ok(QuoteSeries::new(symbol, granularity, quotes))
}

fn parse_row(record: &StringRecord, columns: &ColumnMap) -> Result<Quote> {
    let raw_ts = record.get(0).unwrap_or_default();
    let timestamp = TimeUtils::parse_timestamp(raw_ts)
        .ok_or_else(|| anyhow!("unparseable timestamp '{}'", raw_ts))?;

    // Blank or NA-style cells load as NaN; the summary skips them
    let price = |idx: usize, name: &str| -> Result<f64> {
        let cell = record.get(idx).unwrap_or_default();
        if is_missing(cell) {
            return Ok(f64::NAN);
        }
        cell.parse::<f64>()
            .map_err(|_| anyhow!("bad {} value '{}'", name, cell))
    };

    let mut quote = Quote::new(
        timestamp,
        price(columns.open, "open")?,
        price(columns.high, "high")?,
        price(columns.low, "low")?,
        price(columns.close, "close")?,
    );
    if let Some(volume) = columns
        .volume
        .and_then(|idx| record.get(idx))
        .and_then(|cell| cell.parse::<f64>().ok())
    {
        quote = quote.with_volume(volume);
    }
    Ok(quote)
}
