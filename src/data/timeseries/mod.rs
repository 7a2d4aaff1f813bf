pub mod cache_file;
pub mod csv_version;
pub mod serde_version;

use std::collections::BTreeMap;

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::models::SymbolQuotes;

pub trait QuoteSource {
    // Either build a quote store for `symbols` OR return an anyhow::error
    fn create_quote_store(&self, symbols: &[&str]) -> Result<QuoteStore>;

    /// A unique identifier for this implementation (so that afterwards we know which one we used).
    fn signature(&self) -> &'static str;
}

/// Try each source in priority order; the first that succeeds wins.
pub fn get_quote_store(
    sources: &[Box<dyn QuoteSource>],
    symbols: &[&str],
) -> Result<(QuoteStore, &'static str)> {
    for source in sources {
        match source.create_quote_store(symbols) {
            Ok(store) => return Ok((store, source.signature())),
            Err(e) => {
                log::info!("Error with quote source {}: {:#}", source.signature(), e);
                // Continue to the next source
            }
        }
    }
    Err(anyhow!("All quote sources failed to create data"))
}

/// Every symbol's daily and intraday series, frozen after startup.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct QuoteStore {
    pub name: String, // Metadata e.g. "CSV quote store".
    series_data: BTreeMap<String, SymbolQuotes>,
}

impl QuoteStore {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            series_data: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, symbol: impl Into<String>, quotes: SymbolQuotes) {
        self.series_data.insert(symbol.into(), quotes);
    }

    pub fn get(&self, symbol: &str) -> Option<&SymbolQuotes> {
        self.series_data.get(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.series_data.contains_key(symbol)
    }

    /// Symbols held, sorted.
    pub fn symbols(&self) -> Vec<String> {
        self.series_data.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.series_data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series_data.is_empty()
    }

    /// Keep only the listed symbols.
    pub fn retain_symbols(&mut self, symbols: &[&str]) {
        self.series_data.retain(|s, _| symbols.contains(&s.as_str()));
    }
}
