use chrono::{NaiveDate, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::{OhlcField, Quote};

// ============================================================================
// Granularity: which of a symbol's two series we are talking about
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// One observation per trading day, long history
    Daily,
    /// Sub-daily observations, shorter history
    Intraday,
}

// ============================================================================
// QuoteSeries: immutable, date-sorted observations for one symbol
// ============================================================================

/// Observations for one symbol at one granularity.
///
/// Construction sorts the rows ascending by timestamp, whatever order they
/// arrived in, so every series in the crate is sorted. Slicing never mutates;
/// it returns a new series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(from = "QuoteSeriesParts")]
pub struct QuoteSeries {
    pub symbol: String,
    pub granularity: Granularity,
    quotes: Vec<Quote>,
}

// Deserialization goes through `QuoteSeries::new` so snapshots can't smuggle in unsorted rows.
#[derive(Deserialize)]
struct QuoteSeriesParts {
    symbol: String,
    granularity: Granularity,
    quotes: Vec<Quote>,
}

impl From<QuoteSeriesParts> for QuoteSeries {
    fn from(parts: QuoteSeriesParts) -> Self {
        QuoteSeries::new(parts.symbol, parts.granularity, parts.quotes)
    }
}

impl QuoteSeries {
    pub fn new(symbol: impl Into<String>, granularity: Granularity, mut quotes: Vec<Quote>) -> Self {
        // Stable: rows sharing a timestamp keep their input order
        quotes.sort_by_key(|q| q.timestamp);
        QuoteSeries {
            symbol: symbol.into(),
            granularity,
            quotes,
        }
    }

    pub fn empty(symbol: impl Into<String>, granularity: Granularity) -> Self {
        Self::new(symbol, granularity, Vec::new())
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.quotes.first().map(Quote::date)
    }

    /// Calendar date of the most recent observation.
    pub fn last_day(&self) -> Option<NaiveDate> {
        self.quotes.last().map(Quote::date)
    }

    /// All rows whose calendar date lies in `[start_day, end_day]`.
    pub fn slice_by_date_range(&self, start_day: NaiveDate, end_day: NaiveDate) -> QuoteSeries {
        let start_idx = self.quotes.partition_point(|q| q.date() < start_day);
        let end_idx = self.quotes.partition_point(|q| q.date() <= end_day);
        let quotes = if start_idx < end_idx {
            self.quotes[start_idx..end_idx].to_vec()
        } else {
            Vec::new()
        };

        QuoteSeries {
            symbol: self.symbol.clone(),
            granularity: self.granularity,
            quotes,
        }
    }

    /// Rows from `last_day - days` up to and including `last_day`.
    /// Calendar subtraction; a window reaching past the first row just truncates.
    pub fn most_recent_days(&self, days: i64) -> QuoteSeries {
        let Some(last_day) = self.last_day() else {
            return self.clone();
        };
        let start_day = last_day
            .checked_sub_signed(TimeDelta::days(days))
            .unwrap_or(NaiveDate::MIN);
        self.slice_by_date_range(start_day, last_day)
    }

    pub fn field_values(&self, field: OhlcField) -> Vec<f64> {
        self.quotes.iter().map(|q| q.get(field)).collect()
    }

    /// JSON payload of the filtered series, shared between dependent views.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// SymbolQuotes: the daily + intraday pair held for each symbol
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SymbolQuotes {
    pub daily: QuoteSeries,
    pub intraday: QuoteSeries,
}

impl SymbolQuotes {
    pub fn series(&self, granularity: Granularity) -> &QuoteSeries {
        match granularity {
            Granularity::Daily => &self.daily,
            Granularity::Intraday => &self.intraday,
        }
    }
}
