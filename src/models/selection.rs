use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{OhlcField, TimeWindow};
use crate::models::QuoteSeries;
use crate::utils::maths_utils::get_min_max;

/// What the controls asked for, still unvalidated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SelectionRequest {
    pub symbol: String,
    pub window_index: i64,
    pub field: String,
}

impl SelectionRequest {
    pub fn new(symbol: impl Into<String>, window_index: i64, field: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            window_index,
            field: field.into(),
        }
    }
}

/// Highest and lowest value of one field over a slice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub field: OhlcField,
    pub max: f64,
    pub min: f64,
}

impl SelectionSummary {
    /// Missing (NaN) cells are skipped. `None` when no value is left,
    /// i.e. the series has no rows or the field is missing in every row.
    pub fn from_series(series: &QuoteSeries, field: OhlcField) -> Option<Self> {
        let values: Vec<f64> = series
            .field_values(field)
            .into_iter()
            .filter(|v| !v.is_nan())
            .collect();
        if values.is_empty() {
            return None;
        }
        let (min, max) = get_min_max(&values);
        Some(Self { field, max, min })
    }

    pub fn max_display(&self) -> String {
        format_one_decimal(self.max)
    }

    pub fn min_display(&self) -> String {
        format_one_decimal(self.min)
    }

    /// e.g. "High: 193.2"
    pub fn high_label(&self) -> String {
        format!("High: {}", self.max_display())
    }

    /// e.g. "Low: 101.0"
    pub fn low_label(&self) -> String {
        format!("Low: {}", self.min_display())
    }
}

pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// A windowed slice of one symbol's quotes plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult {
    pub symbol: String,
    pub window: TimeWindow,
    pub series: Arc<QuoteSeries>,
    pub summary: SelectionSummary,
}

impl SelectionResult {
    pub fn field(&self) -> OhlcField {
        self.summary.field
    }
}
