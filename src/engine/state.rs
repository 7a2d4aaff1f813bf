use std::sync::Arc;

use crate::domain::{OhlcField, TimeWindow};
use crate::error::SelectionError;
use crate::models::{QuoteSeries, SelectionResult};

/// Current value of every control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub symbol: String,
    pub window: TimeWindow,
    pub field: OhlcField,
}

/// The intermediate store shared by the chart and the summary labels.
/// Only symbol and window feed it; the field does not.
#[derive(Debug, Clone)]
pub struct FilteredSlice {
    pub symbol: String,
    pub window: TimeWindow,
    pub series: Arc<QuoteSeries>,
}

/// What the presentation layer reads after every event.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// THE FRONT BUFFER. Replaced wholesale on every successful computation.
    pub result: Option<Arc<SelectionResult>>,

    /// Last error (if any) to show instead of the chart
    pub last_error: Option<SelectionError>,

    /// Bumped on every change so callers can tell stale reads apart
    pub generation: u64,
}

impl ViewState {
    /// The "Swap" operation: newest result wins, any error is cleared.
    pub fn update_buffer(&mut self, result: SelectionResult) {
        self.result = Some(Arc::new(result));
        self.last_error = None;
        self.generation += 1;
    }

    /// A valid request whose computation failed: nothing to show.
    pub fn clear_with_error(&mut self, error: SelectionError) {
        self.result = None;
        self.last_error = Some(error);
        self.generation += 1;
    }

    /// A rejected control value: the current view still matches the controls.
    pub fn reject(&mut self, error: SelectionError) {
        self.last_error = Some(error);
        self.generation += 1;
    }
}
