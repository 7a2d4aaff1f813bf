use thiserror::Error;

use crate::domain::TimeWindow;

/// Typed failures of a quote selection. None of these are transient, so
/// callers should degrade (e.g. show "no data") rather than retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The symbol has no entry in the quote store.
    #[error("unknown symbol: {0}")]
    UnknownSymbol(String),

    /// The granularity index is outside `0..=6`.
    #[error("invalid granularity index {0}: expected 0..=6")]
    InvalidGranularity(i64),

    /// The field is not one of open/high/low/close.
    #[error("invalid field {0:?}: expected one of open, high, low, close")]
    InvalidField(String),

    /// The selected window holds no observations, or none with a value
    /// for the chosen field.
    #[error("no observations for {symbol} in window {window}")]
    EmptySeries { symbol: String, window: TimeWindow },
}
