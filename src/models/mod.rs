// Domain models for quote selection
// These modules contain pure business logic independent of loading/presentation

pub mod selection;
pub mod timeseries;

// Re-export key types for convenience
pub use selection::{SelectionRequest, SelectionResult, SelectionSummary, format_one_decimal};
pub use timeseries::{Granularity, QuoteSeries, SymbolQuotes};
