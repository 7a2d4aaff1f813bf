// Data loading and snapshot caching
pub mod pre_main;
pub mod timeseries;

// Re-export commonly used types
pub use pre_main::load_quote_store;
pub use timeseries::{QuoteSource, QuoteStore};
