// Quote selection and data-quality helpers
pub mod missing_values;
pub mod selector;

// Re-export commonly used types
pub use missing_values::{NullCount, count_missing, count_missing_in_file};
pub use selector::QuoteSelector;
