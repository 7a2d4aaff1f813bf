// Domain types and value objects
pub mod ohlc_field;
pub mod quote;
pub mod time_window;

// Re-export commonly used types
pub use ohlc_field::OhlcField;
pub use quote::Quote;
pub use time_window::TimeWindow;
