//! Configuration module for the stock dashboard.

pub mod dashboard;

mod debug; // Private: callers go through crate::config::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod persistence;

// Re-export commonly used items
pub use dashboard::{
    DASHBOARD, DashboardConfig, DashboardDefaults, SymbolCatalog, SymbolEntry, WindowTable,
};
pub use persistence::{
    DAILY_FILE_SUFFIX, DEFAULT_DATA_DIR, INTRADAY_FILE_SUFFIX, SNAPSHOT_DIR, SNAPSHOT_VERSION,
    quote_csv_filename, snapshot_filename,
};
