//! File persistence and serialization configuration

/// Directory holding the per-symbol CSV files
pub const DEFAULT_DATA_DIR: &str = "../data/";

/// Filename endings appended to the symbol (e.g. "AAPL_TIME_SERIES_DAILY.csv")
pub const DAILY_FILE_SUFFIX: &str = "_TIME_SERIES_DAILY.csv";
pub const INTRADAY_FILE_SUFFIX: &str = "_TIME_SERIES_INTRADAY_EXTENDED.csv";

/// Directory path for storing binary quote snapshots
pub const SNAPSHOT_DIR: &str = "quote_data";

/// Current version of the snapshot serialization format
pub const SNAPSHOT_VERSION: f64 = 1.0;

use crate::models::Granularity;

/// Source CSV filename for one symbol at one granularity
/// Example: "AAPL_TIME_SERIES_DAILY.csv"
pub fn quote_csv_filename(symbol: &str, granularity: Granularity) -> String {
    let suffix = match granularity {
        Granularity::Daily => DAILY_FILE_SUFFIX,
        Granularity::Intraday => INTRADAY_FILE_SUFFIX,
    };
    format!("{}{}", symbol, suffix)
}

/// Generate versioned snapshot filename
/// Example: "quotes_v1.bin"
pub fn snapshot_filename() -> String {
    format!("quotes_v{}.bin", SNAPSHOT_VERSION)
}
