//! Dashboard configuration: window table, symbol catalog and control defaults.

use serde::{Deserialize, Serialize};

use crate::domain::{OhlcField, TimeWindow};

/// Maps each time window to the number of calendar days it covers.
/// Passed into the selector at construction so tests can swap it out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowTable {
    /// Day counts for windows 0..=5. Window 6 (Max) is never windowed.
    pub window_days: [i64; 6],
    /// Highest window index still served from the intraday series.
    pub intraday_max_index: usize,
}

impl WindowTable {
    /// Day count for `window`, or `None` for the all-history window.
    pub fn days_for(&self, window: TimeWindow) -> Option<i64> {
        self.window_days.get(window.index()).copied()
    }

    pub fn uses_intraday(&self, window: TimeWindow) -> bool {
        window.index() <= self.intraday_max_index
    }
}

impl Default for WindowTable {
    fn default() -> Self {
        DASHBOARD.windows
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolEntry {
    pub symbol: &'static str,
    pub display_name: &'static str,
}

/// Ordered symbol -> display name map. Order is the dropdown order.
#[derive(Debug, Clone, Copy)]
pub struct SymbolCatalog {
    pub entries: &'static [SymbolEntry],
}

impl SymbolCatalog {
    pub fn symbols(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.symbol)
    }

    pub fn display_name(&self, symbol: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|e| e.symbol == symbol)
            .map(|e| e.display_name)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.display_name(symbol).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Initial control values when the dashboard starts.
#[derive(Debug, Clone, Copy)]
pub struct DashboardDefaults {
    pub symbol: &'static str,
    pub window_index: i64,
    pub field: OhlcField,
}

/// The Master Dashboard Configuration
#[derive(Debug, Clone, Copy)]
pub struct DashboardConfig {
    pub title: &'static str,
    pub windows: WindowTable,
    pub catalog: SymbolCatalog,
    pub defaults: DashboardDefaults,
}

pub const DASHBOARD: DashboardConfig = DashboardConfig {
    title: "Stocky dashboard",

    windows: WindowTable {
        // 1 day, 1 week, 1 month, 3 months, 1 year, 5 years
        window_days: [1, 7, 30, 90, 365, 365 * 5],
        intraday_max_index: 2,
    },

    catalog: SymbolCatalog {
        entries: &[
            SymbolEntry { symbol: "AAPL", display_name: "Apple" },
            SymbolEntry { symbol: "NVDA", display_name: "Nvidia" },
            SymbolEntry { symbol: "TSLA", display_name: "Tesla" },
            SymbolEntry { symbol: "IBM", display_name: "IBM" },
        ],
    },

    defaults: DashboardDefaults {
        symbol: "AAPL",
        window_index: 2,
        field: OhlcField::Close,
    },
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_matches_slider_marks() {
        let table = WindowTable::default();
        assert_eq!(table.days_for(TimeWindow::OneDay), Some(1));
        assert_eq!(table.days_for(TimeWindow::OneMonth), Some(30));
        assert_eq!(table.days_for(TimeWindow::FiveYears), Some(1825));
        assert_eq!(table.days_for(TimeWindow::Max), None);
    }

    #[test]
    fn intraday_boundary_is_one_month() {
        let table = WindowTable::default();
        assert!(table.uses_intraday(TimeWindow::OneMonth));
        assert!(!table.uses_intraday(TimeWindow::ThreeMonths));
        assert!(!table.uses_intraday(TimeWindow::Max));
    }

    #[test]
    fn catalog_lookup() {
        let catalog = DASHBOARD.catalog;
        assert_eq!(catalog.display_name("NVDA"), Some("Nvidia"));
        assert_eq!(catalog.display_name("MSFT"), None);
        assert_eq!(catalog.symbols().collect::<Vec<_>>(), ["AAPL", "NVDA", "TSLA", "IBM"]);
    }
}
