use std::sync::Arc;

use crate::analysis::QuoteSelector;
#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{DashboardDefaults, SymbolCatalog};
use crate::domain::{OhlcField, TimeWindow};
use crate::error::SelectionError;
use crate::models::SelectionResult;

use super::messages::ControlEvent;
use super::state::{Controls, FilteredSlice, ViewState};

/// Reactive wiring between the three controls and the selector.
///
/// Symbol and window changes recompute the filtered slice; a field change
/// reuses it and only recomputes the summary. Every event does at most one
/// computation and its result replaces whatever was shown before.
pub struct DashboardEngine {
    selector: QuoteSelector,
    catalog: SymbolCatalog,

    /// The Live Control State
    controls: Controls,

    /// Cached slice for the current symbol + window
    filtered: Option<FilteredSlice>,

    view: ViewState,

    // Telemetry: how many times the slice was recomputed
    filter_runs: usize,
}

impl DashboardEngine {
    /// Build the engine and compute the initial view from `defaults`.
    pub fn new(
        selector: QuoteSelector,
        catalog: SymbolCatalog,
        defaults: DashboardDefaults,
    ) -> Result<Self, SelectionError> {
        let controls = Controls {
            symbol: defaults.symbol.to_string(),
            window: TimeWindow::from_index(defaults.window_index)?,
            field: defaults.field,
        };

        let mut engine = Self {
            selector,
            catalog,
            controls,
            filtered: None,
            view: ViewState::default(),
            filter_runs: 0,
        };
        engine.refilter();
        Ok(engine)
    }

    /// Apply one control event and return the refreshed view.
    pub fn handle(&mut self, event: ControlEvent) -> &ViewState {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_engine_events {
            log::info!("Control event: {:?}", event);
        }

        let outcome = match &event {
            ControlEvent::SymbolChanged(symbol) => self.set_symbol(symbol),
            ControlEvent::WindowChanged(index) => self.set_window(*index),
            ControlEvent::FieldChanged(name) => self.set_field(name),
        };

        match outcome {
            Err(e) => {
                log::warn!("Rejected {:?}: {}", event, e);
                self.view.reject(e);
            }
            Ok(false) => {} // Same value as before, nothing to do
            Ok(true) if event.needs_refilter() => self.refilter(),
            Ok(true) => self.resummarize(),
        }

        &self.view
    }

    // --- CONTROL UPDATES ---
    // Each returns Ok(true) if the control actually changed.

    fn set_symbol(&mut self, symbol: &str) -> Result<bool, SelectionError> {
        if !self.selector.store().contains(symbol) {
            return Err(SelectionError::UnknownSymbol(symbol.to_string()));
        }
        let changed = self.controls.symbol != symbol;
        self.controls.symbol = symbol.to_string();
        Ok(changed)
    }

    fn set_window(&mut self, index: i64) -> Result<bool, SelectionError> {
        let window = TimeWindow::from_index(index)?;
        let changed = self.controls.window != window;
        self.controls.window = window;
        Ok(changed)
    }

    fn set_field(&mut self, name: &str) -> Result<bool, SelectionError> {
        let field = OhlcField::parse(name)?;
        let changed = self.controls.field != field;
        self.controls.field = field;
        Ok(changed)
    }

    // --- INTERNAL LOGIC ---

    fn refilter(&mut self) {
        let Controls { symbol, window, .. } = &self.controls;
        self.filter_runs += 1;

        match self.selector.select_window(symbol, *window) {
            Ok(series) => {
                self.filtered = Some(FilteredSlice {
                    symbol: symbol.clone(),
                    window: *window,
                    series: Arc::new(series),
                });
                self.resummarize();
            }
            Err(e) => {
                log::error!("Filtering failed for {} / {}: {}", symbol, window, e);
                self.filtered = None;
                self.view.clear_with_error(e);
            }
        }
    }

    fn resummarize(&mut self) {
        // A failed refilter has already recorded its error
        let Some(slice) = &self.filtered else {
            return;
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_engine_events {
            log::info!(
                "Summary for {} / {} on cached slice ({} rows)",
                slice.symbol,
                slice.window,
                slice.series.len()
            );
        }

        match QuoteSelector::summarize(&slice.series, slice.window, self.controls.field) {
            Ok(summary) => self.view.update_buffer(SelectionResult {
                symbol: slice.symbol.clone(),
                window: slice.window,
                series: Arc::clone(&slice.series),
                summary,
            }),
            Err(e) => self.view.clear_with_error(e),
        }
    }

    // --- ACCESSORS ---

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }

    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// Chart title: display name of the current symbol, or the symbol itself.
    pub fn title(&self) -> &str {
        self.catalog
            .display_name(&self.controls.symbol)
            .unwrap_or(self.controls.symbol.as_str())
    }

    /// JSON payload of the cached slice, if there is one.
    pub fn filtered_json(&self) -> Option<serde_json::Result<String>> {
        self.filtered.as_ref().map(|slice| slice.series.to_json())
    }

    pub fn filter_runs(&self) -> usize {
        self.filter_runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DASHBOARD, WindowTable};
    use crate::data::QuoteStore;
    use crate::domain::Quote;
    use crate::models::{Granularity, QuoteSeries, SymbolQuotes};
    use chrono::{Days, NaiveDate};

    fn series(symbol: &str, granularity: Granularity, days: u64, base: f64) -> QuoteSeries {
        let last = NaiveDate::from_ymd_opt(2023, 1, 31).unwrap();
        let quotes = (0..days)
            .map(|back| {
                let ts = (last - Days::new(back)).and_hms_opt(12, 0, 0).unwrap();
                let px = base + back as f64;
                Quote::new(ts, px, px + 2.0, px - 2.0, px + 1.0)
            })
            .collect();
        QuoteSeries::new(symbol, granularity, quotes)
    }

    fn engine() -> DashboardEngine {
        let mut store = QuoteStore::new("test");
        for (symbol, base) in [("AAPL", 100.0), ("NVDA", 200.0)] {
            store.insert(
                symbol,
                SymbolQuotes {
                    daily: series(symbol, Granularity::Daily, 400, base),
                    intraday: series(symbol, Granularity::Intraday, 40, base + 0.5),
                },
            );
        }
        store.insert(
            "IBM",
            SymbolQuotes {
                daily: QuoteSeries::empty("IBM", Granularity::Daily),
                intraday: QuoteSeries::empty("IBM", Granularity::Intraday),
            },
        );
        let selector = QuoteSelector::new(Arc::new(store), WindowTable::default());
        DashboardEngine::new(selector, DASHBOARD.catalog, DASHBOARD.defaults).unwrap()
    }

    #[test]
    fn starts_with_default_controls() {
        let engine = engine();
        let result = engine.view().result.clone().unwrap();
        assert_eq!(result.symbol, "AAPL");
        assert_eq!(result.window, TimeWindow::OneMonth);
        assert_eq!(result.field(), OhlcField::Close);
        assert_eq!(result.series.granularity, Granularity::Intraday);
        assert_eq!(engine.title(), "Apple");
        assert_eq!(engine.filter_runs(), 1);
    }

    #[test]
    fn field_change_reuses_cached_slice() {
        let mut engine = engine();
        let before = engine.view().result.clone().unwrap();

        let view = engine.handle(ControlEvent::FieldChanged("high".into()));
        let after = view.result.clone().unwrap();

        assert_eq!(engine.filter_runs(), 1);
        assert!(Arc::ptr_eq(&before.series, &after.series));
        assert_eq!(after.field(), OhlcField::High);
        assert_eq!(after.summary.max, before.summary.max + 1.0);
    }

    #[test]
    fn symbol_and_window_changes_refilter() {
        let mut engine = engine();
        engine.handle(ControlEvent::SymbolChanged("NVDA".into()));
        engine.handle(ControlEvent::WindowChanged(4));
        assert_eq!(engine.filter_runs(), 3);

        let result = engine.view().result.clone().unwrap();
        assert_eq!(result.symbol, "NVDA");
        assert_eq!(result.series.granularity, Granularity::Daily);
        assert_eq!(result.series.len(), 366);
        assert_eq!(engine.title(), "Nvidia");
    }

    #[test]
    fn unchanged_value_does_no_work() {
        let mut engine = engine();
        let generation = engine.view().generation;
        engine.handle(ControlEvent::WindowChanged(2));
        engine.handle(ControlEvent::FieldChanged("Close".into()));
        assert_eq!(engine.filter_runs(), 1);
        assert_eq!(engine.view().generation, generation);
    }

    #[test]
    fn invalid_values_are_rejected_and_view_kept() {
        let mut engine = engine();
        let before = engine.view().result.clone();

        let view = engine.handle(ControlEvent::WindowChanged(7));
        assert_eq!(view.last_error, Some(SelectionError::InvalidGranularity(7)));
        assert_eq!(view.result, before);

        engine.handle(ControlEvent::FieldChanged("volume".into()));
        engine.handle(ControlEvent::SymbolChanged("MSFT".into()));
        assert_eq!(
            engine.view().last_error,
            Some(SelectionError::UnknownSymbol("MSFT".into()))
        );
        assert_eq!(engine.controls().window, TimeWindow::OneMonth);
        assert_eq!(engine.controls().symbol, "AAPL");
        assert_eq!(engine.filter_runs(), 1);
    }

    #[test]
    fn empty_series_clears_view_until_next_good_selection() {
        let mut engine = engine();
        engine.handle(ControlEvent::SymbolChanged("IBM".into()));
        assert!(engine.view().result.is_none());
        assert!(matches!(
            engine.view().last_error,
            Some(SelectionError::EmptySeries { .. })
        ));
        assert!(engine.filtered_json().is_none());

        // Field change has no slice to work on
        engine.handle(ControlEvent::FieldChanged("open".into()));
        assert!(engine.view().result.is_none());

        engine.handle(ControlEvent::SymbolChanged("AAPL".into()));
        let result = engine.view().result.clone().unwrap();
        assert_eq!(result.field(), OhlcField::Open);
        assert!(engine.view().last_error.is_none());
    }

    #[test]
    fn filtered_payload_round_trips() {
        let engine = engine();
        let json = engine.filtered_json().unwrap().unwrap();
        let restored = QuoteSeries::from_json(&json).unwrap();
        assert_eq!(&restored, engine.view().result.as_ref().unwrap().series.as_ref());
    }
}
