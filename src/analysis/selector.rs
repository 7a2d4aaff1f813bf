//! The time-windowed quote selector.
//!
//! Given a symbol, a slider position and a price field, pick the daily or
//! intraday series, cut it down to the requested number of calendar days
//! ending at the most recent observation, and summarise the chosen field.

use std::sync::Arc;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::WindowTable;
use crate::data::QuoteStore;
use crate::domain::{OhlcField, TimeWindow};
use crate::error::SelectionError;
use crate::models::{Granularity, QuoteSeries, SelectionRequest, SelectionResult, SelectionSummary};

/// Pure and synchronous: the same inputs against the same store always give
/// the same result.
#[derive(Debug, Clone)]
pub struct QuoteSelector {
    store: Arc<QuoteStore>,
    windows: WindowTable,
}

impl QuoteSelector {
    pub fn new(store: Arc<QuoteStore>, windows: WindowTable) -> Self {
        Self { store, windows }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn windows(&self) -> &WindowTable {
        &self.windows
    }

    /// Slice and summarise. Validates granularity, then field, then symbol.
    pub fn select(
        &self,
        symbol: &str,
        granularity_index: i64,
        field: &str,
    ) -> Result<SelectionResult, SelectionError> {
        let window = TimeWindow::from_index(granularity_index)?;
        let field = OhlcField::parse(field)?;

        let series = self.select_window(symbol, window)?;
        let summary = Self::summarize(&series, window, field)?;

        Ok(SelectionResult {
            symbol: symbol.to_string(),
            window,
            series: Arc::new(series),
            summary,
        })
    }

    pub fn select_request(
        &self,
        request: &SelectionRequest,
    ) -> Result<SelectionResult, SelectionError> {
        self.select(&request.symbol, request.window_index, &request.field)
    }

    /// Short windows need the finer sampling; long ones would be needlessly large at it.
    pub fn source_granularity(&self, window: TimeWindow) -> Granularity {
        if self.windows.uses_intraday(window) {
            Granularity::Intraday
        } else {
            Granularity::Daily
        }
    }

    /// The windowed slice alone, independent of any price field.
    pub fn select_window(
        &self,
        symbol: &str,
        window: TimeWindow,
    ) -> Result<QuoteSeries, SelectionError> {
        let quotes = self
            .store
            .get(symbol)
            .ok_or_else(|| SelectionError::UnknownSymbol(symbol.to_string()))?;
        let series = quotes.series(self.source_granularity(window));

        // Max bypasses windowing entirely
        let sliced = match self.windows.days_for(window) {
            Some(days) => series.most_recent_days(days),
            None => series.clone(),
        };

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_selection {
            log::info!(
                "[{}] {} -> {:?} rows {}..={:?} ({} of {})",
                symbol,
                window,
                series.granularity,
                sliced.first_day().map(|d| d.to_string()).unwrap_or_default(),
                sliced.last_day(),
                sliced.len(),
                series.len()
            );
        }

        if sliced.is_empty() {
            return Err(SelectionError::EmptySeries {
                symbol: symbol.to_string(),
                window,
            });
        }
        Ok(sliced)
    }

    /// Max/min of `field` over an already-windowed slice, skipping missing cells.
    pub fn summarize(
        series: &QuoteSeries,
        window: TimeWindow,
        field: OhlcField,
    ) -> Result<SelectionSummary, SelectionError> {
        SelectionSummary::from_series(series, field).ok_or_else(|| SelectionError::EmptySeries {
            symbol: series.symbol.clone(),
            window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Quote;
    use crate::models::SymbolQuotes;
    use chrono::{Days, NaiveDate, NaiveDateTime};
    use strum::IntoEnumIterator;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    // A price that wiggles so max/min aren't simply the ends of the range
    fn price_at(i: u64) -> f64 {
        100.0 + ((i * 37) % 101) as f64 + (i as f64) * 0.01
    }

    /// One row per calendar day in `[from, to]`, written newest-first like the source files.
    fn daily_series(symbol: &str, from: &str, to: &str) -> QuoteSeries {
        let (from, to) = (day(from), day(to));
        let mut quotes = Vec::new();
        let mut i = 0;
        let mut d = from;
        while d <= to {
            let px = price_at(i);
            let ts = d.and_hms_opt(0, 0, 0).unwrap();
            quotes.push(Quote::new(ts, px, px + 1.5, px - 1.5, px + 0.25));
            d = d + Days::new(1);
            i += 1;
        }
        quotes.reverse();
        QuoteSeries::new(symbol, Granularity::Daily, quotes)
    }

    /// `days` days of hourly rows (09:00..=16:00) ending on `last`.
    fn intraday_series(symbol: &str, last: &str, days: u64) -> QuoteSeries {
        let last = day(last);
        let mut quotes = Vec::new();
        let mut i = 0;
        for back in (0..days).rev() {
            let d = last - Days::new(back);
            for hour in 9..=16 {
                let px = price_at(i) + 50.0;
                let ts: NaiveDateTime = d.and_hms_opt(hour, 0, 0).unwrap();
                quotes.push(Quote::new(ts, px, px + 0.5, px - 0.5, px + 0.1));
                i += 1;
            }
        }
        quotes.reverse();
        QuoteSeries::new(symbol, Granularity::Intraday, quotes)
    }

    fn selector() -> QuoteSelector {
        let mut store = QuoteStore::new("test");
        store.insert(
            "AAPL",
            SymbolQuotes {
                daily: daily_series("AAPL", "2019-01-01", "2023-01-01"),
                intraday: intraday_series("AAPL", "2023-01-01", 10),
            },
        );
        store.insert(
            "EMPTY",
            SymbolQuotes {
                daily: QuoteSeries::empty("EMPTY", Granularity::Daily),
                intraday: QuoteSeries::empty("EMPTY", Granularity::Intraday),
            },
        );
        QuoteSelector::new(Arc::new(store), WindowTable::default())
    }

    #[test]
    fn short_windows_use_intraday_long_windows_use_daily() {
        let sel = selector();
        for idx in 0..=6 {
            let result = sel.select("AAPL", idx, "close").unwrap();
            let expected = if idx <= 2 {
                Granularity::Intraday
            } else {
                Granularity::Daily
            };
            assert_eq!(result.series.granularity, expected, "index {idx}");
        }
    }

    #[test]
    fn max_window_returns_whole_sorted_series() {
        let sel = selector();
        let result = sel.select("AAPL", 6, "open").unwrap();
        let full = &sel.store().get("AAPL").unwrap().daily;
        assert_eq!(result.series.as_ref(), full);
        assert_eq!(result.series.first_day(), Some(day("2019-01-01")));
    }

    #[test]
    fn windows_end_on_last_day_and_start_no_earlier_than_cutoff() {
        let sel = selector();
        let days = WindowTable::default().window_days;
        for window in TimeWindow::iter().filter(|w| *w != TimeWindow::Max) {
            let result = sel.select("AAPL", window.index() as i64, "close").unwrap();
            let last_day = day("2023-01-01");
            let cutoff = last_day - Days::new(days[window.index()] as u64);
            assert_eq!(result.series.last_day(), Some(last_day), "{window}");
            assert!(result.series.first_day().unwrap() >= cutoff, "{window}");
        }
    }

    #[test]
    fn one_year_close_over_daily_history() {
        let sel = selector();
        let result = sel.select("AAPL", 4, "close").unwrap();

        let (start, end) = (day("2022-01-01"), day("2023-01-01"));
        let series = &result.series;
        assert_eq!(series.first_day(), Some(start));
        assert_eq!(series.last_day(), Some(end));
        assert_eq!(series.len(), 366);

        let full = &sel.store().get("AAPL").unwrap().daily;
        let in_range: Vec<f64> = full
            .quotes()
            .iter()
            .filter(|q| q.date() >= start && q.date() <= end)
            .map(|q| q.close)
            .collect();
        let true_max = in_range.iter().cloned().fold(f64::MIN, f64::max);
        let true_min = in_range.iter().cloned().fold(f64::MAX, f64::min);
        assert_eq!(result.summary.max, true_max);
        assert_eq!(result.summary.min, true_min);
        assert_eq!(result.summary.field, OhlcField::Close);
    }

    #[test]
    fn short_intraday_history_is_returned_whole_for_a_month() {
        let sel = selector();
        let result = sel.select("AAPL", 2, "high").unwrap();
        let intraday = &sel.store().get("AAPL").unwrap().intraday;
        assert_eq!(result.series.as_ref(), intraday);
        assert_eq!(result.series.len(), 80);
    }

    #[test]
    fn one_day_window_spans_two_calendar_days() {
        let sel = selector();
        let result = sel.select("AAPL", 0, "low").unwrap();
        assert_eq!(result.series.first_day(), Some(day("2022-12-31")));
        assert_eq!(result.series.len(), 16);
    }

    #[test]
    fn repeated_selection_is_identical() {
        let sel = selector();
        let a = sel.select("AAPL", 3, "low").unwrap();
        let b = sel.select("AAPL", 3, "low").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.summary.max.to_bits(), b.summary.max.to_bits());
        assert_eq!(a.summary.min.to_bits(), b.summary.min.to_bits());
    }

    #[test]
    fn unsorted_store_gives_same_slice_as_sorted() {
        let sorted = daily_series("IBM", "2022-06-01", "2022-12-31");
        let mut shuffled: Vec<Quote> = sorted.quotes().to_vec();
        // Deterministic shuffle: interleave halves
        let back = shuffled.split_off(shuffled.len() / 2);
        let mixed: Vec<Quote> = back.into_iter().chain(shuffled).collect();

        let make = |series: QuoteSeries| {
            let mut store = QuoteStore::new("test");
            store.insert(
                "IBM",
                SymbolQuotes {
                    daily: series,
                    intraday: QuoteSeries::empty("IBM", Granularity::Intraday),
                },
            );
            QuoteSelector::new(Arc::new(store), WindowTable::default())
        };
        let a = make(sorted).select("IBM", 3, "close").unwrap();
        let b = make(QuoteSeries::new("IBM", Granularity::Daily, mixed))
            .select("IBM", 3, "close")
            .unwrap();
        assert_eq!(a.series, b.series);
        assert_eq!(a.summary, b.summary);
    }

    #[test]
    fn invalid_inputs_are_typed_errors() {
        let sel = selector();
        assert_eq!(
            sel.select("AAPL", 7, "close"),
            Err(SelectionError::InvalidGranularity(7))
        );
        assert_eq!(
            sel.select("AAPL", -1, "close"),
            Err(SelectionError::InvalidGranularity(-1))
        );
        assert_eq!(
            sel.select("AAPL", 4, "volume"),
            Err(SelectionError::InvalidField("volume".to_string()))
        );
        assert_eq!(
            sel.select("MSFT", 4, "close"),
            Err(SelectionError::UnknownSymbol("MSFT".to_string()))
        );
    }

    #[test]
    fn validation_checks_granularity_before_symbol() {
        let sel = selector();
        assert_eq!(
            sel.select("MSFT", 9, "volume"),
            Err(SelectionError::InvalidGranularity(9))
        );
    }

    #[test]
    fn empty_series_is_reported() {
        let sel = selector();
        assert_eq!(
            sel.select("EMPTY", 6, "close"),
            Err(SelectionError::EmptySeries {
                symbol: "EMPTY".to_string(),
                window: TimeWindow::Max
            })
        );
    }

    #[test]
    fn missing_cells_are_skipped_and_all_missing_is_empty() {
        let at = |d: &str| day(d).and_hms_opt(0, 0, 0).unwrap();
        let quotes = vec![
            Quote::new(at("2023-01-03"), 1.0, 2.0, 0.5, 5.0),
            Quote::new(at("2023-01-04"), 1.0, 2.0, 0.5, f64::NAN),
            Quote::new(at("2023-01-05"), 1.0, 2.0, 0.5, 3.0),
        ];
        let mut store = QuoteStore::new("test");
        store.insert(
            "X",
            SymbolQuotes {
                daily: QuoteSeries::new("X", Granularity::Daily, quotes),
                intraday: QuoteSeries::new(
                    "X",
                    Granularity::Intraday,
                    vec![Quote::new(at("2023-01-05"), 1.0, 2.0, 0.5, f64::NAN)],
                ),
            },
        );
        let sel = QuoteSelector::new(Arc::new(store), WindowTable::default());

        let result = sel.select("X", 6, "close").unwrap();
        assert_eq!(result.series.len(), 3);
        assert_eq!((result.summary.max, result.summary.min), (5.0, 3.0));

        assert_eq!(
            sel.select("X", 0, "close"),
            Err(SelectionError::EmptySeries {
                symbol: "X".to_string(),
                window: TimeWindow::OneDay
            })
        );
        // Other fields of the same rows still have values
        assert!(sel.select("X", 0, "high").is_ok());
    }

    #[test]
    fn custom_window_table_is_honoured() {
        let sel = selector();
        let table = WindowTable {
            window_days: [0, 1, 2, 3, 4, 5],
            intraday_max_index: 0,
        };
        let custom = QuoteSelector::new(Arc::new(sel.store().clone()), table);
        let result = custom.select("AAPL", 1, "close").unwrap();
        assert_eq!(result.series.granularity, Granularity::Daily);
        assert_eq!(result.series.len(), 2);
    }

    #[test]
    fn request_struct_matches_direct_call() {
        let sel = selector();
        let req = SelectionRequest::new("AAPL", 5, "High");
        assert_eq!(sel.select_request(&req), sel.select("AAPL", 5, "high"));
    }
}
