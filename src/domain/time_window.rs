use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::error::SelectionError;

/// The seven stops of the time slider, in slider order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter,
)]
pub enum TimeWindow {
    OneDay,
    OneWeek,
    OneMonth,
    ThreeMonths,
    OneYear,
    FiveYears,
    Max,
}

impl TimeWindow {
    /// Map a slider position to a window. Anything outside `0..=6` is rejected.
    pub fn from_index(index: i64) -> Result<Self, SelectionError> {
        let window = match index {
            0 => TimeWindow::OneDay,
            1 => TimeWindow::OneWeek,
            2 => TimeWindow::OneMonth,
            3 => TimeWindow::ThreeMonths,
            4 => TimeWindow::OneYear,
            5 => TimeWindow::FiveYears,
            6 => TimeWindow::Max,
            _ => return Err(SelectionError::InvalidGranularity(index)),
        };
        Ok(window)
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::OneDay => "1 day",
            TimeWindow::OneWeek => "1 week",
            TimeWindow::OneMonth => "1 month",
            TimeWindow::ThreeMonths => "3 months",
            TimeWindow::OneYear => "1 year",
            TimeWindow::FiveYears => "5 years",
            TimeWindow::Max => "Max",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}
