use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::{SelectionResult, SelectionSummary};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: NaiveDateTime,
    pub y: f64,
}

/// Everything a line chart needs: x = timestamp, y = chosen field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: String,
    pub y_label: &'static str,
    pub window_label: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartView {
    pub fn from_result(result: &SelectionResult, title: &str) -> Self {
        let field = result.field();
        let points = result
            .series
            .quotes()
            .iter()
            .map(|q| ChartPoint {
                x: q.timestamp,
                y: q.get(field),
            })
            .collect();

        Self {
            title: title.to_string(),
            y_label: field.label(),
            window_label: result.window.label(),
            points,
        }
    }
}

/// The two cards next to the chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLabels {
    pub highest: String,
    pub lowest: String,
}

impl From<&SelectionSummary> for SummaryLabels {
    fn from(summary: &SelectionSummary) -> Self {
        Self {
            highest: summary.high_label(),
            lowest: summary.low_label(),
        }
    }
}
