use std::io::{self, Write};

use itertools::Itertools;

use crate::analysis::NullCount;
use crate::config::SymbolCatalog;
use crate::data::QuoteStore;
use crate::engine::DashboardEngine;
use crate::models::{Granularity, format_one_decimal};
use crate::ui::{ChartView, SummaryLabels};
use crate::utils::TimeUtils;
use crate::utils::maths_utils::scale_to_width;

/// Tallest bar / widest bar in the missing-value chart, in characters.
const NULL_CHART_SIZE: usize = 40;
const NULL_CHART_HEIGHT: usize = 10;

/// Which axis the missing-value bars sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BarOrientation {
    /// Column names along the x axis, bars grow upward
    #[default]
    Vertical,
    /// Column names down the y axis, bars grow rightward
    Horizontal,
}

pub fn render_selection(
    out: &mut impl Write,
    chart: &ChartView,
    labels: &SummaryLabels,
    granularity: Granularity,
    max_rows: usize,
) -> io::Result<()> {
    writeln!(
        out,
        "{} | {} | {} ({} points)",
        chart.title,
        chart.y_label,
        chart.window_label,
        chart.points.len()
    )?;
    writeln!(out, "Highest value  {}", labels.highest)?;
    writeln!(out, "Lowest value   {}", labels.lowest)?;

    if max_rows == 0 {
        return Ok(());
    }
    writeln!(out)?;

    // Head and tail of the series, elided in the middle
    let n = chart.points.len();
    let head = max_rows.div_ceil(2).min(n);
    let tail = (max_rows / 2).min(n - head);
    for (i, point) in chart.points.iter().enumerate() {
        if i == head && n > head + tail {
            writeln!(out, "  ... {} more", n - head - tail)?;
        }
        if i < head || i >= n - tail {
            writeln!(
                out,
                "  {:<19}  {:>10}",
                TimeUtils::format_timestamp(point.x, granularity),
                format_one_decimal(point.y)
            )?;
        }
    }
    Ok(())
}

/// Render whatever the engine currently shows, or why it shows nothing.
pub fn render_view(out: &mut impl Write, engine: &DashboardEngine, max_rows: usize) -> io::Result<()> {
    let view = engine.view();
    if let Some(error) = &view.last_error {
        writeln!(out, "! {}", error)?;
    }
    match &view.result {
        Some(result) => {
            let chart = ChartView::from_result(result, engine.title());
            let labels = SummaryLabels::from(&result.summary);
            render_selection(out, &chart, &labels, result.series.granularity, max_rows)
        }
        None => writeln!(out, "No data"),
    }
}

pub fn render_symbols(
    out: &mut impl Write,
    catalog: &SymbolCatalog,
    store: &QuoteStore,
) -> io::Result<()> {
    for entry in catalog.entries {
        match store.get(entry.symbol) {
            Some(quotes) => writeln!(
                out,
                "{:<6} {:<10} daily {:>6} rows  intraday {:>6} rows",
                entry.symbol,
                entry.display_name,
                quotes.daily.len(),
                quotes.intraday.len()
            )?,
            None => writeln!(out, "{:<6} {:<10} (not loaded)", entry.symbol, entry.display_name)?,
        }
    }
    Ok(())
}

pub fn render_null_chart(
    out: &mut impl Write,
    counts: &[NullCount],
    orientation: BarOrientation,
) -> io::Result<()> {
    writeln!(out, "Null Values")?;
    if counts.is_empty() {
        return writeln!(out, "(no missing values)");
    }
    let max_count = counts.iter().map(|c| c.count).max().unwrap_or(0);

    match orientation {
        BarOrientation::Horizontal => {
            let name_width = counts.iter().map(|c| c.column.len()).max().unwrap_or(0);
            for c in counts {
                let bar = "█".repeat(scale_to_width(c.count, max_count, NULL_CHART_SIZE));
                writeln!(out, "{:>name_width$} | {} {}", c.column, bar, c.count)?;
            }
        }
        BarOrientation::Vertical => {
            let col_width = counts
                .iter()
                .map(|c| c.column.len().max(c.count.to_string().len()))
                .max()
                .unwrap_or(1);
            let heights: Vec<usize> = counts
                .iter()
                .map(|c| scale_to_width(c.count, max_count, NULL_CHART_HEIGHT))
                .collect();

            writeln!(
                out,
                "{}",
                counts
                    .iter()
                    .map(|c| format!("{:^col_width$}", c.count))
                    .join(" ")
            )?;
            for level in (1..=NULL_CHART_HEIGHT).rev() {
                let row = heights
                    .iter()
                    .map(|&h| {
                        let cell = if h >= level { "█" } else { " " };
                        format!("{:^col_width$}", cell)
                    })
                    .join(" ");
                writeln!(out, "{}", row.trim_end())?;
            }
            writeln!(
                out,
                "{}",
                counts
                    .iter()
                    .map(|c| format!("{:^col_width$}", c.column))
                    .join(" ")
            )?;
        }
    }
    Ok(())
}
