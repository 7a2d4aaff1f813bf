use std::io::{self, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use stock_dash::analysis::count_missing_in_file;
use stock_dash::config::DASHBOARD;
use stock_dash::ui::ui_render::{render_null_chart, render_selection, render_symbols};
use stock_dash::ui::{BarOrientation, ChartView, SummaryLabels, run_interactive};
use stock_dash::{Cli, Command, DashboardEngine, QuoteSelector, load_quote_store};

fn main() -> Result<()> {
    // A. Init Logging
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // B. Parse Args
    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Command::Missing { path, horizontal } = &args.command {
        let counts = count_missing_in_file(path)?;
        let orientation = if *horizontal {
            BarOrientation::Horizontal
        } else {
            BarOrientation::Vertical
        };
        render_null_chart(&mut out, &counts, orientation)?;
        return Ok(());
    }

    // C. Data Loading (Blocking, once)
    let symbols: Vec<&str> = DASHBOARD.catalog.symbols().collect();
    let (store, signature) =
        load_quote_store(&args, &symbols).context("Could not load any quote data")?;
    log::info!("📈 {} symbols ready from {}", store.len(), signature);

    let selector = QuoteSelector::new(Arc::new(store), DASHBOARD.windows);

    // D. Dispatch
    match args.command {
        Command::Show {
            symbol,
            window,
            field,
            json,
            rows,
        } => {
            let result = selector.select(&symbol, window, &field)?;
            if json {
                writeln!(out, "{}", result.series.to_json()?)?;
            } else {
                let title = DASHBOARD.catalog.display_name(&symbol).unwrap_or(symbol.as_str());
                let chart = ChartView::from_result(&result, title);
                let labels = SummaryLabels::from(&result.summary);
                render_selection(&mut out, &chart, &labels, result.series.granularity, rows)?;
            }
        }
        Command::Symbols => render_symbols(&mut out, &DASHBOARD.catalog, selector.store())?,
        Command::Interactive => {
            let mut engine =
                DashboardEngine::new(selector, DASHBOARD.catalog, DASHBOARD.defaults)?;
            run_interactive(&mut engine, io::stdin().lock(), out)?;
        }
        Command::Missing { .. } => {} // Handled above
    }

    Ok(())
}
