// Terminal presentation: the chart data, the summary labels, and the event loop
pub mod chart_view;
pub mod interactive;
pub mod ui_render;

// Re-export commonly used items
pub use chart_view::{ChartPoint, ChartView, SummaryLabels};
pub use interactive::run_interactive;
pub use ui_render::BarOrientation;
