pub mod core;
pub mod messages;
pub mod state;

// Re-export key components
pub use core::DashboardEngine;
pub use messages::ControlEvent;
pub use state::{Controls, ViewState};
