use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

use crate::error::SelectionError;

/// The four price fields a user can chart.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    EnumString,
    Display,
    AsRefStr,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum OhlcField {
    Open,
    High,
    Low,
    #[default]
    Close,
}

impl OhlcField {
    /// Parse a field name such as `"close"` or `"High"`.
    pub fn parse(name: &str) -> Result<Self, SelectionError> {
        name.trim()
            .parse()
            .map_err(|_| SelectionError::InvalidField(name.to_string()))
    }

    /// Capitalized label for radio buttons and chart axes.
    pub fn label(self) -> &'static str {
        match self {
            OhlcField::Open => "Open",
            OhlcField::High => "High",
            OhlcField::Low => "Low",
            OhlcField::Close => "Close",
        }
    }
}
