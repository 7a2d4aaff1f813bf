use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::OhlcField;

/// One price observation. Daily rows carry a midnight timestamp.
/// A price missing from the source file is NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub timestamp: NaiveDateTime,
    #[serde(deserialize_with = "price_or_nan")]
    pub open: f64,
    #[serde(deserialize_with = "price_or_nan")]
    pub high: f64,
    #[serde(deserialize_with = "price_or_nan")]
    pub low: f64,
    #[serde(deserialize_with = "price_or_nan")]
    pub close: f64,
    // Carried through from the source files, never used downstream
    pub volume: Option<f64>,
}

// serde_json writes NaN as `null`; read it back as NaN. Binary formats store the raw f64.
fn price_or_nan<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    if deserializer.is_human_readable() {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    } else {
        f64::deserialize(deserializer)
    }
}

impl Quote {
    pub fn new(timestamp: NaiveDateTime, open: f64, high: f64, low: f64, close: f64) -> Self {
        Quote {
            timestamp,
            open,
            high,
            low,
            close,
            volume: None,
        }
    }

    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = Some(volume);
        self
    }

    /// Calendar date of the observation (time of day dropped).
    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn get(&self, field: OhlcField) -> f64 {
        match field {
            OhlcField::Open => self.open,
            OhlcField::High => self.high,
            OhlcField::Low => self.low,
            OhlcField::Close => self.close,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn quote(close: f64) -> Quote {
        let ts = NaiveDate::from_ymd_opt(2023, 1, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        Quote::new(ts, 1.0, 2.0, 0.5, close)
    }

    #[test]
    fn missing_price_survives_json() {
        let json = serde_json::to_string(&quote(f64::NAN)).unwrap();
        assert!(json.contains("\"close\":null"), "{json}");
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert!(back.close.is_nan());
        assert_eq!(back.high, 2.0);
    }

    #[test]
    fn missing_price_survives_bincode() {
        let bytes = bincode::serialize(&quote(f64::NAN)).unwrap();
        let back: Quote = bincode::deserialize(&bytes).unwrap();
        assert!(back.close.is_nan());
        assert_eq!(back.open, 1.0);
    }
}
