use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Resolution of a generated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One reading per hour of the current local day
    Day,
    /// One reading per day of the current local month, up to today
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Granularity::Day),
            "month" => Ok(Granularity::Month),
            other => Err(AppError::InvalidGranularity(other.to_string())),
        }
    }
}

/// A single synthetic reading.
///
/// `timestamp` keeps the UTC offset of the zone it was generated in, so it
/// serializes as e.g. `2026-10-19T12:00:00+02:00`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub timestamp: DateTime<FixedOffset>,
    /// kWh
    pub consumption: f64,
    /// Currency per kWh
    pub price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("day".parse::<Granularity>().unwrap(), Granularity::Day);
        assert_eq!("month".parse::<Granularity>().unwrap(), Granularity::Month);
    }

    #[test]
    fn test_granularity_rejects_unknown_selectors() {
        for selector in ["week", "Day", "", "months", " day"] {
            let err = selector.parse::<Granularity>().unwrap_err();
            assert!(
                matches!(err, AppError::InvalidGranularity(ref s) if s == selector),
                "unexpected error for {:?}: {}",
                selector,
                err
            );
        }
    }

    #[test]
    fn test_granularity_display_matches_path_segment() {
        assert_eq!(Granularity::Day.to_string(), "day");
        assert_eq!(Granularity::Month.to_string(), "month");
        assert_eq!(serde_json::to_string(&Granularity::Month).unwrap(), "\"month\"");
    }

    #[test]
    fn test_reading_serialization_shape() {
        let reading = EnergyReading {
            timestamp: DateTime::parse_from_rfc3339("2026-10-19T12:00:00+02:00").unwrap(),
            consumption: 12.34,
            price: 1.15,
        };

        let value = serde_json::to_value(&reading).unwrap();
        assert_eq!(value["timestamp"], "2026-10-19T12:00:00+02:00");
        assert_eq!(value["consumption"], 12.34);
        assert_eq!(value["price"], 1.15);
        assert_eq!(value.as_object().unwrap().len(), 3);
    }

    #[test]
    fn test_reading_accepts_utc_timestamps() {
        let json = r#"{"timestamp":"2026-10-19T10:00:00.000Z","consumption":1.5,"price":1.2}"#;
        let reading: EnergyReading = serde_json::from_str(json).unwrap();

        assert_eq!(reading.timestamp.offset().local_minus_utc(), 0);
        assert_eq!(reading.consumption, 1.5);
    }
}
