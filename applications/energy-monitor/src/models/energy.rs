use chrono::{DateTime, FixedOffset};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Dashboard tab / API path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Month,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Month => "month",
        }
    }

    /// Tab caption
    pub fn tab_title(&self) -> &'static str {
        match self {
            Granularity::Day => "Dzień",
            Granularity::Month => "Miesiąc",
        }
    }

    /// Chart caption
    pub fn chart_title(&self) -> &'static str {
        match self {
            Granularity::Day => "Godzinowe Zużycie Energii",
            Granularity::Month => "Dzienne Zużycie Energii",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Energy reading as served by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyReading {
    pub timestamp: DateTime<FixedOffset>,
    pub consumption: f64,
    pub price: f64,
}

/// Totals shown on the summary cards
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DerivedMetrics {
    pub total_consumption: f64,
    pub average_price: f64,
    pub total_cost: f64,
}

/// One bar of the chart, with its tooltip values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub consumption: f64,
    pub price: f64,
    pub cost: f64,
}
