//! Derived metrics and axis labels for a reading series.
//!
//! Everything here is a pure function of its inputs; the randomness lives
//! on the API side.

use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use chrono_tz::Tz;
use clap::ValueEnum;

use crate::models::{ChartPoint, DerivedMetrics, EnergyReading, Granularity};

/// Month abbreviations used for `month` labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Locale {
    #[default]
    Pl,
    En,
}

const MONTHS_PL: [&str; 12] = [
    "sty", "lut", "mar", "kwi", "maj", "cze", "lip", "sie", "wrz", "paź", "lis", "gru",
];
const MONTHS_EN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

impl Locale {
    /// `month` is 1-based, as returned by [`Datelike::month`].
    pub fn month_abbrev(&self, month: u32) -> &'static str {
        let names = match self {
            Locale::Pl => &MONTHS_PL,
            Locale::En => &MONTHS_EN,
        };
        let idx = (month.clamp(1, 12) - 1) as usize;
        names[idx]
    }
}

pub fn compute_totals(series: &[EnergyReading]) -> DerivedMetrics {
    if series.is_empty() {
        return DerivedMetrics::default();
    }

    let total_consumption: f64 = series.iter().map(|r| r.consumption).sum();
    let price_sum: f64 = series.iter().map(|r| r.price).sum();
    let total_cost: f64 = series.iter().map(|r| r.consumption * r.price).sum();

    DerivedMetrics {
        total_consumption,
        average_price: price_sum / series.len() as f64,
        total_cost,
    }
}

/// `HH:MM` for hourly series, `<month> <day>` for daily series, both in `tz`.
pub fn format_label(
    timestamp: &DateTime<FixedOffset>,
    granularity: Granularity,
    tz: &Tz,
    locale: Locale,
) -> String {
    let local = tz.from_utc_datetime(&timestamp.naive_utc());
    match granularity {
        Granularity::Day => local.format("%H:%M").to_string(),
        Granularity::Month => format!("{} {}", locale.month_abbrev(local.month()), local.day()),
    }
}

pub fn build_chart(
    series: &[EnergyReading],
    granularity: Granularity,
    tz: &Tz,
    locale: Locale,
) -> Vec<ChartPoint> {
    series
        .iter()
        .map(|r| ChartPoint {
            label: format_label(&r.timestamp, granularity, tz, locale),
            consumption: r.consumption,
            price: r.price,
            cost: r.consumption * r.price,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WARSAW: Tz = chrono_tz::Europe::Warsaw;

    fn reading(timestamp: &str, consumption: f64, price: f64) -> EnergyReading {
        EnergyReading {
            timestamp: DateTime::parse_from_rfc3339(timestamp).unwrap(),
            consumption,
            price,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_totals_of_empty_series() {
        assert_eq!(
            compute_totals(&[]),
            DerivedMetrics {
                total_consumption: 0.0,
                average_price: 0.0,
                total_cost: 0.0,
            }
        );
    }

    #[test]
    fn test_totals_two_readings() {
        let series = vec![
            reading("2026-10-19T00:00:00+02:00", 1.0, 1.2),
            reading("2026-10-19T01:00:00+02:00", 2.0, 1.1),
        ];
        let totals = compute_totals(&series);

        assert!(approx(totals.total_consumption, 3.0));
        assert!(approx(totals.average_price, 1.15));
        assert!(approx(totals.total_cost, 3.4));
    }

    #[test]
    fn test_totals_are_additive_under_concatenation() {
        let a = vec![
            reading("2026-10-01T12:00:00+02:00", 10.5, 1.12),
            reading("2026-10-02T12:00:00+02:00", 20.25, 1.2),
        ];
        let b = vec![
            reading("2026-10-03T12:00:00+02:00", 8.0, 1.11),
            reading("2026-10-04T12:00:00+02:00", 34.99, 1.21),
            reading("2026-10-05T12:00:00+02:00", 15.0, 1.15),
        ];
        let joined: Vec<_> = a.iter().chain(b.iter()).cloned().collect();

        let (ta, tb, tj) = (compute_totals(&a), compute_totals(&b), compute_totals(&joined));

        assert!(approx(tj.total_consumption, ta.total_consumption + tb.total_consumption));
        assert!(approx(tj.total_cost, ta.total_cost + tb.total_cost));

        let weighted = (ta.average_price * a.len() as f64 + tb.average_price * b.len() as f64)
            / joined.len() as f64;
        assert!(approx(tj.average_price, weighted));
    }

    #[test]
    fn test_day_label_uses_local_time() {
        let ts = DateTime::parse_from_rfc3339("2026-10-18T22:00:00Z").unwrap();
        assert_eq!(format_label(&ts, Granularity::Day, &WARSAW, Locale::Pl), "00:00");

        let ts = DateTime::parse_from_rfc3339("2026-10-19T15:00:00+02:00").unwrap();
        assert_eq!(format_label(&ts, Granularity::Day, &WARSAW, Locale::Pl), "15:00");
    }

    #[test]
    fn test_month_label() {
        let ts = DateTime::parse_from_rfc3339("2026-10-19T12:00:00+02:00").unwrap();
        assert_eq!(format_label(&ts, Granularity::Month, &WARSAW, Locale::Pl), "paź 19");
        assert_eq!(format_label(&ts, Granularity::Month, &WARSAW, Locale::En), "Oct 19");
    }

    #[test]
    fn test_month_label_crosses_date_line_in_utc() {
        // 23:30 UTC on Jan 31 is already Feb 1 in Warsaw
        let ts = DateTime::parse_from_rfc3339("2026-01-31T23:30:00Z").unwrap();
        assert_eq!(format_label(&ts, Granularity::Month, &WARSAW, Locale::En), "Feb 1");
    }

    #[test]
    fn test_format_label_is_idempotent() {
        let ts = DateTime::parse_from_rfc3339("2026-03-29T03:00:00+02:00").unwrap();
        for granularity in [Granularity::Day, Granularity::Month] {
            let first = format_label(&ts, granularity, &WARSAW, Locale::Pl);
            let second = format_label(&ts, granularity, &WARSAW, Locale::Pl);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_build_chart() {
        let series = vec![
            reading("2026-10-19T00:00:00+02:00", 1.0, 1.2),
            reading("2026-10-19T01:00:00+02:00", 2.0, 1.1),
        ];
        let chart = build_chart(&series, Granularity::Day, &WARSAW, Locale::Pl);

        assert_eq!(chart.len(), 2);
        assert_eq!(chart[0].label, "00:00");
        assert_eq!(chart[1].label, "01:00");
        assert!(approx(chart[1].cost, 2.2));
        assert_eq!(chart[1].price, 1.1);
    }

    #[test]
    fn test_month_abbrev_bounds() {
        assert_eq!(Locale::Pl.month_abbrev(1), "sty");
        assert_eq!(Locale::Pl.month_abbrev(12), "gru");
        assert_eq!(Locale::En.month_abbrev(5), "May");
    }
}
