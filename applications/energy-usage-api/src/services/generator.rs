use chrono::{
    DateTime, Datelike, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Utc,
};
use chrono_tz::Tz;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::error::{AppError, Result};
use crate::models::{EnergyReading, Granularity};

const HOURS_PER_DAY: u32 = 24;
const MONTHLY_READING_HOUR: i64 = 12;

/// Half-open interval `[min, max)` that values are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Inclusive on both ends, since rounding can land exactly on `max`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        round2(rng.gen_range(self.min..self.max))
    }
}

/// Consumption and price bounds for one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesProfile {
    pub consumption: ValueRange,
    pub price: ValueRange,
}

impl SeriesProfile {
    pub const HOURLY: SeriesProfile = SeriesProfile {
        consumption: ValueRange::new(0.5, 2.5),
        price: ValueRange::new(1.11, 1.21),
    };

    pub const DAILY: SeriesProfile = SeriesProfile {
        consumption: ValueRange::new(8.0, 35.0),
        price: ValueRange::new(1.11, 1.21),
    };

    fn reading<R: Rng>(&self, timestamp: DateTime<FixedOffset>, rng: &mut R) -> EnergyReading {
        EnergyReading {
            timestamp,
            consumption: self.consumption.sample(rng),
            price: self.price.sample(rng),
        }
    }
}

/// Builds mock reading series anchored to a calendar in a fixed timezone.
///
/// The generator holds no clock and no random source of its own: callers
/// pass the current instant and an [`Rng`], which keeps every call pure with
/// respect to its inputs.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    timezone: Tz,
    day: SeriesProfile,
    month: SeriesProfile,
}

impl Default for SeriesGenerator {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Warsaw)
    }
}

impl SeriesGenerator {
    pub fn new(timezone: Tz) -> Self {
        Self {
            timezone,
            day: SeriesProfile::HOURLY,
            month: SeriesProfile::DAILY,
        }
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let timezone = parse_timezone(&config.timezone)?;
        Ok(Self {
            timezone,
            day: config.day,
            month: config.month,
        })
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Parses `selector` and generates the matching series.
    pub fn generate_for<R: Rng>(
        &self,
        selector: &str,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<Vec<EnergyReading>> {
        let granularity = selector.parse::<Granularity>()?;
        Ok(self.generate(granularity, now, rng))
    }

    pub fn generate<R: Rng>(
        &self,
        granularity: Granularity,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Vec<EnergyReading> {
        let today = now.with_timezone(&self.timezone).date_naive();
        match granularity {
            Granularity::Day => self.hourly(today, rng),
            Granularity::Month => self.daily(today, rng),
        }
    }

    fn hourly<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> Vec<EnergyReading> {
        let midnight = today.and_time(NaiveTime::default());
        (0..HOURS_PER_DAY)
            .map(|hour| {
                let wall = midnight + Duration::hours(i64::from(hour));
                self.day.reading(self.resolve_local(wall), rng)
            })
            .collect()
    }

    fn daily<R: Rng>(&self, today: NaiveDate, rng: &mut R) -> Vec<EnergyReading> {
        (1..=today.day())
            .filter_map(|day| today.with_day(day))
            .map(|date| {
                let wall = date.and_time(NaiveTime::default()) + Duration::hours(MONTHLY_READING_HOUR);
                self.month.reading(self.resolve_local(wall), rng)
            })
            .collect()
    }

    /// Maps a wall-clock time in the generator's zone to an absolute instant.
    ///
    /// Ambiguous times (clocks going back) take the earlier instant. Times
    /// skipped by a forward jump keep their wall-clock reading and carry the
    /// offset that was in force before the jump.
    fn resolve_local(&self, wall: NaiveDateTime) -> DateTime<FixedOffset> {
        match self.timezone.from_local_datetime(&wall) {
            LocalResult::Single(dt) => dt.with_timezone(&dt.offset().fix()),
            LocalResult::Ambiguous(earliest, _) => {
                earliest.with_timezone(&earliest.offset().fix())
            }
            LocalResult::None => {
                let offset = self
                    .timezone
                    .offset_from_utc_datetime(&(wall - Duration::days(1)))
                    .fix();
                let utc = wall - Duration::seconds(i64::from(offset.local_minus_utc()));
                DateTime::from_naive_utc_and_offset(utc, offset)
            }
        }
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| AppError::Config(format!("unknown timezone '{}': {}", name, e)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
