use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::models::EnergyReading;
use crate::services::clock::Clock;
use crate::services::generator::SeriesGenerator;

/// Request-facing wrapper around [`SeriesGenerator`] that supplies the
/// current time and a thread-local random source.
#[derive(Clone)]
pub struct EnergyUsageService {
    generator: Arc<SeriesGenerator>,
    clock: Arc<dyn Clock>,
}

impl EnergyUsageService {
    pub fn new(generator: SeriesGenerator, clock: Arc<dyn Clock>) -> Self {
        Self {
            generator: Arc::new(generator),
            clock,
        }
    }

    /// Series for a raw path selector such as `day` or `month`.
    pub fn usage(&self, selector: &str) -> Result<Vec<EnergyReading>> {
        let now = self.clock.now();
        let readings = self
            .generator
            .generate_for(selector, now, &mut rand::thread_rng())?;

        debug!(
            granularity = selector,
            count = readings.len(),
            timezone = %self.generator.timezone(),
            "Generated energy usage series"
        );

        Ok(readings)
    }
}
