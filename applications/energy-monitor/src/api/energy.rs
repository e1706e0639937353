use super::client::{ApiClient, ApiError};
use crate::models::{EnergyReading, Granularity};

impl ApiClient {
    /// Fetch the mock series for one granularity
    pub async fn get_energy_usage(
        &self,
        granularity: Granularity,
    ) -> Result<Vec<EnergyReading>, ApiError> {
        self.get(&format!("/api/energy-usage/{}", granularity)).await
    }
}
