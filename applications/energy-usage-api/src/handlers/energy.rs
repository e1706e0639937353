use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::error::Result;
use crate::models::EnergyReading;
use crate::services::EnergyUsageService;

/// `GET /api/energy-usage/{granularity}`
pub async fn get_usage(
    State(service): State<EnergyUsageService>,
    Path(granularity): Path<String>,
) -> Result<Json<Vec<EnergyReading>>> {
    let readings = service.usage(&granularity)?;
    Ok(Json(readings))
}
