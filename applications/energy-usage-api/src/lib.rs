pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
pub use models::{EnergyReading, Granularity};
pub use routes::create_router;
pub use services::{EnergyUsageService, SeriesGenerator};
