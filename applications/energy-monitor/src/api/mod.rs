pub mod client;
pub mod energy;

pub use client::{ApiClient, ApiError};
