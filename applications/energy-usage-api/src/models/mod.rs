pub mod energy;

pub use energy::{EnergyReading, Granularity};
