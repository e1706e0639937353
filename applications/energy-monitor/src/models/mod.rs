pub mod energy;

pub use energy::{ChartPoint, DerivedMetrics, EnergyReading, Granularity};
