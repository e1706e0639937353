pub mod clock;
pub mod energy;
pub mod generator;

pub use clock::{Clock, FixedClock, SystemClock};
pub use energy::EnergyUsageService;
pub use generator::{SeriesGenerator, SeriesProfile, ValueRange};
