pub mod api;
pub mod app;
pub mod cli;
pub mod components;
pub mod models;
pub mod state;
pub mod summary;

// Re-export commonly used items
pub use api::{ApiClient, ApiError};
pub use cli::{Args, Command};
pub use components::{render_dashboard, RenderOptions};
pub use models::{ChartPoint, DerivedMetrics, EnergyReading, Granularity};
pub use state::{DashboardState, FetchTicket};
pub use summary::{build_chart, compute_totals, format_label, Locale};
