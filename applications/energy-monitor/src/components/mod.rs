pub mod dashboard;
pub mod energy_chart;
pub mod summary_cards;

use chrono_tz::Tz;

use crate::summary::Locale;

pub use dashboard::render_dashboard;
pub use energy_chart::render_chart;
pub use summary_cards::render_summary_cards;

/// Presentation settings shared by all components
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub timezone: Tz,
    pub locale: Locale,
    pub currency: String,
    /// Width of the longest bar, in characters
    pub bar_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Warsaw,
            locale: Locale::Pl,
            currency: "PLN".to_string(),
            bar_width: 40,
        }
    }
}
