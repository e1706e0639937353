use clap::Parser;

use crate::models::Granularity;
use crate::summary::Locale;

#[derive(Parser, Debug, Clone)]
#[command(name = "energy-monitor")]
#[command(author, version, about = "Terminal dashboard for hourly and daily energy usage")]
pub struct Args {
    /// Base URL of the energy usage API
    #[arg(long, env = "ENERGY_API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// Tab shown on start
    #[arg(long, value_enum, default_value_t = Granularity::Day)]
    pub view: Granularity,

    /// IANA timezone used for axis labels
    #[arg(long, env = "ENERGY_TIMEZONE", default_value = "Europe/Warsaw")]
    pub timezone: String,

    /// Month names in daily labels
    #[arg(long, value_enum, default_value_t = Locale::Pl)]
    pub locale: Locale,

    /// Currency shown next to prices and costs
    #[arg(long, default_value = "PLN")]
    pub currency: String,

    /// Refetch the active tab every N seconds
    #[arg(long)]
    pub refresh_secs: Option<u64>,

    /// Render the selected view once and exit
    #[arg(long)]
    pub once: bool,
}

/// A line typed on stdin while the dashboard runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show(Granularity),
    Refresh,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_lowercase().as_str() {
            "d" | "day" => Some(Command::Show(Granularity::Day)),
            "m" | "month" => Some(Command::Show(Granularity::Month)),
            "r" | "refresh" => Some(Command::Refresh),
            "q" | "quit" | "exit" => Some(Command::Quit),
            _ => None,
        }
    }
}
