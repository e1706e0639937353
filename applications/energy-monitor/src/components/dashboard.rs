use super::{render_chart, render_summary_cards, RenderOptions};
use crate::models::Granularity;
use crate::state::DashboardState;
use crate::summary::{build_chart, compute_totals};

const TITLE: &str = "Monitor Zużycia Energii";

/// Full dashboard: title, summary cards, tab bar, then either the loading
/// marker or the chart for the data on display.
pub fn render_dashboard(state: &DashboardState, options: &RenderOptions) -> String {
    let (data, data_granularity) = state.data();
    let metrics = compute_totals(data);

    let mut out = String::new();
    out.push_str(TITLE);
    out.push_str("\n\n");
    out.push_str(&render_summary_cards(&metrics, options));
    out.push_str("\n\n");
    out.push_str(&render_tabs(state.active_tab()));
    out.push_str("\n\n");
    out.push_str(state.active_tab().chart_title());
    out.push('\n');

    if state.is_loading() {
        out.push_str("Ładowanie...\n");
    } else {
        let points = build_chart(data, data_granularity, &options.timezone, options.locale);
        out.push_str(&render_chart(&points, options));
        out.push('\n');
    }

    if let Some(err) = state.last_error() {
        out.push_str(&format!("\n! {}\n", err));
    }

    out.push_str("\n[d] dzień  [m] miesiąc  [r] odśwież  [q] wyjście\n");
    out
}

fn render_tabs(active: Granularity) -> String {
    [Granularity::Day, Granularity::Month]
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[ {} ]", tab.tab_title())
            } else {
                format!("  {}  ", tab.tab_title())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;
    use crate::models::EnergyReading;
    use chrono::DateTime;

    fn day_readings() -> Vec<EnergyReading> {
        vec![
            EnergyReading {
                timestamp: DateTime::parse_from_rfc3339("2026-10-19T00:00:00+02:00").unwrap(),
                consumption: 1.0,
                price: 1.2,
            },
            EnergyReading {
                timestamp: DateTime::parse_from_rfc3339("2026-10-19T01:00:00+02:00").unwrap(),
                consumption: 2.0,
                price: 1.1,
            },
        ]
    }

    #[test]
    fn test_tabs_mark_active() {
        assert_eq!(render_tabs(Granularity::Day), "[ Dzień ]   Miesiąc  ");
        assert_eq!(render_tabs(Granularity::Month), "  Dzień   [ Miesiąc ]");
    }

    #[test]
    fn test_loading_state() {
        let mut state = DashboardState::new(Granularity::Day);
        state.refresh();
        let out = render_dashboard(&state, &RenderOptions::default());

        assert!(out.contains("Ładowanie..."));
        assert!(out.contains("Godzinowe Zużycie Energii"));
    }

    #[test]
    fn test_loaded_state() {
        let mut state = DashboardState::new(Granularity::Day);
        let ticket = state.refresh();
        state.apply(ticket, Ok(day_readings()));
        let out = render_dashboard(&state, &RenderOptions::default());

        assert!(!out.contains("Ładowanie..."));
        assert!(out.contains("3.00 kWh"));
        assert!(out.contains("1.15 PLN/kWh"));
        assert!(out.contains("3.40 PLN"));
        assert!(out.contains("00:00 │"));
        assert!(out.contains("01:00 │"));
    }

    #[test]
    fn test_error_is_shown_alongside_stale_data() {
        let mut state = DashboardState::new(Granularity::Day);
        let ticket = state.refresh();
        state.apply(ticket, Ok(day_readings()));
        let ticket = state.select(Granularity::Month);
        state.apply(ticket, Err(ApiError::Network("connection refused".into())));

        let out = render_dashboard(&state, &RenderOptions::default());
        assert!(out.contains("[ Miesiąc ]"));
        assert!(out.contains("Dzienne Zużycie Energii"));
        // stale hourly data keeps its hourly labels
        assert!(out.contains("00:00 │"));
        assert!(out.contains("Network error: connection refused"));
    }
}
