use comfy_table::{presets::UTF8_FULL, Attribute, Cell, Table};

use super::RenderOptions;
use crate::models::DerivedMetrics;

/// Three summary cards: total consumption, average price and total cost.
pub fn render_summary_cards(metrics: &DerivedMetrics, options: &RenderOptions) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        Cell::new("Całkowite Zużycie").add_attribute(Attribute::Bold),
        Cell::new("Średnia Cena").add_attribute(Attribute::Bold),
        Cell::new("Całkowity Koszt").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![
        Cell::new(format!("{:.2} kWh", metrics.total_consumption)),
        Cell::new(format!("{:.2} {}/kWh", metrics.average_price, options.currency)),
        Cell::new(format!("{:.2} {}", metrics.total_cost, options.currency)),
    ]);

    table.to_string()
}
