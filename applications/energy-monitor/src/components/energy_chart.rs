use comfy_table::{presets::UTF8_HORIZONTAL_ONLY, Attribute, Cell, CellAlignment, Table};

use super::RenderOptions;
use crate::models::ChartPoint;

const BAR: char = '█';

/// Horizontal bar chart of consumption, followed by the per-bar tooltip
/// values (consumption, price, cost).
pub fn render_chart(points: &[ChartPoint], options: &RenderOptions) -> String {
    let mut out = String::new();
    if points.is_empty() {
        out.push_str("Brak danych\n");
        return out;
    }

    let label_width = points
        .iter()
        .map(|p| p.label.chars().count())
        .max()
        .unwrap_or(0);
    let max = points.iter().map(|p| p.consumption).fold(0.0_f64, f64::max);

    for point in points {
        let bar: String = std::iter::repeat(BAR)
            .take(bar_len(point.consumption, max, options.bar_width))
            .collect();
        let padding = label_width - point.label.chars().count();
        out.push_str(&format!(
            "{}{} │{} {:.2}\n",
            " ".repeat(padding),
            point.label,
            bar,
            point.consumption
        ));
    }
    out.push_str(&format!("{} └ kWh\n", " ".repeat(label_width)));

    out.push('\n');
    out.push_str(&render_tooltips(points, options));
    out
}

fn bar_len(value: f64, max: f64, width: usize) -> usize {
    if max <= 0.0 || value <= 0.0 {
        return 0;
    }
    ((value / max) * width as f64).round() as usize
}

fn render_tooltips(points: &[ChartPoint], options: &RenderOptions) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_HORIZONTAL_ONLY);
    table.set_header(vec![
        Cell::new("").add_attribute(Attribute::Bold),
        Cell::new("Zużycie").add_attribute(Attribute::Bold),
        Cell::new("Cena").add_attribute(Attribute::Bold),
        Cell::new("Koszt").add_attribute(Attribute::Bold),
    ]);

    for point in points {
        table.add_row(vec![
            Cell::new(&point.label),
            Cell::new(format!("{:.1} kWh", point.consumption)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2} {}/kWh", point.price, options.currency))
                .set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2} {}", point.cost, options.currency))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table.to_string()
}
