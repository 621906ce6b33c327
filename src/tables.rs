use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::{
    core::{PriceSlot, Schedule, Window},
    quantity::KronaPerKilowattHour,
};

#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn build_price_table(slots: &[PriceSlot]) -> Table {
    let average = KronaPerKilowattHour(
        slots.iter().map(|slot| slot.price.0).sum::<f64>() / slots.len().max(1) as f64,
    );

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Start", "End", "SEK/kWh", "EUR/kWh", "EXR"]);
    for slot in slots {
        table.add_row(vec![
            Cell::new(slot.starts_at.format("%H:%M")),
            Cell::new(slot.ends_at.format("%H:%M")).add_attribute(Attribute::Dim),
            Cell::new(format!("{:.4}", slot.price.0))
                .set_alignment(CellAlignment::Right)
                .fg(if slot.price >= average { Color::Red } else { Color::Green }),
            Cell::new(format!("{:.4}", slot.price_eur.0)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", slot.exchange_rate)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

#[must_use]
pub fn build_schedule_table(schedule: &Schedule) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Window", "Start", "End", "Average price"]);
    add_window_row(&mut table, "AM", &schedule.am);
    add_window_row(&mut table, "PM", &schedule.pm);
    table
}

fn add_window_row(table: &mut Table, label: &str, window: &Window) {
    table.add_row(vec![
        Cell::new(label),
        Cell::new(window.starts_at.format("%H:%M")),
        Cell::new(window.ends_at.format("%H:%M")).add_attribute(Attribute::Dim),
        Cell::new(window.average_price().map_or_else(|| "?".to_owned(), |price| price.to_string()))
            .set_alignment(CellAlignment::Right),
    ]);
}
