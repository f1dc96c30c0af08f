use comfy_table::{Attribute, Cell, CellAlignment, Table, modifiers, presets};
use fennec_periods::{IntervalFormat, Sequence};

pub fn build_periods_table(sequence: &Sequence, format: &impl IntervalFormat) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table.set_header(vec!["#", "Period", "Duration", "Days"]);
    for (index, period) in sequence.iter().enumerate() {
        let duration = period.duration();
        table.add_row(vec![
            Cell::new(index).add_attribute(Attribute::Dim),
            Cell::new(format.format(*period)),
            Cell::new(duration).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", duration.as_days_f64()))
                .set_alignment(CellAlignment::Right)
                .add_attribute(Attribute::Dim),
        ]);
    }
    table
}
