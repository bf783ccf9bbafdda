//! CLI presentation: text and json formatters for rendered views.

use crate::error::ViewError;
use crate::views::portchannel::{FLAGS_LEGEND, PORTCHANNEL_SCHEMA};
use crate::views::RenderedView;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;

/// Tabular rendering: the key column followed by the schema's columns. The
/// port-channel view is preceded by its flags legend.
pub fn format_view_text(view: &RenderedView) -> String {
    let schema = view.schema();
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec![schema.key_label];
    header.extend(schema.fields.iter().copied());
    table.set_header(header);

    for record in view.records() {
        let mut row = vec![record.key.clone()];
        row.extend(record.values.iter().cloned());
        table.add_row(row);
    }

    if *schema == PORTCHANNEL_SCHEMA {
        format!("{}\n{}", FLAGS_LEGEND, table)
    } else {
        table.to_string()
    }
}

pub fn format_view_json(view: &RenderedView) -> Result<String, ViewError> {
    view.to_json_pretty()
}
