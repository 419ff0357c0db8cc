pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Yaml => json::print_yaml(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Keys holding the main tabular payload, in priority order.
pub(crate) const PRIMARY_TABLE_KEYS: [&str; 3] = ["rows", "comparison", "summaries"];

/// Locate the main array of row objects in a result envelope.
pub(crate) fn primary_rows(result: &Value) -> Option<&Vec<Value>> {
    let map = result.as_object()?;
    PRIMARY_TABLE_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_array))
}
