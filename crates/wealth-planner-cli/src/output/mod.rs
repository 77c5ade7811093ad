pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch a computation envelope to the selected formatter.
///
/// Table, CSV and minimal render the `result` record; JSON prints the whole
/// envelope.
pub fn format_output(format: &OutputFormat, value: &Value) {
    let result = match value.get("result").and_then(Value::as_object) {
        Some(result) => result,
        None => return json::print_json(value),
    };
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(result, value),
        OutputFormat::Csv => csv_out::print_csv(result),
        OutputFormat::Minimal => minimal::print_minimal(result),
    }
}
