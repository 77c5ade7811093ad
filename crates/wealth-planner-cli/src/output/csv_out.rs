use serde_json::{Map, Value};
use std::io;

/// Write the result record as two-column `field,value` CSV to stdout.
///
/// Composition entries follow the scalar fields as `label,amount` rows.
pub fn print_csv(result: &Map<String, Value>) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in result {
        if key == "composition" {
            continue;
        }
        let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
    }
    if let Some(Value::Array(parts)) = result.get("composition") {
        for part in parts {
            let label = part.get("label").map(format_csv_value).unwrap_or_default();
            let amount = part.get("amount").map(format_csv_value).unwrap_or_default();
            let _ = wtr.write_record([label, amount]);
        }
    }

    let _ = wtr.flush();
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
