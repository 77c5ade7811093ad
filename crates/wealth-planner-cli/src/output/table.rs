use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

/// Print the result record as a field/value table, then its composition,
/// the envelope's warnings and the methodology.
pub fn print_table(result: &Map<String, Value>, envelope: &Value) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in result {
        if key == "composition" {
            continue;
        }
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));

    if let Some(Value::Array(parts)) = result.get("composition") {
        if !parts.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["Component", "Amount"]);
            for part in parts {
                builder.push_record([component_field(part, "label"), component_field(part, "amount")]);
            }
            println!("\nComposition:");
            println!("{}", Table::from(builder));
        }
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings.iter().filter_map(Value::as_str) {
                println!("  - {}", w);
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn component_field(part: &Value, key: &str) -> String {
    part.get(key).map(format_value).unwrap_or_default()
}

/// Decimals arrive as JSON strings; print them without quotes.
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
