use serde_json::{Map, Value};

/// Result fields that carry each projector's headline answer, in priority
/// order. Every result record holds exactly one of them.
const HEADLINE_KEYS: [&str; 3] = ["total_wealth", "monthly_sip_required", "monthly_withdrawal"];

/// Print just the headline figure of a result record.
pub fn print_minimal(result: &Map<String, Value>) {
    if let Some(answer) = headline(result) {
        println!("{}", answer);
    }
}

fn headline(result: &Map<String, Value>) -> Option<String> {
    HEADLINE_KEYS
        .iter()
        .find_map(|key| result.get(*key))
        .map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
}
