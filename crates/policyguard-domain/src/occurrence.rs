use policyguard_types::Occurrence;
use policyguard_types::ids::{DETAIL_MSG, DETAIL_RECOMMENDED_VALUE, DETAIL_VIOLATING_KEY};
use serde_json::Value;

/// Normalize an evaluator detail payload into occurrences.
///
/// A list yields one occurrence per element. Anything else, including an absent
/// or malformed payload, yields exactly one occurrence titled with `title`.
pub fn extract_occurrences(title: &str, details: Option<&Value>) -> Vec<Occurrence> {
    match details {
        Some(Value::Array(records)) => records
            .iter()
            .map(|record| parse_occurrence(title, record))
            .collect(),
        other => vec![parse_occurrence(title, other.unwrap_or(&Value::Null))],
    }
}

fn parse_occurrence(title: &str, record: &Value) -> Occurrence {
    let mut occurrence = Occurrence::new(title);
    let Some(fields) = record.as_object() else {
        return occurrence;
    };

    if let Some(msg) = fields.get(DETAIL_MSG).and_then(Value::as_str) {
        occurrence.message = msg.to_string();
    }
    occurrence.violating_key = fields
        .get(DETAIL_VIOLATING_KEY)
        .and_then(Value::as_str)
        .map(str::to_string);
    occurrence.recommended_value = fields
        .get(DETAIL_RECOMMENDED_VALUE)
        .filter(|v| !v.is_null())
        .cloned();

    occurrence
}
