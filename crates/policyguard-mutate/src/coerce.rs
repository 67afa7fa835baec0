use serde_json::{Number, Value};

/// Value to write for a recommendation: numeric strings become numbers.
///
/// Integral values that fit in `i64` are written as integers so `"3"` lands as `3`.
pub(crate) fn coerce_recommended(value: &Value) -> Value {
    match value {
        Value::String(s) => numeric_from_str(s).unwrap_or_else(|| value.clone()),
        other => other.clone(),
    }
}

fn numeric_from_str(s: &str) -> Option<Value> {
    if s.trim() != s {
        return None;
    }
    let number: Number = s.parse().ok()?;
    let float = number.as_f64()?;
    if float.fract() == 0.0 && float >= i64::MIN as f64 && float < i64::MAX as f64 {
        return Some(Value::from(float as i64));
    }
    Number::from_f64(float).map(Value::Number)
}
