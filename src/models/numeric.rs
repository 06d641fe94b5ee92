//! Lenient numeric decoding for document fields.
//!
//! Older site versions wrote some counters as strings and left others null.
//! Anything unreadable decodes to zero so the comparators downstream never
//! see NaN, which would break their total ordering.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn coerce(value: Option<Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_finite() {
        raw
    } else {
        0.0
    }
}

/// Decode a float, coercing strings, nulls and garbage to 0.0.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(coerce(Option::<Value>::deserialize(deserializer)?))
}

/// Decode a non-negative counter, coercing strings, nulls, garbage and
/// negative values to 0.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = coerce(Option::<Value>::deserialize(deserializer)?);
    if raw > 0.0 {
        Ok(raw.min(f64::from(u32::MAX)) as u32)
    } else {
        Ok(0)
    }
}
