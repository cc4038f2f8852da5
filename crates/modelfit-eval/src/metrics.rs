use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::errors::EvalError;

/// Flatten a possibly nested metrics object into dot-joined keys.
///
/// Only finite numbers survive; booleans, strings, arrays and nulls are
/// dropped.
pub fn flatten_metrics(metrics: &Map<String, Value>) -> BTreeMap<String, f64> {
    let mut flat = BTreeMap::new();
    for (key, value) in metrics {
        flatten_into(key, value, &mut flat);
    }
    flat
}

fn flatten_into(key: &str, value: &Value, flat: &mut BTreeMap<String, f64>) {
    match value {
        Value::Number(number) => {
            if let Some(number) = number.as_f64().filter(|number| number.is_finite()) {
                flat.insert(key.to_string(), number);
            }
        }
        Value::Object(children) => {
            for (child, value) in children {
                flatten_into(&format!("{key}.{child}"), value, flat);
            }
        }
        _ => {}
    }
}

/// Parse a metrics JSON document. A top-level `metrics` field is unwrapped
/// so raw execution responses are accepted too.
pub fn parse_metrics(text: &str) -> Result<BTreeMap<String, f64>, EvalError> {
    let value: Value = serde_json::from_str(text)?;
    let Value::Object(mut object) = value else {
        return Err(EvalError::InvalidMetrics(
            "metrics must be a JSON object".to_string(),
        ));
    };
    if let Some(Value::Object(inner)) = object.remove("metrics") {
        return Ok(flatten_metrics(&inner));
    }
    Ok(flatten_metrics(&object))
}
