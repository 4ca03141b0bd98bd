//! Merging of package attributes into the resources of the package.

use serde_json::{Map, Value};
use std::collections::HashSet;

fn strings(value: &Value) -> Result<Vec<String>, String> {
    value
        .as_array()
        .ok_or_else(|| "expected a json array".to_string())?
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| "expected a json array of strings".to_string())
        })
        .collect()
}

/// Union of two string arrays, package values first, de-duplicated in first-seen order
pub fn merge_string_arrays(
    package: Option<&Value>,
    own: Option<&Value>,
) -> Result<Option<Value>, String> {
    let (package, own) = match (package, own) {
        (None, own) => return Ok(own.cloned()),
        (package, None) => return Ok(package.cloned()),
        (Some(package), Some(own)) => (package, own),
    };

    let mut seen = HashSet::new();
    let merged: Vec<Value> = strings(package)?
        .into_iter()
        .chain(strings(own)?)
        .filter(|item| seen.insert(item.clone()))
        .map(Value::String)
        .collect();
    Ok(Some(Value::Array(merged)))
}

/// Key-wise label merge; values of shared keys are unioned
pub fn merge_labels(package: Option<&Value>, own: Option<&Value>) -> Result<Option<Value>, String> {
    let (package, own) = match (package, own) {
        (None, own) => return Ok(own.cloned()),
        (package, None) => return Ok(package.cloned()),
        (Some(package), Some(own)) => (package, own),
    };
    let (Some(package), Some(own)) = (package.as_object(), own.as_object()) else {
        return Err("expected two json objects".to_string());
    };

    let mut merged: Map<String, Value> = package.clone();
    for (key, values) in own {
        let value = match package.get(key) {
            Some(existing) => merge_string_arrays(Some(existing), Some(values))
                .map_err(|e| format!("while merging values for key {key:?}: {e}"))?
                .unwrap_or(Value::Null),
            None => values.clone(),
        };
        merged.insert(key.clone(), value);
    }
    Ok(Some(Value::Object(merged)))
}
