//! Nested-field extraction over raw provider records.
//!
//! Every metric with more than one possible source location (reach, audience
//! counts, demographics, category) resolves through an ordered list of
//! candidate paths. The first path that lands on a present, non-empty value
//! wins. Traversal never panics: an absent key or a non-object intermediate
//! simply means "not found" for that path.

use serde_json::Value;

/// Return the value at the first path that resolves to a present, non-empty
/// value. Null, `""`, `[]` and `{}` all count as empty.
pub fn first_present<'a>(record: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|path| resolve(record, path))
}

fn resolve<'a>(record: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = record;
    for key in path {
        current = current.as_object()?.get(*key)?;
    }
    if is_empty(current) {
        None
    } else {
        Some(current)
    }
}

pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}

/// First present value coerced to a count. Numeric strings are accepted;
/// negative values (including the `-1` "unknown" sentinel some providers
/// use) clamp to zero.
pub fn first_u64(record: &Value, paths: &[&[&str]]) -> Option<u64> {
    first_present(record, paths).and_then(as_u64_lossy)
}

pub fn first_str<'a>(record: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    first_present(record, paths).and_then(Value::as_str)
}

pub fn as_u64_lossy(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => {
            if let Some(u) = n.as_u64() {
                Some(u)
            } else if n.as_i64().is_some() {
                Some(0)
            } else {
                n.as_f64().map(|f| if f < 0.0 { 0 } else { f as u64 })
            }
        }
        Value::String(s) => {
            let trimmed = s.trim().replace(',', "");
            if let Ok(u) = trimmed.parse::<u64>() {
                Some(u)
            } else if let Ok(f) = trimmed.parse::<f64>() {
                Some(if f < 0.0 { 0 } else { f as u64 })
            } else {
                None
            }
        }
        _ => None,
    }
}
