//! Parser for attraction payloads.
//!
//! Both backend endpoints (and the local dump files that mirror them) return
//! a JSON object keyed by attraction id:
//!
//! ```text
//! {
//!   "123": { "name": "Dover Castle", "ownership": "ehProperty", ... },
//!   "124": { ... }
//! }
//! ```
//!
//! Parsing flattens that object into a `Vec<Attraction>`.

use crate::error::{DataLoadError, Result};
use crate::types::Attraction;
use serde_json::Value;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Parse a keyed attraction payload from raw JSON text.
///
/// `origin` names where the text came from and is only used in errors.
pub fn parse_attractions(json: &str, origin: &str) -> Result<Vec<Attraction>> {
    let value: Value = serde_json::from_str(json).map_err(|source| DataLoadError::Json {
        origin: origin.to_string(),
        source,
    })?;
    parse_attraction_value(value, origin)
}

/// Parse an already-decoded keyed attraction payload.
pub fn parse_attraction_value(value: Value, origin: &str) -> Result<Vec<Attraction>> {
    let entries = match value {
        Value::Object(map) => map,
        other => {
            return Err(DataLoadError::NotAnObject {
                origin: origin.to_string(),
                found: json_kind(&other).to_string(),
            });
        }
    };

    let mut entries: Vec<(String, Value)> = entries.into_iter().collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys(a, b));

    let mut attractions = Vec::with_capacity(entries.len());
    for (key, body) in entries {
        let mut attraction: Attraction =
            serde_json::from_value(body).map_err(|e| DataLoadError::InvalidRecord {
                origin: origin.to_string(),
                id: key.clone(),
                reason: e.to_string(),
            })?;

        if attraction.id.is_empty() {
            attraction.id = key;
        }
        attractions.push(attraction);
    }

    Ok(attractions)
}

/// Read and parse a keyed attraction payload from a file.
pub fn parse_attraction_file(path: &Path) -> Result<Vec<Attraction>> {
    let text = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_attractions(&text, &path.display().to_string())
}

/// Key order used for the flattened list: array-index keys ascending by
/// value, then everything else in payload order. The sort is stable and the
/// map keeps insertion order, so non-index keys are never reordered.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (array_index(a), array_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// A key that enumerates as an integer: canonical decimal (no sign, no
/// leading zero except `"0"`) below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&n| n != u32::MAX)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
