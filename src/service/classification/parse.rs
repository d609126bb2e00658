//! Parsing and normalization of the model's classification payload.
//!
//! The model is asked for a JSON array of `{index, threats}` objects, but in
//! practice may return a single such object, or wrap the array under some
//! key of an enclosing object. Normalization happens before any entry is
//! deserialized, so one code path handles all three shapes.

use serde::Deserialize;
use serde_json::Value;

use super::error::ClassificationError;
use crate::model::row::Threat;

/// One entry of the model's response: the threats for the row at `index`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifiedRow {
    pub index: usize,
    #[serde(default)]
    pub threats: Vec<Threat>,
}

/// Parse the raw text payload into classification entries.
///
/// Fails with [`ClassificationError::MalformedResponse`] if the payload is
/// not JSON, does not normalize to a list, or contains an entry that is not
/// an `{index, threats}` object. Threat strings are trimmed and entries with
/// neither a category nor a description are dropped.
pub fn parse_payload(payload: &str) -> Result<Vec<ClassifiedRow>, ClassificationError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| ClassificationError::MalformedResponse(e.to_string()))?;

    normalize(value)?
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<ClassifiedRow>(entry)
                .map(trim_threats)
                .map_err(|e| ClassificationError::MalformedResponse(e.to_string()))
        })
        .collect()
}

fn normalize(value: Value) -> Result<Vec<Value>, ClassificationError> {
    match value {
        Value::Array(entries) => Ok(entries),
        Value::Object(map) => {
            // A single entry returned bare.
            if map.contains_key("index") && map.contains_key("threats") {
                return Ok(vec![Value::Object(map)]);
            }
            // The array wrapped under some key ("results" or similar).
            for (_, inner) in map {
                if let Value::Array(entries) = inner {
                    return Ok(entries);
                }
            }
            Err(malformed())
        }
        _ => Err(malformed()),
    }
}

fn malformed() -> ClassificationError {
    ClassificationError::MalformedResponse(
        "expected a JSON array of row classifications".to_string(),
    )
}

fn trim_threats(mut row: ClassifiedRow) -> ClassifiedRow {
    row.threats = row
        .threats
        .into_iter()
        .filter_map(|t| {
            let category = t.category.trim().to_string();
            let description = t.description.trim().to_string();
            if category.is_empty() && description.is_empty() {
                None
            } else {
                Some(Threat {
                    category,
                    description,
                })
            }
        })
        .collect();
    row
}
