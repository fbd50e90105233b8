use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use log::debug;
use serde_json::{Map, Value as JsonValue};

use super::model::{Dataset, FieldValue, Record};
use crate::fnutil::get_field;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the inventory document from a JSON file.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    let dataset = parse_dataset(&text)?;
    debug!(
        "loaded {} items from {} (threshold {})",
        dataset.len(),
        path.display(),
        dataset.price_thresh_now
    );
    Ok(dataset)
}

/// Expected JSON schema:
///
/// ```json
/// {
///   "price_thresh_now": 0.75,
///   "items": [
///     {
///       "id": "0001",
///       "type": "donut",
///       "name": "Cake",
///       "ppu": 0.55,
///       "batters": [ { "id": "1001", "type": "Regular" }, ... ]
///     },
///     ...
///   ]
/// }
/// ```
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let obj = root
        .as_object()
        .context("Expected top-level JSON object")?;

    let price_thresh_now = get_field("price_thresh_now", obj)?
        .as_f64()
        .context("'price_thresh_now' is not a number")?;

    let raw_items = get_field("items", obj)?
        .as_array()
        .context("'items' is not an array")?;

    let items = raw_items
        .iter()
        .enumerate()
        .map(|(i, item)| -> Result<Record> {
            let fields = item
                .as_object()
                .with_context(|| format!("Item {i} is not a JSON object"))?;
            Ok(json_to_record(fields))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dataset::new(price_thresh_now, items))
}

// ---------------------------------------------------------------------------
// JSON → Record conversion
// ---------------------------------------------------------------------------

fn json_to_record(obj: &Map<String, JsonValue>) -> Record {
    let fields: BTreeMap<String, FieldValue> = obj
        .iter()
        .map(|(key, val)| (key.clone(), json_to_field(val)))
        .collect();
    Record { fields }
}

fn json_to_field(val: &JsonValue) -> FieldValue {
    match val {
        JsonValue::String(s) => FieldValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                FieldValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                FieldValue::Float(f)
            } else {
                FieldValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => FieldValue::Bool(*b),
        JsonValue::Null => FieldValue::Null,
        // Arrays of objects (batters, toppings) become record lists; anything
        // else stays a plain array.
        JsonValue::Array(arr) if arr.iter().all(JsonValue::is_object) => FieldValue::List(
            arr.iter()
                .filter_map(JsonValue::as_object)
                .map(json_to_record)
                .collect(),
        ),
        JsonValue::Array(arr) => FieldValue::Array(arr.iter().map(json_to_field).collect()),
        JsonValue::Object(obj) => FieldValue::Record(json_to_record(obj)),
    }
}
