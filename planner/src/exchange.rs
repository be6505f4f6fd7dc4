//! JSON import and export of whole maps.

#[cfg(test)]
#[path = "exchange_test.rs"]
mod exchange_test;

use hexgrid::doc::generate_id;
use serde_json::Value;
use tracing::info;

use crate::PlannerError;
use crate::map::{HexMap, default_add_ons, default_tile_types};

/// Pretty-printed JSON for a download.
pub fn export_json(map: &HexMap) -> Result<String, PlannerError> {
    Ok(serde_json::to_string_pretty(map)?)
}

/// Download file name: the map name with every character outside
/// `[A-Za-z0-9]` replaced by `_`, lowercased, plus `.json`.
#[must_use]
pub fn export_file_name(map: &HexMap) -> String {
    let stem: String = map
        .name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    format!("{stem}.json")
}

/// Parse an exported map.
///
/// The document must be an object with a non-empty `id` and `name`, a
/// `config` object and a `tiles` array. The imported map gets a fresh id and
/// `updatedAt` so it never overwrites the map it was exported from; missing
/// palettes are filled with the defaults.
pub fn import_json(text: &str) -> Result<HexMap, PlannerError> {
    let mut doc: Value = serde_json::from_str(text)?;
    let Some(obj) = doc.as_object_mut() else {
        return Err(PlannerError::InvalidMap("document is not an object".into()));
    };

    for key in ["id", "name"] {
        if !obj.get(key).and_then(Value::as_str).is_some_and(|s| !s.is_empty()) {
            return Err(PlannerError::InvalidMap(format!("missing {key}")));
        }
    }
    if !obj.get("config").is_some_and(Value::is_object) {
        return Err(PlannerError::InvalidMap("missing config".into()));
    }
    if !obj.get("tiles").is_some_and(Value::is_array) {
        return Err(PlannerError::InvalidMap("tiles is not an array".into()));
    }
    if obj.get("tileTypes").is_none_or(Value::is_null) {
        obj.insert("tileTypes".into(), serde_json::to_value(default_tile_types())?);
    }
    if obj.get("addOns").is_none_or(Value::is_null) {
        obj.insert("addOns".into(), serde_json::to_value(default_add_ons())?);
    }

    let mut map: HexMap = serde_json::from_value(doc)?;
    let original_id = std::mem::replace(&mut map.id, generate_id());
    map.touch();
    info!(from = %original_id, map_id = %map.id, tiles = map.tiles.len(), "map imported");
    Ok(map)
}
