//! Map templates: themed palettes with optional example layouts.
//!
//! Templates are plain JSON files in a directory; the file stem is the
//! template id. Instantiating one gives every tile type and add-on a fresh id
//! so a template can be applied to a map more than once without collisions.

#[cfg(test)]
#[path = "template_test.rs"]
mod template_test;

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use hexgrid::doc::{AddOn, Tile, TileId, TileType, generate_id};
use hexgrid::hex::Axial;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::PlannerError;
use crate::map::HexMap;

/// A themed palette plus example maps built from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTemplate {
    pub name: String,
    pub description: String,
    pub tile_types: Vec<TileType>,
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub examples: Vec<TemplateExample>,
}

/// A ready-made layout that references the template palette by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateExample {
    pub name: String,
    pub description: String,
    pub tiles: Vec<ExampleTile>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleTile {
    /// Tile type id within the template.
    #[serde(rename = "type")]
    pub tile_type: TileId,
    pub position: Axial,
    /// Add-on ids within the template.
    #[serde(default)]
    pub add_ons: Vec<TileId>,
}

impl MapTemplate {
    /// Build a new map from this template.
    ///
    /// With `example` the map also gets that example's tiles. `map_name`
    /// defaults to `New {template} Map` when absent or empty.
    pub fn instantiate(&self, example: Option<&str>, map_name: Option<&str>) -> Result<HexMap, PlannerError> {
        let example = match example {
            Some(name) => Some(
                self.examples
                    .iter()
                    .find(|e| e.name == name)
                    .ok_or_else(|| PlannerError::UnknownExample(name.to_owned()))?,
            ),
            None => None,
        };

        let tile_types: Vec<TileType> =
            self.tile_types.iter().map(|t| TileType { id: generate_id(), ..t.clone() }).collect();
        let add_ons: Vec<AddOn> = self.add_ons.iter().map(|a| AddOn { id: generate_id(), ..a.clone() }).collect();

        // Template id -> instantiated entry, matched by position in the palette.
        let type_by_id: HashMap<&str, &TileType> =
            self.tile_types.iter().map(|t| t.id.as_str()).zip(tile_types.iter()).collect();
        let add_on_by_id: HashMap<&str, &AddOn> =
            self.add_ons.iter().map(|a| a.id.as_str()).zip(add_ons.iter()).collect();

        let mut tiles = Vec::new();
        if let Some(example) = example {
            for spec in &example.tiles {
                let tile_type = type_by_id
                    .get(spec.tile_type.as_str())
                    .ok_or_else(|| PlannerError::UnknownTileType(spec.tile_type.clone()))?;
                let stacked = spec
                    .add_ons
                    .iter()
                    .filter_map(|id| add_on_by_id.get(id.as_str()).map(|a| (*a).clone()))
                    .collect();
                tiles.push(Tile {
                    id: generate_id(),
                    tile_type: (*tile_type).clone(),
                    position: spec.position,
                    add_ons: stacked,
                    rotation: Some(0),
                });
            }
        }

        let mut map = HexMap::new(&match map_name {
            Some(name) if !name.is_empty() => name.to_owned(),
            _ => format!("New {} Map", self.name),
        });
        map.description = Some(match example {
            Some(e) => format!("Based on {}", e.description),
            None => format!("Created from {} template", self.name),
        });
        map.tiles = tiles;
        map.tile_types = tile_types;
        map.add_ons = add_ons;

        info!(
            template = %self.name,
            example = example.map(|e| e.name.as_str()),
            tiles = map.tiles.len(),
            "map instantiated from template"
        );
        Ok(map)
    }
}

/// The template files available in one directory.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    dir: PathBuf,
}

impl TemplateCatalog {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Ids of every `*.json` file in the directory, sorted. A missing or
    /// unreadable directory yields no templates.
    #[must_use]
    pub fn discover(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "template directory unreadable");
                return Vec::new();
            }
        };
        let mut ids: Vec<String> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
            .collect();
        ids.sort();
        ids
    }

    /// Read and parse the template with this id.
    pub fn load(&self, id: &str) -> Result<MapTemplate, PlannerError> {
        if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
            return Err(PlannerError::UnknownTemplate(id.to_owned()));
        }
        let path = self.dir.join(format!("{id}.json"));
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(PlannerError::UnknownTemplate(id.to_owned())),
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&text)?)
    }
}
