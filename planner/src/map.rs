//! The persisted map document and its defaults.
//!
//! `HexMap` is the unit of save, load, import and export. Its JSON form uses
//! camelCase keys and RFC 3339 timestamps so files written by earlier
//! versions of the planner load unchanged.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use hexgrid::camera::Point;
use hexgrid::consts::DEFAULT_TILE_SIZE;
use hexgrid::doc::{AddOn, AddOnKind, Tile, TileId, TileType, generate_id};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Per-map display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapConfig {
    pub show_grid: bool,
    /// On-screen hex radius at zoom 1.0, in pixels.
    pub grid_size: f64,
    pub grid_opacity: f64,
    pub background_color: String,
    pub center_position: Point,
    pub zoom: f64,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            grid_size: DEFAULT_TILE_SIZE,
            grid_opacity: 0.4,
            background_color: "hsl(var(--background))".to_owned(),
            center_position: Point::new(400.0, 300.0),
            zoom: 1.0,
        }
    }
}

/// A complete map: tiles plus the palettes they draw from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HexMap {
    pub id: TileId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub config: MapConfig,
    pub tiles: Vec<Tile>,
    #[serde(default)]
    pub tile_types: Vec<TileType>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl HexMap {
    /// Empty map with the default palettes and a fresh id.
    #[must_use]
    pub fn new(name: &str) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            id: generate_id(),
            name: name.to_owned(),
            description: None,
            config: MapConfig::default(),
            tiles: Vec::new(),
            tile_types: default_tile_types(),
            add_ons: default_add_ons(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Mark the map as modified now.
    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }

    /// Refill empty palettes with the defaults.
    pub fn fill_missing_palettes(&mut self) {
        if self.tile_types.is_empty() {
            self.tile_types = default_tile_types();
        }
        if self.add_ons.is_empty() {
            self.add_ons = default_add_ons();
        }
    }

    /// Index entry for the map library.
    #[must_use]
    pub fn summary(&self) -> MapSummary {
        MapSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    #[must_use]
    pub fn tile(&self, id: &str) -> Option<&Tile> {
        self.tiles.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn tile_type(&self, id: &str) -> Option<&TileType> {
        self.tile_types.iter().find(|t| t.id == id)
    }

    #[must_use]
    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|a| a.id == id)
    }
}

/// What the map library lists without loading whole maps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapSummary {
    pub id: TileId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

fn tile_type(id: &str, name: &str, color: &str, icon: &str, height: u8, description: &str) -> TileType {
    TileType {
        id: id.to_owned(),
        name: name.to_owned(),
        color: color.to_owned(),
        icon: Some(icon.to_owned()),
        height,
        description: Some(description.to_owned()),
    }
}

fn add_on(id: &str, name: &str, icon: &str, kind: AddOnKind, description: &str) -> AddOn {
    AddOn {
        id: id.to_owned(),
        name: name.to_owned(),
        icon: icon.to_owned(),
        kind,
        description: Some(description.to_owned()),
    }
}

/// Grass, water, mountain and desert.
#[must_use]
pub fn default_tile_types() -> Vec<TileType> {
    vec![
        tile_type("grass", "Grass", "hsl(120, 60%, 50%)", "TreePine", 1, "Basic grass terrain"),
        tile_type("water", "Water", "hsl(210, 100%, 50%)", "Waves", 0, "Water tiles"),
        tile_type("mountain", "Mountain", "hsl(30, 30%, 40%)", "Mountain", 5, "Mountain terrain"),
        tile_type("desert", "Desert", "hsl(45, 80%, 70%)", "Sun", 1, "Desert sand"),
    ]
}

/// House, tree, tower and road.
#[must_use]
pub fn default_add_ons() -> Vec<AddOn> {
    vec![
        add_on("house", "House", "Home", AddOnKind::Building, "Residential building"),
        add_on("tree", "Tree", "TreePine", AddOnKind::Nature, "Large tree"),
        add_on("tower", "Tower", "Castle", AddOnKind::Structure, "Watchtower or castle"),
        add_on("road", "Road", "Route", AddOnKind::Structure, "Path or road"),
    ]
}
