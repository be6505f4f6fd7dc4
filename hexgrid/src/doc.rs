//! Map content model: tiles, tile types, add-ons, and the in-memory tile store.
//!
//! `Tile`, `TileType` and `AddOn` are the values the map file carries, so they
//! serialize with the same camelCase keys as the JSON dump (`type`, `addOns`).
//! `TileStore` is the kernel's read model of the current tiles: it indexes
//! them by id and by cell so pointer resolution can answer "who is here" in
//! constant time. It does not refuse a second tile on an occupied cell; the
//! interaction layer does that check before it emits an operation.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::hex::Axial;

/// Unique identifier for a tile, tile type, or add-on.
pub type TileId = String;

/// Fresh opaque identifier.
#[must_use]
pub fn generate_id() -> TileId {
    Uuid::new_v4().simple().to_string()
}

/// A kind of terrain a tile can be painted with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileType {
    pub id: TileId,
    pub name: String,
    /// CSS color string.
    pub color: String,
    /// Symbolic icon name, resolved through [`crate::icon::Icon::from_name`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Elevation level (0-10).
    pub height: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Category of a decorative add-on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddOnKind {
    Building,
    Nature,
    Decoration,
    Structure,
}

/// A decoration that can be stacked on a tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOn {
    pub id: TileId,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: AddOnKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A placed tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    pub id: TileId,
    #[serde(rename = "type")]
    pub tile_type: TileType,
    pub position: Axial,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    /// One of the six hex rotations (0-5), if set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<u8>,
}

impl Tile {
    /// A new tile with a fresh id, no add-ons and no rotation.
    #[must_use]
    pub fn new(tile_type: TileType, position: Axial) -> Self {
        Self { id: generate_id(), tile_type, position, add_ons: Vec::new(), rotation: None }
    }
}

/// In-memory store of tiles, indexed by id and by cell.
#[derive(Debug, Default)]
pub struct TileStore {
    tiles: HashMap<TileId, Tile>,
    cells: HashMap<Axial, TileId>,
}

impl TileStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tile. If a tile with the same `id` already exists
    /// it is overwritten and its old cell released.
    pub fn insert(&mut self, tile: Tile) {
        if let Some(old) = self.tiles.get(&tile.id) {
            self.release_cell(old.position, &tile.id);
        }
        self.cells.entry(tile.position).or_insert_with(|| tile.id.clone());
        self.tiles.insert(tile.id.clone(), tile);
    }

    /// Remove a tile by id, returning it if it was present.
    pub fn remove(&mut self, id: &str) -> Option<Tile> {
        let tile = self.tiles.remove(id)?;
        self.release_cell(tile.position, id);
        Some(tile)
    }

    /// Return a reference to a tile by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Tile> {
        self.tiles.get(id)
    }

    /// The tile occupying `cell`, if any.
    #[must_use]
    pub fn tile_at(&self, cell: Axial) -> Option<&Tile> {
        self.cells.get(&cell).and_then(|id| self.tiles.get(id))
    }

    /// Whether tile `id` may sit on `cell`: the cell is empty or already its own.
    #[must_use]
    pub fn is_free_for(&self, cell: Axial, id: &str) -> bool {
        self.cells.get(&cell).is_none_or(|owner| owner == id)
    }

    /// Move tile `id` to `cell`. Returns false, leaving everything unchanged,
    /// if the tile is unknown or another tile holds the cell.
    pub fn move_tile(&mut self, id: &str, cell: Axial) -> bool {
        if !self.is_free_for(cell, id) {
            return false;
        }
        let Some(tile) = self.tiles.get_mut(id) else {
            return false;
        };
        let from = tile.position;
        tile.position = cell;
        self.release_cell(from, id);
        self.cells.insert(cell, id.to_owned());
        true
    }

    /// Remove every tile of the given type, returning the removed ids.
    pub fn remove_by_type(&mut self, type_id: &str) -> Vec<TileId> {
        let doomed: Vec<TileId> = self
            .tiles
            .values()
            .filter(|t| t.tile_type.id == type_id)
            .map(|t| t.id.clone())
            .collect();
        for id in &doomed {
            self.remove(id);
        }
        doomed
    }

    /// Replace all tiles with a full snapshot.
    ///
    /// When the snapshot stacks several tiles on one cell, the first one
    /// listed owns the cell for hit-testing.
    pub fn load_snapshot(&mut self, tiles: Vec<Tile>) {
        self.tiles.clear();
        self.cells.clear();
        for tile in tiles {
            self.insert(tile);
        }
    }

    /// All tiles in draw order: by row, then column, then id.
    #[must_use]
    pub fn sorted_tiles(&self) -> Vec<&Tile> {
        let mut tiles: Vec<&Tile> = self.tiles.values().collect();
        tiles.sort_by(|a, b| {
            (a.position.r, a.position.q)
                .cmp(&(b.position.r, b.position.q))
                .then_with(|| a.id.cmp(&b.id))
        });
        tiles
    }

    /// Iterate over tiles in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// Number of tiles currently in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Returns `true` if the store contains no tiles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    fn release_cell(&mut self, cell: Axial, id: &str) {
        if self.cells.get(&cell).is_some_and(|owner| owner == id) {
            self.cells.remove(&cell);
            let next = self.tiles.values().find(|t| t.position == cell && t.id != id);
            if let Some(next) = next {
                self.cells.insert(cell, next.id.clone());
            }
        }
    }
}
