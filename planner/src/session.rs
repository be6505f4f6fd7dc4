//! Map-state store: the authoritative `HexMap` for one editing session.
//!
//! DESIGN
//! ======
//! The kernel engine decides what a gesture means and reports it as an
//! [`Action`]; the session commits those actions to the map it owns and keeps
//! the palette selection (tile type and add-on) the editor stamps with.
//! Palette edits cascade into the tiles that embed them, so a map never holds
//! a tile whose type or add-on disagrees with its palette entry.
//!
//! Every mutation refreshes `updatedAt` and raises the dirty flag; saving
//! clears it.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use hexgrid::doc::{AddOn, Tile, TileType};
use hexgrid::engine::{Action, Engine};
use tracing::{debug, info};

use crate::map::{HexMap, MapConfig};
use crate::template::MapTemplate;

/// One open map plus the editor's palette selection.
#[derive(Debug, Clone)]
pub struct MapSession {
    map: HexMap,
    selected_tile_type: Option<TileType>,
    selected_add_on: Option<AddOn>,
    dirty: bool,
}

impl MapSession {
    /// Open `map`, selecting the first tile type and add-on.
    #[must_use]
    pub fn new(map: HexMap) -> Self {
        let mut session = Self { map, selected_tile_type: None, selected_add_on: None, dirty: false };
        session.select_first();
        session
    }

    // --- Accessors ---

    #[must_use]
    pub fn map(&self) -> &HexMap {
        &self.map
    }

    #[must_use]
    pub fn into_map(self) -> HexMap {
        self.map
    }

    #[must_use]
    pub fn selected_tile_type(&self) -> Option<&TileType> {
        self.selected_tile_type.as_ref()
    }

    #[must_use]
    pub fn selected_add_on(&self) -> Option<&AddOn> {
        self.selected_add_on.as_ref()
    }

    /// Whether the map changed since it was opened or last saved.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // --- Kernel bridge ---

    /// Push the map's tiles, tile size and stamped type into `engine`.
    ///
    /// Palette cascades (deleting a tile type or add-on, editing one) change
    /// tiles behind the engine's back; call this again after them.
    pub fn hydrate(&self, engine: &mut Engine) {
        engine.load_snapshot(self.map.tiles.clone());
        engine.set_tile_size(self.map.config.grid_size);
        engine.ui.tile_type.clone_from(&self.selected_tile_type);
    }

    /// Commit one operation reported by the engine. Returns whether the map
    /// changed. A created tile whose type is not in the palette is refused.
    pub fn apply(&mut self, action: &Action) -> bool {
        match action {
            Action::TileCreated(tile) => {
                if self.map.tile_type(&tile.tile_type.id).is_none() {
                    debug!(id = %tile.id, tile_type = %tile.tile_type.id, "create with unknown tile type ignored");
                    return false;
                }
                match self.map.tiles.iter_mut().find(|t| t.id == tile.id) {
                    Some(existing) => existing.clone_from(tile),
                    None => self.map.tiles.push(tile.clone()),
                }
                self.touch();
                true
            }
            Action::TileMoved { id, position } => {
                let Some(tile) = self.map.tiles.iter_mut().find(|t| &t.id == id) else {
                    debug!(%id, "move for unknown tile ignored");
                    return false;
                };
                tile.position = *position;
                self.touch();
                true
            }
            Action::TileDeleted { id } => {
                let before = self.map.tiles.len();
                self.map.tiles.retain(|t| &t.id != id);
                if self.map.tiles.len() == before {
                    return false;
                }
                self.touch();
                true
            }
            Action::SelectionChanged(_) | Action::SetCursor(_) | Action::RenderNeeded => false,
        }
    }

    /// Replace a tile wholesale. Returns false if no tile has its id.
    pub fn update_tile(&mut self, tile: Tile) -> bool {
        let Some(existing) = self.map.tiles.iter_mut().find(|t| t.id == tile.id) else {
            return false;
        };
        *existing = tile;
        self.touch();
        true
    }

    // --- Tile types ---

    /// Add a tile type to the palette and select it.
    pub fn add_tile_type(&mut self, tile_type: TileType) {
        self.selected_tile_type = Some(tile_type.clone());
        self.map.tile_types.push(tile_type);
        self.touch();
    }

    /// Replace a tile type, propagating the change to every tile of that type.
    /// Returns false if the palette has no entry with its id.
    pub fn update_tile_type(&mut self, tile_type: TileType) -> bool {
        let Some(entry) = self.map.tile_types.iter_mut().find(|t| t.id == tile_type.id) else {
            return false;
        };
        entry.clone_from(&tile_type);
        for tile in self.map.tiles.iter_mut().filter(|t| t.tile_type.id == tile_type.id) {
            tile.tile_type.clone_from(&tile_type);
        }
        if self.selected_tile_type.as_ref().is_some_and(|t| t.id == tile_type.id) {
            self.selected_tile_type = Some(tile_type);
        }
        self.touch();
        true
    }

    /// Remove a tile type and every tile painted with it. Returns how many
    /// tiles were removed.
    pub fn delete_tile_type(&mut self, id: &str) -> usize {
        let before = self.map.tiles.len();
        self.map.tile_types.retain(|t| t.id != id);
        self.map.tiles.retain(|t| t.tile_type.id != id);
        let removed = before - self.map.tiles.len();
        if self.selected_tile_type.as_ref().is_some_and(|t| t.id == id) {
            self.selected_tile_type = None;
        }
        info!(tile_type = id, removed, "tile type deleted");
        self.touch();
        removed
    }

    /// Select the palette entry with this id. Returns false if there is none.
    pub fn select_tile_type(&mut self, id: &str) -> bool {
        let Some(tile_type) = self.map.tile_type(id).cloned() else {
            return false;
        };
        self.selected_tile_type = Some(tile_type);
        true
    }

    // --- Add-ons ---

    pub fn add_add_on(&mut self, add_on: AddOn) {
        self.map.add_ons.push(add_on);
        self.touch();
    }

    /// Replace an add-on, propagating the change to every tile carrying it.
    /// Returns false if the palette has no entry with its id.
    pub fn update_add_on(&mut self, add_on: AddOn) -> bool {
        let Some(entry) = self.map.add_ons.iter_mut().find(|a| a.id == add_on.id) else {
            return false;
        };
        entry.clone_from(&add_on);
        for stacked in self.map.tiles.iter_mut().flat_map(|t| t.add_ons.iter_mut()) {
            if stacked.id == add_on.id {
                stacked.clone_from(&add_on);
            }
        }
        if self.selected_add_on.as_ref().is_some_and(|a| a.id == add_on.id) {
            self.selected_add_on = Some(add_on);
        }
        self.touch();
        true
    }

    /// Remove an add-on from the palette and from every tile. Returns how
    /// many tiles carried it.
    pub fn delete_add_on(&mut self, id: &str) -> usize {
        self.map.add_ons.retain(|a| a.id != id);
        let mut affected = 0;
        for tile in &mut self.map.tiles {
            let before = tile.add_ons.len();
            tile.add_ons.retain(|a| a.id != id);
            if tile.add_ons.len() != before {
                affected += 1;
            }
        }
        if self.selected_add_on.as_ref().is_some_and(|a| a.id == id) {
            self.selected_add_on = None;
        }
        info!(add_on = id, affected, "add-on deleted");
        self.touch();
        affected
    }

    /// Select the palette entry with this id. Returns false if there is none.
    pub fn select_add_on(&mut self, id: &str) -> bool {
        let Some(add_on) = self.map.add_on(id).cloned() else {
            return false;
        };
        self.selected_add_on = Some(add_on);
        true
    }

    /// Stack a palette add-on on a tile. Returns false if either is unknown.
    pub fn attach_add_on(&mut self, tile_id: &str, add_on_id: &str) -> bool {
        let Some(add_on) = self.map.add_on(add_on_id).cloned() else {
            return false;
        };
        let Some(tile) = self.map.tiles.iter_mut().find(|t| t.id == tile_id) else {
            return false;
        };
        tile.add_ons.push(add_on);
        self.touch();
        true
    }

    /// Remove every copy of an add-on from a tile. Returns false if the tile
    /// is unknown or did not carry it.
    pub fn detach_add_on(&mut self, tile_id: &str, add_on_id: &str) -> bool {
        let Some(tile) = self.map.tiles.iter_mut().find(|t| t.id == tile_id) else {
            return false;
        };
        let before = tile.add_ons.len();
        tile.add_ons.retain(|a| a.id != add_on_id);
        if tile.add_ons.len() == before {
            return false;
        }
        self.touch();
        true
    }

    // --- Whole-map operations ---

    pub fn update_config(&mut self, config: MapConfig) {
        self.map.config = config;
        self.touch();
    }

    pub fn rename(&mut self, name: &str) {
        name.clone_into(&mut self.map.name);
        self.touch();
    }

    /// Remove every tile, keeping the palettes.
    pub fn clear_tiles(&mut self) {
        self.map.tiles.clear();
        self.touch();
    }

    /// Swap in another map, as when opening one from the library.
    pub fn load(&mut self, map: HexMap) {
        info!(map_id = %map.id, name = %map.name, "map loaded into session");
        self.map = map;
        self.dirty = false;
        self.select_first();
    }

    /// Apply a map built from a template.
    ///
    /// With an example the whole map is replaced. Without one only the
    /// palettes are taken, keeping the current tiles and settings.
    pub fn apply_template(&mut self, template_map: HexMap, with_example: bool) {
        if with_example {
            self.map = template_map;
        } else {
            self.map.tile_types = template_map.tile_types;
            self.map.add_ons = template_map.add_ons;
        }
        self.select_first();
        self.touch();
    }

    /// Instantiate `template` (optionally one of its examples) under the
    /// current map name and apply it.
    pub fn load_template(&mut self, template: &MapTemplate, example: Option<&str>) -> Result<(), crate::PlannerError> {
        let built = template.instantiate(example, Some(&self.map.name))?;
        self.apply_template(built, example.is_some());
        Ok(())
    }

    fn select_first(&mut self) {
        self.selected_tile_type = self.map.tile_types.first().cloned();
        self.selected_add_on = self.map.add_ons.first().cloned();
    }

    fn touch(&mut self) {
        self.map.touch();
        self.dirty = true;
    }
}
