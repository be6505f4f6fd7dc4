//! Interaction engine: turns pointer, wheel and keyboard events into camera
//! changes and tile operations.
//!
//! The host owns the authoritative map. It hydrates the engine's
//! [`TileStore`] with [`Engine::load_snapshot`] and keeps it current with the
//! `apply_*` methods; the engine applies its own operations to that store
//! optimistically and returns them as [`Action`]s for the host to commit.
//! Every handler runs synchronously and leaves the engine in a consistent
//! state before it returns.

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

use tracing::debug;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{KEYBOARD_PAN_STEP_PX, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
use crate::doc::{Tile, TileId, TileStore, TileType};
use crate::hex::Axial;
use crate::hit::{Hit, hit_test};
use crate::input::{Button, InputState, Key, Mode, Modifiers, UiState, WheelDelta};

/// Operations returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// A tile was placed on an empty cell.
    TileCreated(Tile),
    /// A dragged tile now sits on `position`.
    TileMoved { id: TileId, position: Axial },
    /// A tile was removed.
    TileDeleted { id: TileId },
    /// The selected tile changed; `None` clears the selection.
    SelectionChanged(Option<TileId>),
    /// The host should switch the pointer cursor.
    SetCursor(String),
    /// Camera or content changed; the host should redraw.
    RenderNeeded,
}

/// Interaction state for one editing session.
#[derive(Debug, Default)]
pub struct Engine {
    pub doc: TileStore,
    pub camera: Camera,
    pub ui: UiState,
    pub input: InputState,
    pub viewport: Viewport,
    /// Set when a gesture ends so the click the browser synthesizes right
    /// after it is swallowed.
    suppress_click: bool,
}

impl Engine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data inputs ---

    /// Hydrate the tile store from the host's current map.
    pub fn load_snapshot(&mut self, tiles: Vec<Tile>) {
        self.doc.load_snapshot(tiles);
        if self.ui.selected_id.as_ref().is_some_and(|id| self.doc.get(id).is_none()) {
            self.ui.selected_id = None;
        }
        let dragged_gone =
            matches!(&self.input, InputState::DraggingTile { id, .. } if self.doc.get(id).is_none());
        if dragged_gone {
            self.input = InputState::Idle;
        }
    }

    /// Apply a tile created by the host.
    pub fn apply_create(&mut self, tile: Tile) {
        self.doc.insert(tile);
    }

    /// Apply a tile move made by the host. Returns false if it was refused.
    pub fn apply_move(&mut self, id: &str, position: Axial) -> bool {
        self.doc.move_tile(id, position)
    }

    /// Apply a tile deletion made by the host.
    pub fn apply_delete(&mut self, id: &str) {
        self.doc.remove(id);
        if self.ui.selected_id.as_deref() == Some(id) {
            self.ui.selected_id = None;
        }
        if matches!(&self.input, InputState::DraggingTile { id: dragged, .. } if dragged == id) {
            self.input = InputState::Idle;
        }
    }

    // --- Mode / configuration ---

    /// Switch editing mode. The selection is dropped unless the new mode uses it.
    pub fn set_mode(&mut self, mode: Mode) -> Vec<Action> {
        self.ui.mode = mode;
        let mut actions = Vec::new();
        if !mode.keeps_selection() && self.ui.selected_id.take().is_some() {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::SetCursor(mode.cursor().to_owned()));
        actions
    }

    /// Choose the tile type stamped in add mode. Choosing one switches to add mode.
    pub fn set_tile_type(&mut self, tile_type: Option<TileType>) -> Vec<Action> {
        let chosen = tile_type.is_some();
        self.ui.tile_type = tile_type;
        if chosen { self.set_mode(Mode::Add) } else { Vec::new() }
    }

    /// Set the configured on-screen hex radius at zoom 1.0.
    pub fn set_tile_size(&mut self, tile_size: f64) {
        self.camera.tile_size = tile_size;
    }

    /// Update viewport dimensions (CSS pixels).
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport = Viewport::new(width, height);
    }

    /// Return the camera to the origin at zoom 1.0.
    pub fn reset_view(&mut self) -> Vec<Action> {
        self.camera = self.camera.reset();
        vec![Action::RenderNeeded]
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.suppress_click = false;

        if self.is_pan_press(button, modifiers) {
            self.input = InputState::Panning { last_screen: screen_pt };
            return vec![Action::SetCursor("grabbing".into())];
        }

        if button != Button::Primary || self.ui.mode != Mode::Drag {
            return Vec::new();
        }

        let Hit { cell, tile_id: Some(id) } = self.hit(screen_pt) else {
            return Vec::new();
        };
        self.ui.selected_id = Some(id.clone());
        self.input = InputState::DraggingTile { id: id.clone(), cell };
        vec![Action::SelectionChanged(Some(id)), Action::SetCursor("grabbing".into()), Action::RenderNeeded]
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point, _modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Idle => Vec::new(),
            InputState::Panning { last_screen } => {
                let dx = screen_pt.x - last_screen.x;
                let dy = screen_pt.y - last_screen.y;
                *last_screen = screen_pt;
                self.camera = self.camera.panned_by(dx, dy);
                vec![Action::RenderNeeded]
            }
            InputState::DraggingTile { id, cell } => {
                let target = self.camera.screen_to_cell(screen_pt, self.viewport);
                if target == *cell {
                    return Vec::new();
                }
                if !self.doc.is_free_for(target, id) {
                    debug!(id = %id, q = target.q, r = target.r, "tile move rejected: cell occupied");
                    return Vec::new();
                }
                if !self.doc.move_tile(id, target) {
                    self.input = InputState::Idle;
                    return Vec::new();
                }
                *cell = target;
                debug!(id = %id, q = target.q, r = target.r, "tile moved");
                vec![Action::TileMoved { id: id.clone(), position: target }, Action::RenderNeeded]
            }
        }
    }

    pub fn on_pointer_up(&mut self, _screen_pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        self.end_gesture()
    }

    /// Pointer left the surface: abandon any gesture.
    pub fn on_pointer_leave(&mut self) -> Vec<Action> {
        let actions = self.end_gesture();
        self.suppress_click = false;
        actions
    }

    /// A completed click (press and release without an intervening gesture).
    pub fn on_click(&mut self, screen_pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        if std::mem::take(&mut self.suppress_click) {
            return Vec::new();
        }
        if button != Button::Primary || modifiers.alt || self.ui.space_held {
            return Vec::new();
        }

        let hit = self.hit(screen_pt);
        match (self.ui.mode, hit.tile_id) {
            (Mode::Add, None) => self.place_tile(hit.cell),
            (Mode::Add, Some(_)) => {
                debug!(q = hit.cell.q, r = hit.cell.r, "placement rejected: cell occupied");
                Vec::new()
            }
            (Mode::Remove, Some(id)) => self.delete_tile(id),
            (Mode::Select, Some(id)) => self.select(Some(id)),
            (Mode::Select | Mode::Drag, None) => self.select(None),
            (Mode::Remove | Mode::Drag | Mode::Pan, _) => Vec::new(),
        }
    }

    /// Zoom toward the cursor, one fixed step per event.
    pub fn on_wheel(&mut self, screen_pt: Point, delta: WheelDelta, _modifiers: Modifiers) -> Vec<Action> {
        if delta.dy == 0.0 {
            return Vec::new();
        }
        let factor = if delta.dy > 0.0 { ZOOM_OUT_FACTOR } else { ZOOM_IN_FACTOR };
        let next = self.camera.zoomed_at(screen_pt, self.camera.zoom * factor, self.viewport);
        if (next.zoom - self.camera.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.camera = next;
        vec![Action::RenderNeeded]
    }

    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = true;
            return Vec::new();
        }

        if modifiers.command() {
            return match key.0.as_str() {
                "=" | "+" => self.zoom_by(ZOOM_IN_FACTOR),
                "-" => self.zoom_by(ZOOM_OUT_FACTOR),
                _ => Vec::new(),
            };
        }

        match key.0.as_str() {
            "r" | "R" => self.reset_view(),
            "ArrowUp" => self.pan_by(0.0, KEYBOARD_PAN_STEP_PX),
            "ArrowDown" => self.pan_by(0.0, -KEYBOARD_PAN_STEP_PX),
            "ArrowLeft" => self.pan_by(KEYBOARD_PAN_STEP_PX, 0.0),
            "ArrowRight" => self.pan_by(-KEYBOARD_PAN_STEP_PX, 0.0),
            other => Mode::from_shortcut(other).map_or_else(Vec::new, |mode| self.set_mode(mode)),
        }
    }

    pub fn on_key_up(&mut self, key: Key, _modifiers: Modifiers) -> Vec<Action> {
        if key.is_space() {
            self.ui.space_held = false;
        }
        Vec::new()
    }

    // --- Queries ---

    /// The currently selected tile, if any.
    #[must_use]
    pub fn selection(&self) -> Option<&TileId> {
        self.ui.selected_id.as_ref()
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The current editing mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.ui.mode
    }

    /// Look up a tile by ID.
    #[must_use]
    pub fn tile(&self, id: &str) -> Option<&Tile> {
        self.doc.get(id)
    }

    /// Resolve a screen point to its cell and occupant.
    #[must_use]
    pub fn hit(&self, screen_pt: Point) -> Hit {
        hit_test(screen_pt, &self.doc, &self.camera, self.viewport)
    }

    // --- Internals ---

    /// Middle, right, Alt+left, Space+left, and left in pan mode all pan.
    fn is_pan_press(&self, button: Button, modifiers: Modifiers) -> bool {
        match button {
            Button::Middle | Button::Secondary => true,
            Button::Primary => modifiers.alt || self.ui.space_held || self.ui.mode == Mode::Pan,
        }
    }

    fn end_gesture(&mut self) -> Vec<Action> {
        if !self.input.is_active() {
            return Vec::new();
        }
        self.input = InputState::Idle;
        self.suppress_click = true;
        vec![Action::SetCursor(self.ui.mode.cursor().to_owned())]
    }

    fn place_tile(&mut self, cell: Axial) -> Vec<Action> {
        let Some(tile_type) = self.ui.tile_type.clone() else {
            return Vec::new();
        };
        let tile = Tile::new(tile_type, cell);
        debug!(id = %tile.id, q = cell.q, r = cell.r, "tile created");
        self.doc.insert(tile.clone());
        vec![Action::TileCreated(tile), Action::RenderNeeded]
    }

    fn delete_tile(&mut self, id: TileId) -> Vec<Action> {
        self.doc.remove(&id);
        debug!(id = %id, "tile deleted");
        let mut actions = vec![Action::TileDeleted { id: id.clone() }];
        if self.ui.selected_id.as_ref() == Some(&id) {
            self.ui.selected_id = None;
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    fn select(&mut self, id: Option<TileId>) -> Vec<Action> {
        self.ui.selected_id.clone_from(&id);
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    fn pan_by(&mut self, dx: f64, dy: f64) -> Vec<Action> {
        self.camera = self.camera.panned_by(dx, dy);
        vec![Action::RenderNeeded]
    }

    /// Keyboard zoom has no cursor, so it anchors on the viewport center.
    fn zoom_by(&mut self, factor: f64) -> Vec<Action> {
        let next = self.camera.zoomed_at(self.viewport.center(), self.camera.zoom * factor, self.viewport);
        if (next.zoom - self.camera.zoom).abs() < f64::EPSILON {
            return Vec::new();
        }
        self.camera = next;
        vec![Action::RenderNeeded]
    }
}
