//! Input model: editing modes, modifier keys, mouse buttons, and the gesture state machine.
//!
//! `Mode` and `Modifiers` capture the user's intent at the time of a pointer
//! event. `InputState` is the active gesture tracked between pointer-down and
//! pointer-up (or pointer-leave), carrying what the engine needs to compute
//! the next step of a pan or a tile drag.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::doc::{TileId, TileType};
use crate::hex::Axial;

/// What a primary click on the grid does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Place a tile of the selected type on an empty cell (default).
    #[default]
    Add,
    /// Select the tile under the pointer, or clear the selection.
    Select,
    /// Press on a tile and drag it to another empty cell.
    Drag,
    /// Drag to move the camera.
    Pan,
    /// Delete the tile under the pointer.
    Remove,
}

impl Mode {
    /// Mode bound to a single-key shortcut (`a`, `s`, `m`, `p`, `x`).
    #[must_use]
    pub fn from_shortcut(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "a" => Some(Self::Add),
            "s" => Some(Self::Select),
            "m" => Some(Self::Drag),
            "p" => Some(Self::Pan),
            "x" => Some(Self::Remove),
            _ => None,
        }
    }

    /// Whether the current tile selection survives switching into this mode.
    #[must_use]
    pub fn keeps_selection(self) -> bool {
        matches!(self, Self::Select | Self::Drag)
    }

    /// CSS cursor shown while idle in this mode.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Add => "crosshair",
            Self::Select => "pointer",
            Self::Drag => "move",
            Self::Pan => "grab",
            Self::Remove => "not-allowed",
        }
    }
}

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Command on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser
/// (e.g. `" "`, `"r"`, `"ArrowUp"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    #[must_use]
    pub fn is_space(&self) -> bool {
        self.0 == " " || self.0 == "Space"
    }
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down = zoom out).
    pub dy: f64,
}

/// Persistent UI state visible to the renderer.
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Current editing mode.
    pub mode: Mode,
    /// The id of the currently selected tile, if any.
    pub selected_id: Option<TileId>,
    /// Tile type stamped by a click in add mode.
    pub tile_type: Option<TileType>,
    /// Space bar is held down (turns a primary press into a pan).
    pub space_held: bool,
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the camera.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// The user is dragging a tile across the grid.
    DraggingTile {
        /// Id of the tile being dragged.
        id: TileId,
        /// Cell the tile occupies now (after any accepted moves).
        cell: Axial,
    },
}

impl InputState {
    /// Whether a pan or drag is in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}
