#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point, Viewport};
use crate::doc::{TileId, TileStore};
use crate::hex::Axial;

/// Result of resolving a screen point against the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    /// The cell under the pointer.
    pub cell: Axial,
    /// The tile occupying that cell, if any.
    pub tile_id: Option<TileId>,
}

impl Hit {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tile_id.is_none()
    }
}

/// Resolve `screen_pt` to its cell and the tile sitting there.
///
/// Containment is decided by rounding, so a point exactly on a shared edge
/// goes to whichever cell the rounding tie-break picks.
#[must_use]
pub fn hit_test(screen_pt: Point, store: &TileStore, camera: &Camera, viewport: Viewport) -> Hit {
    let cell = camera.screen_to_cell(screen_pt, viewport);
    Hit { cell, tile_id: store.tile_at(cell).map(|t| t.id.clone()) }
}
