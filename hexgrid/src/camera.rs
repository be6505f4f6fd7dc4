#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use serde::{Deserialize, Serialize};

use crate::consts::{BASE_HEX_SIZE, CULL_MARGIN_FACTOR, DEFAULT_TILE_SIZE, MAX_ZOOM, MIN_ZOOM};
use crate::hex::{Axial, axial_to_pixel, pixel_to_axial};

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Screen-space center of the viewport.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Camera state for pan/zoom over the infinite hex plane.
///
/// `pan_x` / `pan_y` are a screen-space offset in CSS pixels, measured from
/// the viewport center. `zoom` is the user zoom (clamped to
/// [`MIN_ZOOM`]..=[`MAX_ZOOM`]). `tile_size` is the configured on-screen hex
/// radius at zoom 1.0; world coordinates always use [`BASE_HEX_SIZE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
    pub tile_size: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, tile_size: DEFAULT_TILE_SIZE }
    }
}

impl Camera {
    /// Single scale factor from world units to screen pixels.
    ///
    /// Every rendered primitive must use this (or [`Self::screen_hex_size`])
    /// so tiles, grid lines and icons stay co-registered.
    #[must_use]
    pub fn total_zoom(&self) -> f64 {
        self.tile_size / BASE_HEX_SIZE * self.zoom
    }

    /// On-screen hex radius in pixels.
    #[must_use]
    pub fn screen_hex_size(&self) -> f64 {
        self.tile_size * self.zoom
    }

    /// Convert a world-space point to screen coordinates: scale, pan, re-center.
    #[must_use]
    pub fn world_to_screen(&self, world: Point, viewport: Viewport) -> Point {
        let total = self.total_zoom();
        Point {
            x: world.x * total + self.pan_x + viewport.width / 2.0,
            y: world.y * total + self.pan_y + viewport.height / 2.0,
        }
    }

    /// Convert a screen-space point (CSS pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, viewport: Viewport) -> Point {
        let total = self.total_zoom();
        Point {
            x: (screen.x - viewport.width / 2.0 - self.pan_x) / total,
            y: (screen.y - viewport.height / 2.0 - self.pan_y) / total,
        }
    }

    /// Screen position of the center of `cell`.
    #[must_use]
    pub fn cell_to_screen(&self, cell: Axial, viewport: Viewport) -> Point {
        self.world_to_screen(axial_to_pixel(cell, BASE_HEX_SIZE), viewport)
    }

    /// Cell under a screen-space point.
    #[must_use]
    pub fn screen_to_cell(&self, screen: Point, viewport: Viewport) -> Axial {
        pixel_to_axial(self.screen_to_world(screen, viewport), BASE_HEX_SIZE)
    }

    /// Camera moved by a screen-space delta.
    #[must_use]
    pub fn panned_by(self, dx: f64, dy: f64) -> Self {
        Self { pan_x: self.pan_x + dx, pan_y: self.pan_y + dy, ..self }
    }

    /// Camera at `new_zoom` (clamped) that keeps the world point under
    /// `anchor` fixed on screen.
    ///
    /// Zoom and pan change together in the returned value; callers replace
    /// the whole camera at once. The pan is scaled along with the zoom so the
    /// anchor holds for any starting offset, not only a centered camera.
    #[must_use]
    pub fn zoomed_at(self, anchor: Point, new_zoom: f64, viewport: Viewport) -> Self {
        let zoom = clamp_zoom(new_zoom);
        let ratio = zoom / self.zoom;
        let center = viewport.center();
        Self {
            pan_x: self.pan_x * ratio + (anchor.x - center.x) * (1.0 - ratio),
            pan_y: self.pan_y * ratio + (anchor.y - center.y) * (1.0 - ratio),
            zoom,
            ..self
        }
    }

    /// Origin pan and zoom 1.0, keeping the configured tile size.
    #[must_use]
    pub fn reset(self) -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0, ..self }
    }

    /// Off-screen slack, in pixels, before an object is culled.
    #[must_use]
    pub fn cull_margin(&self) -> f64 {
        self.tile_size * self.zoom * CULL_MARGIN_FACTOR
    }

    /// Coarse visibility test for an object centered at `screen`.
    #[must_use]
    pub fn is_visible(&self, screen: Point, viewport: Viewport) -> bool {
        let m = self.cull_margin();
        screen.x > -m && screen.x < viewport.width + m && screen.y > -m && screen.y < viewport.height + m
    }
}

/// Clamp a user zoom level to the supported range.
#[must_use]
pub fn clamp_zoom(zoom: f64) -> f64 {
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}
