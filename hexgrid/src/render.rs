//! Scene building: what to draw, and where, for the current camera.
//!
//! This module never draws. It turns the tile store and camera into
//! screen-space primitives (hex outlines, icon anchors, grid cells) that a
//! presentation layer paints as-is. All sizes come from
//! [`Camera::screen_hex_size`] so tiles, grid and icons line up at every zoom.
//!
//! Layers, bottom first:
//! 1. background grid around the view center
//! 2. visible tiles, the selected one last so it paints on top

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::camera::{Camera, Point, Viewport};
use crate::consts::{GRID_MIN_RADIUS, GRID_MIN_STROKE_PX, GRID_RADIUS_PADDING, SQRT_3};
use crate::doc::{TileId, TileStore};
use crate::engine::Engine;
use crate::hex::{Axial, PathCommand, hex_polygon_path, hex_range};
use crate::icon::Icon;

/// A tile ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub id: TileId,
    pub cell: Axial,
    /// Screen-space center.
    pub screen: Point,
    /// On-screen hex radius.
    pub size: f64,
    /// Screen-space outline.
    pub path: Vec<PathCommand>,
    /// CSS fill color of the tile type.
    pub fill: String,
    /// Tile type icon, if the type names one.
    pub icon: Option<Icon>,
    /// Icons of the stacked add-ons, in stacking order.
    pub add_on_icons: Vec<Icon>,
    pub selected: bool,
}

/// One outline of the background grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub cell: Axial,
    pub screen: Point,
    pub path: Vec<PathCommand>,
}

/// Everything needed to paint one frame.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub grid: Vec<GridCell>,
    /// Grid stroke width in screen pixels.
    pub grid_stroke: f64,
    pub tiles: Vec<TileView>,
}

impl Scene {
    /// Build the scene for the engine's current camera, viewport and tiles.
    #[must_use]
    pub fn build(engine: &Engine, show_grid: bool) -> Self {
        let camera = engine.camera();
        let grid = if show_grid { grid_cells(&camera, engine.viewport) } else { Vec::new() };
        Self {
            grid,
            grid_stroke: grid_stroke_width(camera.screen_hex_size()),
            tiles: visible_tiles(&engine.doc, &camera, engine.viewport, engine.selection().map(String::as_str)),
        }
    }
}

/// Tiles whose screen centers fall inside the padded viewport, selected last.
#[must_use]
pub fn visible_tiles(store: &TileStore, camera: &Camera, viewport: Viewport, selected: Option<&str>) -> Vec<TileView> {
    let size = camera.screen_hex_size();
    let mut views: Vec<TileView> = store
        .sorted_tiles()
        .into_iter()
        .filter_map(|tile| {
            let screen = camera.cell_to_screen(tile.position, viewport);
            if !camera.is_visible(screen, viewport) {
                return None;
            }
            Some(TileView {
                id: tile.id.clone(),
                cell: tile.position,
                screen,
                size,
                path: hex_polygon_path(screen, size),
                fill: tile.tile_type.color.clone(),
                icon: tile.tile_type.icon.as_deref().map(Icon::from_name),
                add_on_icons: tile.add_ons.iter().map(|a| Icon::from_name(&a.icon)).collect(),
                selected: selected == Some(tile.id.as_str()),
            })
        })
        .collect();
    // Stable sort keeps draw order among unselected tiles.
    views.sort_by_key(|v| v.selected);
    views
}

/// Grid outlines covering the viewport around the world point at its center.
#[must_use]
pub fn grid_cells(camera: &Camera, viewport: Viewport) -> Vec<GridCell> {
    let size = camera.screen_hex_size();
    let center = camera.screen_to_cell(viewport.center(), viewport);
    hex_range(center, grid_radius(viewport, size))
        .into_iter()
        .map(|cell| {
            let screen = camera.cell_to_screen(cell, viewport);
            GridCell { cell, screen, path: hex_polygon_path(screen, size) }
        })
        .collect()
}

/// Rings needed around the center cell to cover the viewport with some slack.
#[must_use]
pub fn grid_radius(viewport: Viewport, screen_hex_size: f64) -> u32 {
    let across = cells_needed(viewport.width, SQRT_3 * screen_hex_size);
    let down = cells_needed(viewport.height, 2.0 * screen_hex_size);
    (across + GRID_RADIUS_PADDING)
        .max(down + GRID_RADIUS_PADDING)
        .max(GRID_MIN_RADIUS)
}

/// Grid stroke that thickens with the hex size.
#[must_use]
pub fn grid_stroke_width(screen_hex_size: f64) -> f64 {
    GRID_MIN_STROKE_PX.max(screen_hex_size / 50.0)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cells_needed(extent: f64, cell_extent: f64) -> u32 {
    (extent / cell_extent).ceil().max(0.0) as u32
}
