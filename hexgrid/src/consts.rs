//! Shared numeric constants for the hex grid kernel.

// ── Geometry ────────────────────────────────────────────────────

/// √3, used by the flat-top axial ↔ pixel conversions.
pub const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Fixed hex radius in world units used for all internal coordinate math.
pub const BASE_HEX_SIZE: f64 = 40.0;

/// Default visual hex radius in screen pixels at zoom 1.0.
pub const DEFAULT_TILE_SIZE: f64 = 50.0;

/// Largest radius `hex_range` and `hex_ring` enumerate; larger requests are
/// clamped so cell counts and offsets stay far inside `i32`/`usize`.
pub const MAX_HEX_RADIUS: u32 = 4096;

// ── Zoom ────────────────────────────────────────────────────────

/// Lower bound for the user zoom level.
pub const MIN_ZOOM: f64 = 0.5;

/// Upper bound for the user zoom level.
pub const MAX_ZOOM: f64 = 3.0;

/// Zoom multiplier applied per wheel notch (or shortcut) when zooming in.
pub const ZOOM_IN_FACTOR: f64 = 1.05;

/// Zoom multiplier applied per wheel notch (or shortcut) when zooming out.
pub const ZOOM_OUT_FACTOR: f64 = 0.95;

// ── Viewport ────────────────────────────────────────────────────

/// Cull margin as a multiple of the on-screen hex size.
pub const CULL_MARGIN_FACTOR: f64 = 2.0;

/// Screen pixels the camera moves per arrow-key press.
pub const KEYBOARD_PAN_STEP_PX: f64 = 50.0;

// ── Grid overlay ────────────────────────────────────────────────

/// Smallest radius (in cells) of the background grid around the view center.
pub const GRID_MIN_RADIUS: u32 = 10;

/// Extra rings added beyond what the viewport strictly needs.
pub const GRID_RADIUS_PADDING: u32 = 3;

/// Thinnest grid stroke, in screen pixels.
pub const GRID_MIN_STROKE_PX: f64 = 0.5;
