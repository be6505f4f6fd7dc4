//! Hex grid kernel for the hex map planner.
//!
//! Pure flat-top hex math, the camera transform that maps world positions to
//! screen pixels, and the interaction engine that turns raw pointer and
//! keyboard input into tile operations. The host application owns the map
//! itself; it feeds tiles in, forwards DOM events, and commits the
//! [`engine::Action`]s that come back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`hex`] | Axial/cube/pixel conversions, rounding, distance, ranges, rings, polygons |
//! | [`camera`] | Pan/zoom camera, world ↔ screen conversions, culling |
//! | [`engine`] | Gesture resolution: place, select, remove, drag, pan, zoom |
//! | [`input`] | Modes, modifiers, buttons, and the gesture state machine |
//! | [`hit`] | Screen point → cell and occupant |
//! | [`doc`] | Tile, tile type and add-on values plus the tile store |
//! | [`render`] | Visible-set filter and grid cells for the presentation layer |
//! | [`icon`] | Symbolic icon registry |
//! | [`consts`] | Shared numeric constants (base size, zoom limits, etc.) |

pub mod camera;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod hex;
pub mod hit;
pub mod icon;
pub mod input;
pub mod render;
