//! Hex map planner: the map document and everything around the kernel.
//!
//! [`hexgrid`] resolves gestures into tile operations; this crate owns the
//! map those operations apply to and the ways a map is kept: the session
//! store, the saved-map library, JSON import/export, templates and auto-save.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`map`] | `HexMap`, `MapConfig`, `MapSummary`, default palettes |
//! | [`session`] | Open map, palette selection, cascading palette edits |
//! | [`storage`] | Key-value backends and the map library |
//! | [`exchange`] | JSON export and validated import |
//! | [`template`] | Template files, discovery and instantiation |
//! | [`autosave`] | Interval-driven auto-save |
//! | [`config`] | Environment configuration |

pub mod autosave;
pub mod config;
pub mod error;
pub mod exchange;
pub mod map;
pub mod session;
pub mod storage;
pub mod template;

pub use error::PlannerError;
