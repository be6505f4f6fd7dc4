//! Planner error type.

/// Errors produced by map persistence, import and template operations.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Reading or writing the backing store failed.
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// A document could not be encoded or decoded as JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Imported text parsed, but is not a map document.
    #[error("invalid map format: {0}")]
    InvalidMap(String),

    /// A template example references a tile type the template does not define.
    #[error("tile type {0} not found in template")]
    UnknownTileType(String),

    /// No template example with this name.
    #[error("template example not found: {0}")]
    UnknownExample(String),

    /// No template file with this id.
    #[error("template not found: {0}")]
    UnknownTemplate(String),

    /// No stored map with this id.
    #[error("map not found: {0}")]
    MapNotFound(String),
}

impl PlannerError {
    /// Stable machine-readable code for the host UI.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "E_IO",
            Self::Json(_) => "E_JSON",
            Self::InvalidMap(_) => "E_INVALID_MAP",
            Self::UnknownTileType(_) => "E_UNKNOWN_TILE_TYPE",
            Self::UnknownExample(_) => "E_UNKNOWN_EXAMPLE",
            Self::UnknownTemplate(_) => "E_UNKNOWN_TEMPLATE",
            Self::MapNotFound(_) => "E_MAP_NOT_FOUND",
        }
    }
}
