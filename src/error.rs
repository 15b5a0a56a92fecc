use thiserror::Error;

use crate::model::CellKind;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("algorithm not implemented yet: {key}")]
    NotImplemented { key: String },

    #[error("invalid grid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("place a {} cell before running a search", .kind.key())]
    MissingEndpoint { kind: CellKind },

    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl EngineError {
    #[must_use]
    pub fn not_implemented(key: impl Into<String>) -> Self {
        Self::NotImplemented { key: key.into() }
    }

    /// Short text for the notice banner.
    #[must_use]
    pub fn notice(&self) -> String {
        match self {
            Self::NotImplemented { .. } => "not implemented yet".to_string(),
            other => other.to_string(),
        }
    }
}
