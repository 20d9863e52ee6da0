//! Error types for Knoll

use thiserror::Error;

/// The main error type for Knoll operations
#[derive(Debug, Error)]
pub enum KnollError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Logic error: {0}")]
    LogicError(String),

    #[error("Degenerate texture coordinates in triangle touching ({row}, {col})")]
    DegenerateUv { row: usize, col: usize },

    #[error("Heightmap error: {0}")]
    HeightmapError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),
}

/// Result type alias for Knoll operations
pub type Result<T> = std::result::Result<T, KnollError>;

impl From<toml::de::Error> for KnollError {
    fn from(err: toml::de::Error) -> Self {
        KnollError::TomlParseError(err.to_string())
    }
}
