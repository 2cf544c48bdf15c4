//! Error types for hashchain

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("Index out of bounds: block {index} does not exist in a chain of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("Index out of bounds: block index {0} is negative")]
    NegativeIndex(i64),
    #[error("Cannot build a chain without a genesis block")]
    EmptyChain,
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Convenience alias used across the crate
pub type Result<T> = std::result::Result<T, ChainError>;
