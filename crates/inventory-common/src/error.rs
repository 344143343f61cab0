//! Error types shared across the inventory workspace

use thiserror::Error;

/// Result type alias for common operations
pub type Result<T> = std::result::Result<T, InventoryError>;

/// Main error type for the common crate
#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed stored credential: {0}")]
    Credential(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
