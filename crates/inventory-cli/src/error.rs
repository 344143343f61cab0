//! Error types for the inventory CLI
//!
//! User-facing error types with messages that say what went wrong and, where
//! possible, how to fix it.

use inventory_common::InventoryError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Error type for store and CLI operations
#[derive(Error, Debug)]
pub enum CliError {
    /// Datastore operation failed
    #[error("Database error: {0}. Check that the datastore file is readable and writable.")]
    Database(#[from] rusqlite::Error),

    /// File system operation failed
    #[error("File operation failed: {0}. Check file permissions and disk space.")]
    Io(#[from] std::io::Error),

    /// Configuration is missing or invalid
    #[error("Configuration error: {0}. Check your environment variables or command-line flags.")]
    Config(String),

    /// Authentication could not be carried out
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Input rejected before reaching the store
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Interactive prompt failed or was cancelled
    #[error("Prompt failed: {0}")]
    Prompt(#[from] inquire::InquireError),

    /// Error from the shared library
    #[error(transparent)]
    Common(#[from] InventoryError),

    /// JSON serialization failed
    #[error("Failed to serialize JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Generic anyhow error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the user backed out of a prompt (Esc or Ctrl-C)
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::Prompt(
                inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted
            )
        )
    }
}
