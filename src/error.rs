//! Error types for the Floodgate crate.

use thiserror::Error;

/// Main error type for Floodgate operations.
///
/// Admission checks themselves are infallible; a denied request is a normal
/// result value, not an error. Only configuration loading can fail.
#[derive(Error, Debug)]
pub enum FloodgateError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Floodgate operations.
pub type Result<T> = std::result::Result<T, FloodgateError>;
