//! Error types for the intake and triage engine
//!
//! Defines module-specific error types using thiserror for clear error
//! propagation. Capture *outcomes* (a failed geolocation attempt, a denied
//! microphone) are surfaced as session state where the component contract
//! says so; these variants cover the boundaries where a `Result` is the
//! right shape: acquisition, validation, configuration, and auth.

use thiserror::Error;

/// Main error type for the citypulse engine
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file loading or parsing errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors (config loading)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Device capability missing (no geolocation, no audio input)
    #[error("Capture unavailable: {0}")]
    CaptureUnavailable(String),

    /// Device permission refused by the user or platform
    #[error("Capture denied: {0}")]
    CaptureDenied(String),

    /// Capture request exceeded its time bound
    #[error("Capture timed out: {0}")]
    CaptureTimeout(String),

    /// Operation not valid in the component's current state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Invalid user input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Submission blocked by the report content invariant
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Rejected login attempt at an auth gate
    #[error("Authentication failed: {0}")]
    Auth(String),
}

/// Convenience Result type using the citypulse Error
pub type Result<T> = std::result::Result<T, Error>;
