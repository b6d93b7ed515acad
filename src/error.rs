//! Error types for the VRAM probe

use std::io;
use thiserror::Error;

/// Result type alias for probe operations
pub type Result<T> = std::result::Result<T, ProbeError>;

/// Error type for provider failures
///
/// Resolution routines consume these internally and convert them into
/// diagnostic notes; they never escape past the routine boundary.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Registry access error
    #[error("Registry error: {0}")]
    Registry(String),

    /// Performance-counter subsystem error
    #[error("Counter error: {0}")]
    Counter(String),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unsupported platform
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// System error
    #[error("System error: {0}")]
    System(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}
