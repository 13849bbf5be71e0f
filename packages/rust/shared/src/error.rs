//! Error types for tokentint.
//!
//! Library crates use [`TokenTintError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all tokentint operations.
#[derive(Debug, thiserror::Error)]
pub enum TokenTintError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP error while fetching a logo.
    #[error("network error: {0}")]
    Network(String),

    /// Image decoding or analysis error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Malformed color value (bad hex string).
    #[error("color error: {message}")]
    Color { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (malformed token list, missing fields, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TokenTintError>;

impl TokenTintError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a color error from any displayable message.
    pub fn color(msg: impl Into<String>) -> Self {
        Self::Color {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
