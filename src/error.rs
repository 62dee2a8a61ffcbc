//! Error types for notepager library.
//!
//! Parsing, measurement and pagination never fail; anomalies there are
//! reported as [`Diagnostic`](crate::layout::Diagnostic)s. The errors below
//! cover the outer surfaces: file I/O, configuration, fonts and rendering.

use std::io;
use thiserror::Error;

/// Result type alias for notepager operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur outside the layout core.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An aspect ratio string could not be parsed (expected "W:H").
    #[error("Invalid aspect ratio: {0}")]
    InvalidRatio(String),

    /// A font file could not be loaded or parsed.
    #[error("Font loading error: {0}")]
    FontLoad(String),

    /// Geometry configuration could not be read.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error during rendering (JSON, HTML, text).
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}
