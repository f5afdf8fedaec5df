//! Error type shared by the stream, the diagram helper and the surfaces.

use std::io;
use thiserror::Error;

/// Errors produced while streaming markdown to a surface.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The stream already received its final update or was torn down.
    #[error("markdown stream is closed")]
    Closed,

    /// Writing to the surface (or compressing a diagram) failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// The diagram envelope could not be serialized.
    #[error("failed to encode diagram envelope: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StreamError>;
