//! # mdstream
//!
//! Incremental markdown rendering for streaming terminal output.
//!
//! Built for LLM-style token streams: the caller repeatedly hands over the
//! whole text accumulated so far, and the stream keeps the terminal in sync
//! without reprinting what the user already saw and without flicker.
//!
//! ## Core Concepts
//!
//! - **Stable prefix**: rendered lines that are committed once to scrollback
//! - **Live window**: the last few lines, repainted in place on each update
//! - **Adaptive throttling**: update rate tracks the cost of rendering
//! - **Diagram links**: mermaid blocks get a link to an online viewer
//!
//! ## Example
//!
//! ```rust,no_run
//! use mdstream::{MarkdownOptions, MarkdownStream};
//!
//! let mut stream = MarkdownStream::stdout(MarkdownOptions::default());
//! let mut text = String::new();
//! for token in ["# Plan\n\n", "1. Read ", "the code\n"] {
//!     text.push_str(token);
//!     stream.update(&text, false)?;
//! }
//! stream.update(&text, true)?;
//! # Ok::<(), mdstream::StreamError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod diagram;
pub mod error;
pub mod render;
pub mod stream;
pub mod terminal;

// Re-exports for convenience
pub use error::{Result, StreamError};
pub use render::{InlineStyle, LineRenderer, MarkdownOptions, MarkdownRenderer};
pub use stream::{MarkdownStream, StreamConfig, Update};
pub use terminal::{LiveTerminal, OutputBuffer, RecordingSurface, Surface};
