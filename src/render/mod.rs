//! Line rendering: turning accumulated text into display lines.
//!
//! The stream only needs one capability from a renderer: given the full
//! text, produce a flat list of display lines, each ending with `\n`. The
//! [`LineRenderer`] trait captures that; [`MarkdownRenderer`] is the
//! implementation used by default.
//!
//! # Example
//!
//! ```rust
//! use mdstream::render::{LineRenderer, MarkdownOptions, MarkdownRenderer};
//!
//! let renderer = MarkdownRenderer::new(MarkdownOptions::default().plain());
//! let lines = renderer.render_lines("# Title\n\nBody text");
//! assert_eq!(lines, ["Title\n", "\n", "Body text\n"]);
//! ```

mod markdown;
mod options;
mod style;

pub use markdown::MarkdownRenderer;
pub use options::MarkdownOptions;
pub use style::InlineStyle;

/// Renders text into display lines.
///
/// Implementations must be deterministic: the same input always yields the
/// same lines.
pub trait LineRenderer {
    /// Render `text` into lines, each terminated by `\n`.
    fn render_lines(&self, text: &str) -> Vec<String>;
}

impl<F> LineRenderer for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn render_lines(&self, text: &str) -> Vec<String> {
        self(text)
    }
}
