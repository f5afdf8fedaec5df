//! Markdown Stream: incremental rendering of a growing document.
//!
//! The stream receives the *whole* text accumulated so far on every call,
//! re-renders it from scratch, and splits the rendered lines in two:
//!
//! 1. **Stable prefix**: committed to the surface once, never rewritten.
//!    Committed lines end up in the terminal's normal scrollback.
//! 2. **Live window**: the last `live_window` lines, which later text may
//!    still change (an unclosed code fence, a word being wrapped). They are
//!    repainted in place on every accepted update.
//!
//! # Example
//!
//! ```rust
//! use mdstream::{MarkdownOptions, MarkdownRenderer, MarkdownStream, RecordingSurface};
//!
//! let renderer = MarkdownRenderer::new(MarkdownOptions::default().plain());
//! let mut stream = MarkdownStream::new(renderer, RecordingSurface::new());
//!
//! let mut text = String::new();
//! for chunk in ["# Hello\n\n", "Streaming ", "tokens..."] {
//!     text.push_str(chunk);
//!     stream.update(&text, false).unwrap();
//! }
//! stream.update(&text, true).unwrap();
//!
//! assert_eq!(stream.surface().committed(), "Hello\n\nStreaming tokens...\n");
//! ```

mod throttle;
mod window;

pub use throttle::Throttle;
pub use window::{split, Split};

use crate::diagram;
use crate::error::{Result, StreamError};
use crate::render::{LineRenderer, MarkdownOptions, MarkdownRenderer};
use crate::terminal::{LiveTerminal, Surface};
use std::borrow::Cow;
use std::io::Stdout;
use std::time::{Duration, Instant};

/// Configuration for a markdown stream.
#[derive(Debug, Clone)]
pub struct StreamConfig {
    /// Trailing lines kept live (never committed) while streaming.
    pub live_window: usize,
    /// Lower bound of the adaptive delay between accepted updates.
    pub min_delay: Duration,
    /// Upper bound of the adaptive delay between accepted updates.
    pub max_delay: Duration,
    /// Whether to append viewer links after mermaid blocks.
    pub diagram_links: bool,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            live_window: 6,
            // 20 fps
            min_delay: Duration::from_millis(50),
            // 0.5 fps
            max_delay: Duration::from_secs(2),
            diagram_links: true,
        }
    }
}

/// Outcome of [`MarkdownStream::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    /// Arrived sooner than the adaptive delay; nothing happened.
    Throttled,
    /// Rendered while streaming.
    Rendered {
        /// Lines committed by this call.
        committed: usize,
        /// Lines now in the live region.
        live: usize,
    },
    /// Final render; the stream is closed.
    Finished {
        /// Lines committed by this call.
        committed: usize,
    },
}

/// Incremental renderer for one stream of markdown.
///
/// Create one per stream, call [`update`](Self::update) with the growing
/// text, and finish with `update(text, true)`. Dropping the stream without a
/// final update clears the live region.
pub struct MarkdownStream<R: LineRenderer, S: Surface> {
    /// Turns text into display lines.
    renderer: R,
    /// Where commits and repaints go.
    surface: S,
    /// Configuration.
    config: StreamConfig,
    /// Adaptive rate limiter.
    throttle: Throttle,
    /// Lines already committed.
    printed: Vec<String>,
    /// Set after the final update or teardown.
    closed: bool,
}

impl MarkdownStream<MarkdownRenderer, LiveTerminal<Stdout>> {
    /// Stream to stdout with the default configuration.
    ///
    /// The wrap width is capped at the terminal width.
    pub fn stdout(mut options: MarkdownOptions) -> Self {
        let surface = LiveTerminal::stdout();
        if options.width > surface.width() {
            options.width = surface.width();
        }
        Self::new(MarkdownRenderer::new(options), surface)
    }
}

impl<R: LineRenderer, S: Surface> MarkdownStream<R, S> {
    /// Create a stream with the default configuration.
    pub fn new(renderer: R, surface: S) -> Self {
        Self::with_config(renderer, surface, StreamConfig::default())
    }

    /// Create a stream with a custom configuration.
    pub fn with_config(renderer: R, surface: S, config: StreamConfig) -> Self {
        Self {
            throttle: Throttle::new(config.min_delay, config.max_delay),
            renderer,
            surface,
            config,
            printed: Vec::new(),
            closed: false,
        }
    }

    /// Get the configuration.
    pub const fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Get the renderer.
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Get a mutable reference to the renderer (e.g. to change its width).
    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Get the surface.
    pub const fn surface(&self) -> &S {
        &self.surface
    }

    /// Lines committed so far.
    pub fn printed(&self) -> &[String] {
        &self.printed
    }

    /// Current minimum interval between accepted updates.
    pub const fn delay(&self) -> Duration {
        self.throttle.delay()
    }

    /// Whether the stream has been finalized or torn down.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Render the full accumulated `text`.
    ///
    /// Non-final calls arriving sooner than the adaptive delay are dropped
    /// ([`Update::Throttled`]); call again later with more text. The final
    /// call is never throttled, commits everything and closes the stream.
    pub fn update(&mut self, text: &str, is_final: bool) -> Result<Update> {
        self.update_at(text, is_final, Instant::now())
    }

    fn update_at(&mut self, text: &str, is_final: bool, now: Instant) -> Result<Update> {
        if self.closed {
            return Err(StreamError::Closed);
        }
        if !self.throttle.admit(now, is_final) {
            tracing::trace!(delay = ?self.throttle.delay(), "update throttled");
            return Ok(Update::Throttled);
        }

        let started = Instant::now();
        let mut lines = self.render(text)?;
        let render_time = started.elapsed();
        self.throttle.record(render_time);

        let split = window::split(
            lines.len(),
            self.printed.len(),
            self.config.live_window,
            is_final,
        );
        let live_lines = lines.len() - split.stable;
        let live = if is_final {
            String::new()
        } else {
            lines[split.stable..].concat()
        };

        let mut committed = 0;
        let mut outcome = Ok(());
        if let Some((from, to)) = split.commit {
            let block = lines[from..to].concat();
            outcome = self.surface.commit(&block);
            if outcome.is_ok() {
                committed = to - from;
                lines.truncate(to);
                self.printed = lines;
            }
        }

        tracing::debug!(
            committed,
            live = live_lines,
            printed = self.printed.len(),
            render_us = u64::try_from(render_time.as_micros()).unwrap_or(u64::MAX),
            is_final,
            "stream update"
        );

        if is_final {
            self.closed = true;
            let closed = self.surface.close();
            outcome?;
            closed?;
            return Ok(Update::Finished { committed });
        }

        outcome?;
        self.surface.repaint(&live)?;
        Ok(Update::Rendered {
            committed,
            live: live_lines,
        })
    }

    fn render(&self, text: &str) -> Result<Vec<String>> {
        let _span = tracing::trace_span!("render", bytes = text.len()).entered();
        let text = if self.config.diagram_links {
            diagram::augment(text)?
        } else {
            Cow::Borrowed(text)
        };
        Ok(self.renderer.render_lines(&text))
    }

    /// Tear down the live region without a final render.
    ///
    /// Idempotent. Failures are logged and discarded.
    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;
        if let Err(err) = self.surface.close() {
            tracing::debug!(error = %err, "closing stream surface failed");
        }
    }
}

impl<R: LineRenderer, S: Surface> Drop for MarkdownStream<R, S> {
    fn drop(&mut self) {
        self.close();
    }
}
