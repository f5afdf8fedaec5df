//! In-memory surface for headless use and tests.

use super::{closed_error, Surface};
use std::io;

/// A surface that records what would have reached the screen.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    /// Everything committed, concatenated.
    committed: String,
    /// Current live region content.
    live: String,
    /// Number of commit operations.
    commits: usize,
    /// Number of repaint operations.
    repaints: usize,
    /// Number of close calls that actually closed the surface.
    closes: usize,
    /// Set once `close` ran.
    closed: bool,
}

impl RecordingSurface {
    /// Create an empty recording surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed text, in order.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Committed text split into lines (terminators kept).
    pub fn committed_lines(&self) -> Vec<&str> {
        self.committed.split_inclusive('\n').collect()
    }

    /// Current live region content.
    pub fn live(&self) -> &str {
        &self.live
    }

    /// Number of commit operations so far.
    pub const fn commits(&self) -> usize {
        self.commits
    }

    /// Number of repaint operations so far.
    pub const fn repaints(&self) -> usize {
        self.repaints
    }

    /// Number of times the surface was closed (0 or 1).
    pub const fn closes(&self) -> usize {
        self.closes
    }

    /// Whether the surface was closed.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// What a viewer would see: the committed log followed by the live region.
    pub fn transcript(&self) -> String {
        let mut out = String::with_capacity(self.committed.len() + self.live.len());
        out.push_str(&self.committed);
        out.push_str(&self.live);
        out
    }
}

impl Surface for RecordingSurface {
    fn commit(&mut self, text: &str) -> io::Result<()> {
        if self.closed {
            return Err(closed_error());
        }
        self.committed.push_str(text);
        self.commits += 1;
        Ok(())
    }

    fn repaint(&mut self, text: &str) -> io::Result<()> {
        if self.closed {
            return Err(closed_error());
        }
        self.live.clear();
        self.live.push_str(text);
        self.repaints += 1;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        if !self.closed {
            self.closed = true;
            self.closes += 1;
            self.live.clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_surface_tracks_operations() {
        let mut surface = RecordingSurface::new();
        surface.commit("a\n").unwrap();
        surface.repaint("b\n").unwrap();
        surface.repaint("c\n").unwrap();

        assert_eq!(surface.committed(), "a\n");
        assert_eq!(surface.live(), "c\n");
        assert_eq!(surface.commits(), 1);
        assert_eq!(surface.repaints(), 2);
        assert_eq!(surface.transcript(), "a\nc\n");
    }

    #[test]
    fn test_recording_surface_rejects_writes_after_close() {
        let mut surface = RecordingSurface::new();
        surface.repaint("live\n").unwrap();
        surface.close().unwrap();
        surface.close().unwrap();

        assert_eq!(surface.closes(), 1);
        assert!(surface.live().is_empty());
        assert!(surface.commit("x\n").is_err());
        assert!(surface.repaint("x\n").is_err());
    }
}
