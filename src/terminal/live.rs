//! `LiveTerminal`: inline live region on a real terminal.
//!
//! Committed text is written into the normal output flow, so it lands in the
//! terminal's scrollback. The live region is kept below it and redrawn by
//! moving the cursor back over it and erasing to the end of the screen.

use super::output::{crop_rows, line_rows, OutputBuffer};
use super::{closed_error, Surface};
use crossterm::terminal;
use std::io::{self, Stdout, Write};

/// Fallback size when the terminal size cannot be queried.
const FALLBACK_SIZE: (u16, u16) = (80, 24);

/// A terminal surface with a repaintable region at the bottom.
pub struct LiveTerminal<W: Write> {
    /// Destination for all output.
    writer: W,
    /// Scratch buffer, flushed once per operation.
    out: OutputBuffer,
    /// Terminal width in columns.
    width: u16,
    /// Terminal height in rows.
    height: u16,
    /// Current live region content, as drawn.
    live: String,
    /// Rows the live region currently occupies on screen.
    live_rows: usize,
    /// Whether we hid the cursor.
    cursor_hidden: bool,
    /// Set once `close` ran.
    closed: bool,
}

impl LiveTerminal<Stdout> {
    /// Create a live terminal on stdout, sized to the current terminal.
    pub fn stdout() -> Self {
        let (width, height) = terminal::size().unwrap_or(FALLBACK_SIZE);
        Self::new(io::stdout(), width, height)
    }
}

impl<W: Write> LiveTerminal<W> {
    /// Create a live terminal writing to `writer`.
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        Self {
            writer,
            out: OutputBuffer::new(),
            width,
            height,
            live: String::new(),
            live_rows: 0,
            cursor_hidden: false,
            closed: false,
        }
    }

    /// Update the terminal size.
    ///
    /// Call this when the terminal is resized. Takes effect on the next draw.
    pub const fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Terminal width in columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Terminal height in rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Rows the live region occupies.
    pub const fn live_rows(&self) -> usize {
        self.live_rows
    }

    /// Whether the terminal was closed.
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get a reference to the underlying writer.
    pub const fn writer(&self) -> &W {
        &self.writer
    }

    /// Most rows the live region may use: one row is left for the cursor.
    fn max_live_rows(&self) -> usize {
        usize::from(self.height.saturating_sub(1)).max(1)
    }

    /// Queue the sequence that erases the live region.
    fn erase_live(&mut self) {
        if self.live_rows == 0 {
            return;
        }
        let rows = u16::try_from(self.live_rows).unwrap_or(u16::MAX);
        self.out.cursor_up(rows);
        self.out.erase_below();
        self.live_rows = 0;
    }

    /// Queue the live content, cropped to the rows the terminal can show.
    fn draw_live(&mut self) {
        if self.live.is_empty() {
            return;
        }

        let lines: Vec<&str> = self.live.split_inclusive('\n').collect();
        let max_rows = self.max_live_rows();

        // Keep the tail: the newest content is what changes. A line that only
        // partly fits is cropped to its last rows.
        let mut rows = 0;
        let mut start = lines.len();
        let mut partial = None;
        while start > 0 {
            let line = lines[start - 1];
            let needed = line_rows(line, self.width);
            if rows + needed > max_rows {
                if rows < max_rows {
                    partial = Some(crop_rows(line, self.width, max_rows - rows));
                    rows = max_rows;
                }
                break;
            }
            rows += needed;
            start -= 1;
        }

        if let Some(line) = partial {
            self.out.write_line_block(&line);
        }
        for line in &lines[start..] {
            self.out.write_line_block(line);
        }
        self.live_rows = rows;
    }

    /// Hide the cursor on first output so it does not flicker over the region.
    fn hide_cursor_once(&mut self) {
        if !self.cursor_hidden {
            self.out.cursor_hide();
            self.cursor_hidden = true;
        }
    }

    /// Flush the scratch buffer in a single write.
    fn flush(&mut self) -> io::Result<()> {
        let result = self.out.flush_to(&mut self.writer);
        self.out.clear();
        result
    }
}

impl<W: Write> Surface for LiveTerminal<W> {
    fn commit(&mut self, text: &str) -> io::Result<()> {
        if self.closed {
            return Err(closed_error());
        }
        self.out.begin_sync();
        self.hide_cursor_once();
        self.erase_live();
        self.out.write_line_block(text);
        self.draw_live();
        self.out.end_sync();
        self.flush()
    }

    fn repaint(&mut self, text: &str) -> io::Result<()> {
        if self.closed {
            return Err(closed_error());
        }
        self.out.begin_sync();
        self.hide_cursor_once();
        self.erase_live();
        self.live.clear();
        self.live.push_str(text);
        self.draw_live();
        self.out.end_sync();
        self.flush()
    }

    fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        self.erase_live();
        self.live.clear();
        self.out.reset_attrs();
        if self.cursor_hidden {
            self.out.cursor_show();
            self.cursor_hidden = false;
        }
        self.flush()
    }
}

impl<W: Write> Drop for LiveTerminal<W> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            tracing::debug!(error = %err, "live terminal cleanup failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feed everything the terminal wrote through a VT100 emulator.
    fn screen(term: &LiveTerminal<Vec<u8>>) -> vt100::Parser {
        let mut parser = vt100::Parser::new(term.height(), term.width(), 100);
        // vt100 expects CRLF semantics; the live terminal relies on the
        // tty's onlcr translation.
        let bytes = String::from_utf8_lossy(term.writer()).replace('\n', "\r\n");
        parser.process(bytes.as_bytes());
        parser
    }

    fn rows(parser: &vt100::Parser) -> Vec<String> {
        parser
            .screen()
            .rows(0, parser.screen().size().1)
            .map(|row| row.trim_end().to_string())
            .collect()
    }

    #[test]
    fn test_repaint_replaces_live_region() {
        let mut term = LiveTerminal::new(Vec::new(), 40, 10);
        term.repaint("first draft\n").unwrap();
        term.repaint("second\n").unwrap();

        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(rows[0], "second");
        assert!(rows.iter().all(|r| r != "first draft"));
        assert_eq!(term.live_rows(), 1);
    }

    #[test]
    fn test_commit_lands_above_live_region() {
        let mut term = LiveTerminal::new(Vec::new(), 40, 10);
        term.repaint("live\n").unwrap();
        term.commit("committed 1\ncommitted 2\n").unwrap();

        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(&rows[..3], ["committed 1", "committed 2", "live"]);
    }

    #[test]
    fn test_close_clears_live_region_and_keeps_commits() {
        let mut term = LiveTerminal::new(Vec::new(), 40, 10);
        term.commit("kept\n").unwrap();
        term.repaint("transient\n").unwrap();
        term.close().unwrap();

        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(rows[0], "kept");
        assert!(rows.iter().all(|r| r != "transient"));
        assert!(!parser.screen().hide_cursor());
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut term = LiveTerminal::new(Vec::new(), 40, 10);
        term.repaint("x\n").unwrap();
        term.close().unwrap();
        let written = term.writer().len();
        term.close().unwrap();
        assert_eq!(term.writer().len(), written);
        assert!(term.commit("late\n").is_err());
        assert!(term.repaint("late\n").is_err());
    }

    #[test]
    fn test_live_region_cropped_to_height() {
        let mut term = LiveTerminal::new(Vec::new(), 20, 4);
        term.repaint("a\nb\nc\nd\ne\nf\n").unwrap();
        assert_eq!(term.live_rows(), 3);

        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(&rows[..3], ["d", "e", "f"]);
    }

    #[test]
    fn test_live_rows_count_soft_wraps() {
        let mut term = LiveTerminal::new(Vec::new(), 5, 10);
        term.repaint("0123456789\nab\n").unwrap();
        assert_eq!(term.live_rows(), 3);
    }

    #[test]
    fn test_tall_line_never_reaches_scrollback() {
        let mut term = LiveTerminal::new(Vec::new(), 10, 4);
        term.repaint(&format!("{}\n", "x".repeat(50))).unwrap();
        assert_eq!(term.live_rows(), 3);

        term.repaint("short\n").unwrap();
        term.close().unwrap();

        let mut parser = screen(&term);
        assert!(rows(&parser).iter().all(String::is_empty));
        parser.set_scrollback(100);
        assert_eq!(parser.screen().scrollback(), 0);
        assert!(rows(&parser).iter().all(|r| !r.contains('x')));
    }

    #[test]
    fn test_tall_line_shows_its_tail() {
        let mut term = LiveTerminal::new(Vec::new(), 10, 4);
        term.repaint(&format!("{}yz\n", "x".repeat(45))).unwrap();
        assert_eq!(term.live_rows(), 3);

        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(&rows[..3], ["xxxxxxxxxx", "xxxxxxxxxx", "xxxxxyz"]);
    }

    #[test]
    fn test_wide_chars_fully_erased() {
        let mut term = LiveTerminal::new(Vec::new(), 3, 10);
        term.repaint("日日日\n").unwrap();
        assert_eq!(term.live_rows(), 3);

        term.repaint("ok\n").unwrap();
        let parser = screen(&term);
        let rows = rows(&parser);
        assert_eq!(rows[0], "ok");
        assert!(rows.iter().all(|r| !r.contains('日')));
    }
}
