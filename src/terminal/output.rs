//! `OutputBuffer`: one write per surface operation, plus width helpers.
//!
//! Commits and repaints are assembled here (cursor movement, erase, text,
//! sync markers) and handed to the terminal in a single write, so the
//! terminal never shows a half-erased live region.

use crossterm::{cursor, queue, terminal};
use std::io::Write;
use unicode_width::UnicodeWidthChar;

/// Synchronized output begin (DEC 2026).
const SYNC_BEGIN: &[u8] = b"\x1b[?2026h";

/// Synchronized output end (DEC 2026).
const SYNC_END: &[u8] = b"\x1b[?2026l";

/// Scratch buffer for one live-region update.
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical live region (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a string, terminating it with a newline if it lacks one.
    pub fn write_line_block(&mut self, s: &str) {
        self.write_str(s);
        if !s.is_empty() && !s.ends_with('\n') {
            self.data.push(b'\n');
        }
    }

    /// Move the cursor up `rows` rows and back to column zero.
    #[inline]
    pub fn cursor_up(&mut self, rows: u16) {
        // Writes into a Vec cannot fail.
        let _ = queue!(self.data, cursor::MoveToColumn(0));
        if rows > 0 {
            let _ = queue!(self.data, cursor::MoveUp(rows));
        }
    }

    /// Erase from the cursor to the end of the screen.
    #[inline]
    pub fn erase_below(&mut self) {
        let _ = queue!(self.data, terminal::Clear(terminal::ClearType::FromCursorDown));
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Begin a synchronized update.
    #[inline]
    pub fn begin_sync(&mut self) {
        self.data.extend_from_slice(SYNC_BEGIN);
    }

    /// End a synchronized update.
    #[inline]
    pub fn end_sync(&mut self) {
        self.data.extend_from_slice(SYNC_END);
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One piece of a line: a printable char or a whole escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Piece<'a> {
    Char(char),
    Escape(&'a str),
}

/// Splits a line into chars and CSI/OSC escape sequences.
struct Pieces<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Pieces<'a> {
    const fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }
}

impl<'a> Iterator for Pieces<'a> {
    type Item = Piece<'a>;

    fn next(&mut self) -> Option<Piece<'a>> {
        let rest = &self.line[self.pos..];
        let mut chars = rest.char_indices();
        let (_, ch) = chars.next()?;
        if ch != '\x1b' {
            self.pos += ch.len_utf8();
            return Some(Piece::Char(ch));
        }

        let len = match chars.next() {
            // CSI: parameters until a final byte in 0x40..=0x7e
            Some((_, '[')) => chars
                .find(|(_, c)| ('\x40'..='\x7e').contains(c))
                .map_or(rest.len(), |(i, c)| i + c.len_utf8()),
            // OSC: until BEL or ST (ESC \)
            Some((_, ']')) => {
                let mut len = rest.len();
                let mut after_esc = false;
                for (i, c) in chars {
                    if c == '\x07' || (after_esc && c == '\\') {
                        len = i + 1;
                        break;
                    }
                    after_esc = c == '\x1b';
                }
                len
            }
            Some((i, c)) => i + c.len_utf8(),
            None => rest.len(),
        };
        self.pos += len;
        Some(Piece::Escape(&rest[..len]))
    }
}

fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Display width of a line, skipping CSI and OSC escape sequences.
pub fn visible_width(line: &str) -> usize {
    Pieces::new(line)
        .map(|piece| match piece {
            Piece::Char(ch) => char_width(ch),
            Piece::Escape(_) => 0,
        })
        .sum()
}

/// Row index of every piece once the line is soft-wrapped at `width`.
///
/// A char that does not fit in the rest of the row moves to the next one,
/// as terminals do with wide chars in the last column.
fn rows_of(line: &str, width: u16) -> impl Iterator<Item = (Piece<'_>, usize)> {
    let width = usize::from(width);
    let mut row = 0;
    let mut col = 0;
    Pieces::new(line).map(move |piece| {
        if let Piece::Char(ch) = piece {
            let w = char_width(ch);
            if width > 0 && w > 0 {
                if col > 0 && col + w > width {
                    row += 1;
                    col = 0;
                }
                col += w;
            }
        }
        (piece, row)
    })
}

/// Number of terminal rows a line occupies once soft-wrapped at `width`.
pub fn line_rows(line: &str, width: u16) -> usize {
    let line = line.trim_end_matches(['\n', '\r']);
    rows_of(line, width).last().map_or(1, |(_, row)| row + 1)
}

/// Keep only the last `rows` rows of a soft-wrapped line.
///
/// Escape sequences from the dropped part are kept so styling and open
/// hyperlinks still apply to what remains.
pub fn crop_rows(line: &str, width: u16, rows: usize) -> String {
    let total = line_rows(line, width);
    if total <= rows {
        return line.to_string();
    }
    let first = total - rows;
    let mut out = String::with_capacity(line.len());
    for (piece, row) in rows_of(line, width) {
        match piece {
            Piece::Escape(seq) => out.push_str(seq),
            Piece::Char(ch) if row >= first || ch == '\n' || ch == '\r' => out.push(ch),
            Piece::Char(_) => {}
        }
    }
    out
}
