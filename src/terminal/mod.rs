//! Output surfaces: where committed lines and the live region end up.
//!
//! A [`Surface`] exposes the two operations the stream needs:
//!
//! 1. **Commit**: append text to permanent, scrollback-visible output. It is
//!    never touched again.
//! 2. **Repaint**: replace the transient live region wholesale.
//!
//! [`LiveTerminal`] implements this on a real terminal in inline mode (no
//! alternate screen), so committed output survives in normal scrollback.
//! [`RecordingSurface`] keeps everything in memory.

mod live;
mod output;
mod recorder;

pub use live::LiveTerminal;
pub use output::{crop_rows, line_rows, visible_width, OutputBuffer};
pub use recorder::RecordingSurface;

use std::io;

/// Destination for stream output.
pub trait Surface {
    /// Append text to permanent output.
    fn commit(&mut self, text: &str) -> io::Result<()>;

    /// Replace the live region with `text`.
    fn repaint(&mut self, text: &str) -> io::Result<()>;

    /// Clear the live region and release the surface.
    ///
    /// Must be idempotent.
    fn close(&mut self) -> io::Result<()>;
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn commit(&mut self, text: &str) -> io::Result<()> {
        (**self).commit(text)
    }

    fn repaint(&mut self, text: &str) -> io::Result<()> {
        (**self).repaint(text)
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Error returned by surfaces written to after [`Surface::close`].
pub(crate) fn closed_error() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "surface is closed")
}
