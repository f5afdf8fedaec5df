//! Inline style flags and their ANSI rendering.

use bitflags::bitflags;
use crossterm::style::{Attribute, Color, ContentStyle};

bitflags! {
    /// Inline styles active on a run of text.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct InlineStyle: u16 {
        /// Bold text.
        const BOLD = 0b0000_0000_0001;
        /// Italic text.
        const ITALIC = 0b0000_0000_0010;
        /// Struck-through text.
        const STRIKE = 0b0000_0000_0100;
        /// Inline code span.
        const CODE = 0b0000_0000_1000;
        /// Link text.
        const LINK = 0b0000_0001_0000;
        /// Heading text.
        const HEADING = 0b0000_0010_0000;
        /// Underlined text.
        const UNDERLINE = 0b0000_0100_0000;
        /// De-emphasized decoration (gutters, rules, link targets).
        const DIM = 0b0000_1000_0000;
        /// Code block body.
        const CODE_BLOCK = 0b0001_0000_0000;
    }
}

impl InlineStyle {
    /// Map the flags onto a crossterm content style.
    pub fn content_style(self) -> ContentStyle {
        let mut style = ContentStyle::new();

        if self.intersects(Self::BOLD | Self::HEADING) {
            style.attributes.set(Attribute::Bold);
        }
        if self.contains(Self::ITALIC) {
            style.attributes.set(Attribute::Italic);
        }
        if self.contains(Self::STRIKE) {
            style.attributes.set(Attribute::CrossedOut);
        }
        if self.intersects(Self::UNDERLINE | Self::LINK) {
            style.attributes.set(Attribute::Underlined);
        }
        if self.contains(Self::DIM) {
            style.attributes.set(Attribute::Dim);
        }

        if self.contains(Self::CODE) {
            style.foreground_color = Some(Color::Cyan);
        } else if self.contains(Self::CODE_BLOCK) {
            style.foreground_color = Some(Color::Yellow);
        } else if self.contains(Self::LINK) {
            style.foreground_color = Some(Color::Blue);
        } else if self.contains(Self::HEADING) {
            style.foreground_color = Some(Color::Magenta);
        }

        style
    }

    /// Append `text` to `out`, styled when `color` is set.
    pub fn paint(self, text: &str, color: bool, out: &mut String) {
        if !color || self.is_empty() || text.is_empty() {
            out.push_str(text);
            return;
        }
        out.push_str(&self.content_style().apply(text).to_string());
    }
}
