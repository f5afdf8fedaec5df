//! Formatting options forwarded to the markdown renderer.

/// Options controlling how markdown is turned into display lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Wrap width in columns (0 disables wrapping).
    pub width: u16,
    /// Whether to emit ANSI styling.
    pub color: bool,
    /// Whether to emit OSC 8 hyperlinks instead of `text (url)`.
    pub hyperlinks: bool,
    /// Marker used for unordered list items.
    pub bullet: char,
    /// Indentation of code block contents.
    pub code_indent: usize,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            width: 80,
            color: true,
            hyperlinks: true,
            bullet: '•',
            code_indent: 4,
        }
    }
}

impl MarkdownOptions {
    /// Build options from an option-name → value map.
    ///
    /// Recognized names are `width`, `color`, `hyperlinks`, `bullet` and
    /// `code_indent`. Unknown names and unparsable values are skipped.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Self::default();
        for (key, value) in pairs {
            options.set(key.as_ref(), value.as_ref());
        }
        options
    }

    /// Apply a single option by name.
    ///
    /// Returns `false` when the name is unknown or the value does not parse.
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        let value = value.trim();
        let applied = match key.trim() {
            "width" => value.parse().map(|w| self.width = w).is_ok(),
            "color" => parse_bool(value).map(|b| self.color = b).is_some(),
            "hyperlinks" => parse_bool(value).map(|b| self.hyperlinks = b).is_some(),
            "bullet" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        self.bullet = c;
                        true
                    }
                    _ => false,
                }
            }
            "code_indent" => value.parse().map(|n| self.code_indent = n).is_ok(),
            _ => false,
        };

        if !applied {
            tracing::debug!(key, value, "ignoring markdown option");
        }
        applied
    }

    /// Same options with a different wrap width.
    #[must_use]
    pub const fn with_width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Same options without ANSI styling or hyperlinks.
    #[must_use]
    pub const fn plain(mut self) -> Self {
        self.color = false;
        self.hyperlinks = false;
        self
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pairs_applies_known_options() {
        let options = MarkdownOptions::from_pairs([
            ("width", "60"),
            ("color", "off"),
            ("hyperlinks", "false"),
            ("bullet", "-"),
            ("code_indent", "2"),
        ]);

        assert_eq!(options.width, 60);
        assert!(!options.color);
        assert!(!options.hyperlinks);
        assert_eq!(options.bullet, '-');
        assert_eq!(options.code_indent, 2);
    }

    #[test]
    fn test_from_pairs_ignores_unknown_and_invalid() {
        let options = MarkdownOptions::from_pairs([
            ("code_theme", "monokai"),
            ("width", "wide"),
            ("bullet", "**"),
        ]);
        assert_eq!(options, MarkdownOptions::default());
    }

    #[test]
    fn test_plain_disables_styling() {
        let options = MarkdownOptions::default().plain();
        assert!(!options.color);
        assert!(!options.hyperlinks);
    }
}
