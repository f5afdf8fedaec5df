//! Markdown renderer: pulldown-cmark events to wrapped, styled lines.
//!
//! The whole document is rendered on every call. Block containers (quotes,
//! lists, items) are tracked on a frame stack that mirrors the parser's
//! start/end events, so every end event closes exactly the frame its start
//! event opened.

use super::options::MarkdownOptions;
use super::style::InlineStyle;
use super::LineRenderer;
use pulldown_cmark::{Alignment, Event, Options, Parser, Tag};
use std::mem;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Gutter drawn in front of block quote lines.
const QUOTE_GUTTER: &str = "▌ ";

/// Character used for horizontal rules and table separators.
const RULE_CHAR: char = '─';

/// Rule width when wrapping is disabled.
const RULE_FALLBACK_WIDTH: usize = 40;

/// Column separator in tables.
const TABLE_SEPARATOR: &str = " │ ";

/// Renders markdown to terminal display lines.
#[derive(Debug, Clone, Default)]
pub struct MarkdownRenderer {
    options: MarkdownOptions,
}

impl MarkdownRenderer {
    /// Create a renderer with the given options.
    pub const fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    /// Get the renderer options.
    pub const fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Change the wrap width, e.g. after a terminal resize.
    pub const fn set_width(&mut self, width: u16) {
        self.options.width = width;
    }
}

impl LineRenderer for MarkdownRenderer {
    fn render_lines(&self, text: &str) -> Vec<String> {
        LineWriter::new(&self.options).run(text)
    }
}

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Span {
    text: String,
    style: InlineStyle,
    href: Option<String>,
}

/// Inline content waiting to be wrapped.
#[derive(Debug, Clone)]
enum Inline {
    Run(Span),
    Break,
}

/// An open container, pushed on start events and popped on end events.
#[derive(Debug)]
enum Frame {
    Paragraph,
    Heading(u8),
    BlockQuote,
    HtmlBlock,
    List { next: Option<u64> },
    Item { width: usize },
    CodeBlock,
    Table,
    TableHead,
    TableRow,
    TableCell,
    Style(InlineStyle),
    Link { url: String, start: usize },
    Image,
    Other,
}

impl Frame {
    /// Whether pending inline content must be flushed before this frame closes.
    const fn is_block(&self) -> bool {
        matches!(
            self,
            Self::Paragraph
                | Self::Heading(_)
                | Self::BlockQuote
                | Self::HtmlBlock
                | Self::List { .. }
                | Self::Item { .. }
                | Self::CodeBlock
                | Self::Table
        )
    }
}

/// Rows collected for a table until it closes.
#[derive(Debug, Default)]
struct TableState {
    alignments: Vec<Alignment>,
    rows: Vec<Vec<String>>,
    header_rows: usize,
    row: Vec<String>,
}

/// Single-use rendering state for one document.
struct LineWriter<'a> {
    options: &'a MarkdownOptions,
    lines: Vec<String>,
    frames: Vec<Frame>,
    inlines: Vec<Inline>,
    pending_marker: Option<String>,
    code: Option<String>,
    table: Option<TableState>,
    needs_gap: bool,
}

impl<'a> LineWriter<'a> {
    const fn new(options: &'a MarkdownOptions) -> Self {
        Self {
            options,
            lines: Vec::new(),
            frames: Vec::new(),
            inlines: Vec::new(),
            pending_marker: None,
            code: None,
            table: None,
            needs_gap: false,
        }
    }

    fn run(mut self, text: &str) -> Vec<String> {
        let mut parser_options = Options::empty();
        parser_options.insert(Options::ENABLE_TABLES);
        parser_options.insert(Options::ENABLE_STRIKETHROUGH);
        parser_options.insert(Options::ENABLE_TASKLISTS);

        for event in Parser::new_ext(text, parser_options) {
            self.event(event);
        }
        self.flush_inline();
        self.lines
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => self.end(),
            Event::Text(text) => {
                if let Some(code) = self.code.as_mut() {
                    code.push_str(&text);
                } else {
                    self.push_text(&text, InlineStyle::empty());
                }
            }
            Event::Code(text) => self.push_text(&text, InlineStyle::CODE),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_text(&html, InlineStyle::empty());
            }
            Event::SoftBreak => self.push_text(" ", InlineStyle::empty()),
            Event::HardBreak => self.inlines.push(Inline::Break),
            Event::Rule => {
                self.flush_inline();
                self.start_block();
                self.rule();
                self.needs_gap = true;
            }
            Event::TaskListMarker(done) => {
                let marker = if done { "[x] " } else { "[ ] " };
                self.push_text(marker, InlineStyle::DIM);
            }
            Event::FootnoteReference(label) => {
                self.push_text(&format!("[^{label}]"), InlineStyle::DIM);
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        let frame = match tag {
            Tag::Paragraph => {
                self.open_block();
                Frame::Paragraph
            }
            Tag::Heading { level, .. } => {
                self.open_block();
                Frame::Heading(level as u8)
            }
            Tag::BlockQuote(_) => {
                self.open_block();
                Frame::BlockQuote
            }
            Tag::HtmlBlock => {
                self.open_block();
                Frame::HtmlBlock
            }
            Tag::CodeBlock(_) => {
                self.open_block();
                self.code = Some(String::new());
                Frame::CodeBlock
            }
            Tag::List(first) => {
                self.open_block();
                Frame::List { next: first }
            }
            Tag::Item => {
                self.flush_inline();
                if self.pending_marker.is_some() {
                    self.marker_only_line();
                }
                let marker = self.next_marker();
                let width = UnicodeWidthStr::width(marker.as_str());
                self.pending_marker = Some(marker);
                Frame::Item { width }
            }
            Tag::Table(alignments) => {
                self.open_block();
                self.table = Some(TableState {
                    alignments,
                    ..TableState::default()
                });
                Frame::Table
            }
            Tag::TableHead => Frame::TableHead,
            Tag::TableRow => Frame::TableRow,
            Tag::TableCell => {
                self.inlines.clear();
                Frame::TableCell
            }
            Tag::Emphasis => Frame::Style(InlineStyle::ITALIC),
            Tag::Strong => Frame::Style(InlineStyle::BOLD),
            Tag::Strikethrough => Frame::Style(InlineStyle::STRIKE),
            Tag::Link { dest_url, .. } => Frame::Link {
                url: dest_url.to_string(),
                start: self.inlines.len(),
            },
            Tag::Image { .. } => Frame::Image,
            _ => Frame::Other,
        };
        self.frames.push(frame);
    }

    fn end(&mut self) {
        match self.frames.last() {
            Some(Frame::Item { .. }) => {
                self.flush_inline();
                if self.pending_marker.is_some() {
                    self.marker_only_line();
                }
            }
            Some(frame) if frame.is_block() => self.flush_inline(),
            _ => {}
        }

        let Some(frame) = self.frames.pop() else {
            return;
        };

        match frame {
            Frame::Paragraph
            | Frame::Heading(_)
            | Frame::BlockQuote
            | Frame::HtmlBlock
            | Frame::List { .. } => self.needs_gap = true,
            Frame::CodeBlock => {
                let code = self.code.take().unwrap_or_default();
                self.code_block(&code);
                self.needs_gap = true;
            }
            Frame::TableCell => {
                let cell: String = mem::take(&mut self.inlines)
                    .iter()
                    .filter_map(|inline| match inline {
                        Inline::Run(span) => Some(span.text.as_str()),
                        Inline::Break => None,
                    })
                    .collect();
                if let Some(table) = self.table.as_mut() {
                    table.row.push(cell.trim().to_string());
                }
            }
            Frame::TableHead | Frame::TableRow => {
                let is_head = matches!(frame, Frame::TableHead);
                if let Some(table) = self.table.as_mut() {
                    let row = mem::take(&mut table.row);
                    table.rows.push(row);
                    if is_head {
                        table.header_rows = table.rows.len();
                    }
                }
            }
            Frame::Table => {
                if let Some(table) = self.table.take() {
                    self.render_table(&table);
                }
                self.needs_gap = true;
            }
            Frame::Link { url, start } => self.close_link(&url, start),
            Frame::Item { .. } | Frame::Style(_) | Frame::Image | Frame::Other => {}
        }
    }

    /// Flush inline content and insert the inter-block gap.
    fn open_block(&mut self) {
        self.flush_inline();
        self.start_block();
    }

    /// Insert one blank line between blocks, except inside list items.
    fn start_block(&mut self) {
        let in_item = self.frames.iter().any(|f| matches!(f, Frame::Item { .. }));
        if self.needs_gap && !in_item {
            self.blank_line();
        }
        self.needs_gap = false;
    }

    fn quote_depth(&self) -> usize {
        self.frames
            .iter()
            .filter(|f| matches!(f, Frame::BlockQuote))
            .count()
    }

    fn item_widths(&self) -> Vec<usize> {
        self.frames
            .iter()
            .filter_map(|f| match f {
                Frame::Item { width } => Some(*width),
                _ => None,
            })
            .collect()
    }

    /// Build the line prefix (quote gutter, list indentation or marker).
    ///
    /// Consumes the pending list marker, so the first call after an item
    /// starts yields the marker and later calls yield a hanging indent.
    fn take_prefix(&mut self) -> (String, usize) {
        let color = self.options.color;
        let mut prefix = String::new();
        let mut width = 0;

        for _ in 0..self.quote_depth() {
            InlineStyle::DIM.paint(QUOTE_GUTTER, color, &mut prefix);
            width += UnicodeWidthStr::width(QUOTE_GUTTER);
        }

        let items = self.item_widths();
        if let Some(marker) = self.pending_marker.take() {
            let outer: usize = items.iter().rev().skip(1).sum();
            prefix.push_str(&" ".repeat(outer));
            InlineStyle::BOLD.paint(&marker, color, &mut prefix);
            width += outer + UnicodeWidthStr::width(marker.as_str());
        } else {
            let indent: usize = items.iter().sum();
            prefix.push_str(&" ".repeat(indent));
            width += indent;
        }

        (prefix, width)
    }

    fn blank_line(&mut self) {
        let depth = self.quote_depth();
        let mut line = String::new();
        if depth > 0 {
            let gutter = QUOTE_GUTTER.repeat(depth);
            InlineStyle::DIM.paint(gutter.trim_end(), self.options.color, &mut line);
        }
        line.push('\n');
        self.lines.push(line);
    }

    fn marker_only_line(&mut self) {
        let (mut line, _) = self.take_prefix();
        line.push('\n');
        self.lines.push(line);
    }

    fn next_marker(&mut self) -> String {
        let bullet = self.options.bullet;
        let next = self.frames.iter_mut().rev().find_map(|f| match f {
            Frame::List { next } => Some(next),
            _ => None,
        });
        match next {
            Some(Some(n)) => {
                let marker = format!("{n}. ");
                *n += 1;
                marker
            }
            _ => format!("{bullet} "),
        }
    }

    fn current_style(&self) -> InlineStyle {
        self.frames
            .iter()
            .fold(InlineStyle::empty(), |acc, frame| {
                acc | match frame {
                    Frame::Style(style) => *style,
                    Frame::Link { .. } => InlineStyle::LINK,
                    Frame::Image => InlineStyle::ITALIC,
                    Frame::Heading(1) => InlineStyle::HEADING | InlineStyle::UNDERLINE,
                    Frame::Heading(2) => InlineStyle::HEADING,
                    Frame::Heading(_) => InlineStyle::BOLD,
                    _ => InlineStyle::empty(),
                }
            })
    }

    fn current_href(&self) -> Option<String> {
        if !self.options.hyperlinks {
            return None;
        }
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Link { url, .. } if !url.is_empty() => Some(url.clone()),
            _ => None,
        })
    }

    fn push_text(&mut self, text: &str, extra: InlineStyle) {
        let span = Span {
            text: text.to_string(),
            style: self.current_style() | extra,
            href: self.current_href(),
        };
        self.inlines.push(Inline::Run(span));
    }

    /// Without hyperlinks, show the target after the link text.
    fn close_link(&mut self, url: &str, start: usize) {
        if self.options.hyperlinks || url.is_empty() {
            return;
        }
        let label: String = self
            .inlines
            .get(start..)
            .unwrap_or_default()
            .iter()
            .filter_map(|inline| match inline {
                Inline::Run(span) => Some(span.text.as_str()),
                Inline::Break => None,
            })
            .collect();
        if label != url {
            self.push_text(&format!(" ({url})"), InlineStyle::DIM);
        }
    }

    /// Wrap pending inline content and emit it as lines.
    fn flush_inline(&mut self) {
        if self.inlines.is_empty() {
            return;
        }
        let inlines = mem::take(&mut self.inlines);

        let (first_prefix, first_width) = self.take_prefix();
        let (rest_prefix, rest_width) = self.take_prefix();
        let width = match usize::from(self.options.width) {
            0 => 0,
            w => w.saturating_sub(first_width.max(rest_width)).max(1),
        };

        let color = self.options.color;
        for (i, spans) in wrap(&inlines, width).into_iter().enumerate() {
            let mut line = if i == 0 {
                first_prefix.clone()
            } else {
                rest_prefix.clone()
            };
            for span in &spans {
                paint_span(span, color, &mut line);
            }
            line.push('\n');
            self.lines.push(line);
        }
    }

    fn code_block(&mut self, code: &str) {
        let code = code.strip_suffix('\n').unwrap_or(code);
        if code.is_empty() {
            return;
        }
        let indent = " ".repeat(self.options.code_indent);
        for source_line in code.split('\n') {
            let (mut line, _) = self.take_prefix();
            let source_line = expand_tabs(source_line.trim_end_matches('\r'));
            if !source_line.is_empty() {
                line.push_str(&indent);
                InlineStyle::CODE_BLOCK.paint(&source_line, self.options.color, &mut line);
            }
            line.push('\n');
            self.lines.push(line);
        }
    }

    fn rule(&mut self) {
        let (mut line, prefix_width) = self.take_prefix();
        let width = match usize::from(self.options.width) {
            0 => RULE_FALLBACK_WIDTH,
            w => w.saturating_sub(prefix_width).max(1),
        };
        let rule: String = std::iter::repeat(RULE_CHAR).take(width).collect();
        InlineStyle::DIM.paint(&rule, self.options.color, &mut line);
        line.push('\n');
        self.lines.push(line);
    }

    fn render_table(&mut self, table: &TableState) {
        let columns = table.rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return;
        }

        let mut widths = vec![0; columns];
        for row in &table.rows {
            for (col, cell) in row.iter().enumerate() {
                widths[col] = widths[col].max(UnicodeWidthStr::width(cell.as_str()));
            }
        }

        let color = self.options.color;
        for (index, row) in table.rows.iter().enumerate() {
            let (mut line, _) = self.take_prefix();
            let style = if index < table.header_rows {
                InlineStyle::BOLD
            } else {
                InlineStyle::empty()
            };
            for (col, width) in widths.iter().enumerate() {
                if col > 0 {
                    InlineStyle::DIM.paint(TABLE_SEPARATOR, color, &mut line);
                }
                let cell = row.get(col).map_or("", String::as_str);
                let alignment = table.alignments.get(col).copied().unwrap_or(Alignment::None);
                style.paint(&pad_cell(cell, *width, alignment), color, &mut line);
            }
            line.push('\n');
            self.lines.push(line);

            if index + 1 == table.header_rows {
                let (mut separator, _) = self.take_prefix();
                let joined = widths
                    .iter()
                    .map(|w| std::iter::repeat(RULE_CHAR).take(*w).collect::<String>())
                    .collect::<Vec<_>>()
                    .join(&format!("{RULE_CHAR}┼{RULE_CHAR}"));
                InlineStyle::DIM.paint(&joined, color, &mut separator);
                separator.push('\n');
                self.lines.push(separator);
            }
        }
    }
}

fn paint_span(span: &Span, color: bool, out: &mut String) {
    match &span.href {
        Some(url) => {
            out.push_str("\x1b]8;;");
            out.push_str(url);
            out.push_str("\x1b\\");
            span.style.paint(&span.text, color, out);
            out.push_str("\x1b]8;;\x1b\\");
        }
        None => span.style.paint(&span.text, color, out),
    }
}

fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut col = 0;
    for grapheme in line.graphemes(true) {
        if grapheme == "\t" {
            let spaces = 4 - (col % 4);
            out.push_str(&" ".repeat(spaces));
            col += spaces;
        } else {
            out.push_str(grapheme);
            col += UnicodeWidthStr::width(grapheme);
        }
    }
    out
}

fn pad_cell(cell: &str, width: usize, alignment: Alignment) -> String {
    let fill = width.saturating_sub(UnicodeWidthStr::width(cell));
    let (left, right) = match alignment {
        Alignment::Right => (fill, 0),
        Alignment::Center => (fill / 2, fill - fill / 2),
        Alignment::Left | Alignment::None => (0, fill),
    };
    format!("{}{cell}{}", " ".repeat(left), " ".repeat(right))
}

/// Greedy word wrapping over styled spans. `width == 0` disables wrapping.
fn wrap(inlines: &[Inline], width: usize) -> Vec<Vec<Span>> {
    let mut wrapper = Wrapper::new(width);
    for inline in inlines {
        match inline {
            Inline::Break => wrapper.hard_break(),
            Inline::Run(span) => {
                for piece in span.text.split_word_bounds() {
                    if piece.chars().all(char::is_whitespace) {
                        wrapper.space(span);
                    } else {
                        wrapper.piece(piece, span);
                    }
                }
            }
        }
    }
    wrapper.finish()
}

struct Wrapper {
    width: usize,
    lines: Vec<Vec<Span>>,
    line: Vec<Span>,
    line_width: usize,
    word: Vec<Span>,
    word_width: usize,
    space: Option<(InlineStyle, Option<String>)>,
}

impl Wrapper {
    const fn new(width: usize) -> Self {
        Self {
            width,
            lines: Vec::new(),
            line: Vec::new(),
            line_width: 0,
            word: Vec::new(),
            word_width: 0,
            space: None,
        }
    }

    fn piece(&mut self, text: &str, span: &Span) {
        push_merged(&mut self.word, text, span.style, span.href.as_ref());
        self.word_width += UnicodeWidthStr::width(text);
    }

    fn space(&mut self, span: &Span) {
        self.place_word();
        if self.space.is_none() {
            self.space = Some((span.style, span.href.clone()));
        }
    }

    fn hard_break(&mut self) {
        self.place_word();
        self.lines.push(mem::take(&mut self.line));
        self.line_width = 0;
        self.space = None;
    }

    fn place_word(&mut self) {
        if self.word.is_empty() {
            return;
        }

        let space = self.space.take().filter(|_| self.line_width > 0);
        let gap = usize::from(space.is_some());

        if self.width > 0 && self.line_width > 0 && self.line_width + gap + self.word_width > self.width
        {
            self.lines.push(mem::take(&mut self.line));
            self.line_width = 0;
        } else if let Some((style, href)) = space {
            push_merged(&mut self.line, " ", style, href.as_ref());
            self.line_width += 1;
        }

        for span in mem::take(&mut self.word) {
            push_merged(&mut self.line, &span.text, span.style, span.href.as_ref());
        }
        self.line_width += self.word_width;
        self.word_width = 0;
    }

    fn finish(mut self) -> Vec<Vec<Span>> {
        self.place_word();
        if !self.line.is_empty() {
            self.lines.push(self.line);
        }
        self.lines
    }
}

fn push_merged(spans: &mut Vec<Span>, text: &str, style: InlineStyle, href: Option<&String>) {
    if let Some(last) = spans.last_mut() {
        if last.style == style && last.href.as_ref() == href {
            last.text.push_str(text);
            return;
        }
    }
    spans.push(Span {
        text: text.to_string(),
        style,
        href: href.cloned(),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(width: u16) -> MarkdownRenderer {
        MarkdownRenderer::new(MarkdownOptions::default().plain().with_width(width))
    }

    fn render(text: &str) -> Vec<String> {
        plain(80).render_lines(text)
    }

    #[test]
    fn test_empty_document() {
        assert!(render("").is_empty());
    }

    #[test]
    fn test_heading_and_paragraph_separated_by_blank() {
        assert_eq!(render("# A\n\nfoo"), ["A\n", "\n", "foo\n"]);
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let lines = plain(10).render_lines("one two three four five");
        assert_eq!(lines, ["one two\n", "three four\n", "five\n"]);
    }

    #[test]
    fn test_zero_width_disables_wrapping() {
        let text = "word ".repeat(50);
        let lines = plain(0).render_lines(&text);
        assert_eq!(lines.len(), 1);
    }

    #[test]
    fn test_soft_break_joins_lines() {
        assert_eq!(render("one\ntwo"), ["one two\n"]);
    }

    #[test]
    fn test_hard_break_splits_lines() {
        assert_eq!(render("one  \ntwo"), ["one\n", "two\n"]);
    }

    #[test]
    fn test_tight_bullet_list() {
        assert_eq!(render("- a\n- b\n- c"), ["• a\n", "• b\n", "• c\n"]);
    }

    #[test]
    fn test_ordered_list_numbers_from_start() {
        assert_eq!(render("3. x\n4. y"), ["3. x\n", "4. y\n"]);
    }

    #[test]
    fn test_nested_list_indents() {
        let lines = render("- outer\n  - inner");
        assert_eq!(lines, ["• outer\n", "  • inner\n"]);
    }

    #[test]
    fn test_list_item_hanging_indent() {
        let lines = plain(12).render_lines("- alpha beta gamma delta");
        assert_eq!(lines, ["• alpha beta\n", "  gamma\n", "  delta\n"]);
    }

    #[test]
    fn test_task_list_markers() {
        let lines = render("- [x] done\n- [ ] todo");
        assert_eq!(lines, ["• [x] done\n", "• [ ] todo\n"]);
    }

    #[test]
    fn test_code_block_is_indented_and_not_wrapped() {
        let lines = plain(10).render_lines("```rust\nfn main() { let x = 1; }\n```");
        assert_eq!(lines, ["    fn main() { let x = 1; }\n"]);
    }

    #[test]
    fn test_code_block_expands_tabs() {
        let lines = render("```\n\tx\n```");
        assert_eq!(lines, ["        x\n"]);
    }

    #[test]
    fn test_unclosed_code_fence_renders_as_code() {
        let lines = render("text\n\n```python\nimport sys");
        assert_eq!(lines, ["text\n", "\n", "    import sys\n"]);
    }

    #[test]
    fn test_block_quote_gutter() {
        let lines = render("> quoted\n>\n> more");
        assert_eq!(lines, ["▌ quoted\n", "▌\n", "▌ more\n"]);
    }

    #[test]
    fn test_rule_spans_width() {
        let lines = plain(5).render_lines("a\n\n---\n\nb");
        assert_eq!(lines, ["a\n", "\n", "─────\n", "\n", "b\n"]);
    }

    #[test]
    fn test_link_without_hyperlinks_shows_target() {
        let lines = render("[docs](https://example.com)");
        assert_eq!(lines, ["docs (https://example.com)\n"]);
    }

    #[test]
    fn test_autolink_not_duplicated() {
        let lines = render("<https://example.com>");
        assert_eq!(lines, ["https://example.com\n"]);
    }

    #[test]
    fn test_hyperlinks_emit_osc8() {
        let renderer = MarkdownRenderer::new(MarkdownOptions {
            color: false,
            ..MarkdownOptions::default()
        });
        let lines = renderer.render_lines("[docs](https://example.com)");
        assert_eq!(
            lines,
            ["\x1b]8;;https://example.com\x1b\\docs\x1b]8;;\x1b\\\n"]
        );
    }

    #[test]
    fn test_table_columns_aligned() {
        let lines = render("| a | bb |\n|---|---:|\n| ccc | d |");
        assert_eq!(
            lines,
            ["a   │ bb\n", "────┼───\n", "ccc │  d\n"]
        );
    }

    #[test]
    fn test_inline_styles_emit_ansi_when_colored() {
        let renderer = MarkdownRenderer::new(MarkdownOptions::default());
        let lines = renderer.render_lines("some **bold** and `code`");
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains('\x1b'));
        assert_eq!(
            crate::terminal::visible_width(lines[0].trim_end_matches('\n')),
            "some bold and code".len()
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::default();
        let text = "# T\n\n- a\n- b\n\n```\ncode\n```\n\n> q\n\n| x | y |\n|---|---|\n| 1 | 2 |";
        assert_eq!(renderer.render_lines(text), renderer.render_lines(text));
    }

    #[test]
    fn test_every_line_is_terminated() {
        let renderer = MarkdownRenderer::default();
        let lines = renderer.render_lines("# H\n\npara *x*\n\n1. a\n2. b\n\n---\n\n```\nc\n```");
        assert!(lines.iter().all(|l| l.ends_with('\n')));
        assert_eq!(lines.iter().filter(|l| l.contains('\n')).count(), lines.len());
    }
}
