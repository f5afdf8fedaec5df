//! Diagram links: a viewer URL after every fenced mermaid block.
//!
//! Terminals cannot draw diagrams, so each ```` ```mermaid ```` block gets a
//! link line appended that opens the diagram in the mermaid live viewer.
//! The link encodes the diagram itself (`pako:` fragment), so it works
//! without any server-side state.
//!
//! # Example
//!
//! ```rust
//! let text = "```mermaid\ngraph TD; A-->B\n```\n";
//! let augmented = mdstream::diagram::augment(text).unwrap();
//! assert!(augmented.contains("[View diagram](http://mermaid.live/view#pako:"));
//! ```

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use regex::Regex;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Write;
use std::sync::LazyLock;

/// Viewer endpoint; the encoded diagram goes in the fragment.
pub const VIEWER_URL: &str = "http://mermaid.live/view#pako:";

/// Label of the inserted link.
const LINK_LABEL: &str = "View diagram";

static MERMAID_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    // Static pattern; compilation cannot fail.
    Regex::new(r"(?s)```mermaid\n(.*?)\n```").expect("valid mermaid block pattern")
});

#[derive(Serialize)]
struct Envelope<'a> {
    code: &'a str,
    options: ViewerOptions,
}

#[derive(Serialize)]
struct ViewerOptions {
    theme: &'static str,
}

/// Build the viewer link for one diagram body.
///
/// The output depends only on `code`: the JSON envelope has a fixed field
/// order and zlib output is deterministic for a fixed level.
pub fn mermaid_link(code: &str) -> Result<String> {
    let envelope = Envelope {
        code,
        options: ViewerOptions { theme: "default" },
    };
    let json = serde_json::to_vec(&envelope)?;

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
    encoder.write_all(&json)?;
    let deflated = encoder.finish()?;

    Ok(format!("{VIEWER_URL}{}", STANDARD.encode(deflated)))
}

/// Return `text` with a link line after each complete mermaid block.
///
/// Text without diagram blocks is returned unchanged and borrowed. Matches
/// are located in the unmodified input and the output is assembled in one
/// pass, so each insertion lands right after its own block.
pub fn augment(text: &str) -> Result<Cow<'_, str>> {
    let mut out: Option<String> = None;
    let mut copied = 0;

    for captures in MERMAID_BLOCK.captures_iter(text) {
        let (Some(block), Some(body)) = (captures.get(0), captures.get(1)) else {
            continue;
        };
        let link = mermaid_link(body.as_str())?;

        let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 256));
        buf.push_str(&text[copied..block.end()]);
        buf.push_str("\n\n[");
        buf.push_str(LINK_LABEL);
        buf.push_str("](");
        buf.push_str(&link);
        buf.push_str(")\n");
        copied = block.end();
    }

    Ok(match out {
        Some(mut buf) => {
            buf.push_str(&text[copied..]);
            tracing::trace!(added = buf.len() - text.len(), "inserted diagram links");
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(text),
    })
}
