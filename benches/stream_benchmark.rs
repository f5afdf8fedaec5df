//! Stream benchmark: Measure render and update cost.
//!
//! Target: full render of a few KB of markdown well under the 50ms floor

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use mdstream::diagram::{augment, mermaid_link};
use mdstream::{
    LineRenderer, MarkdownOptions, MarkdownRenderer, MarkdownStream, RecordingSurface,
    StreamConfig,
};
use std::time::Duration;

const DOCUMENT: &str = r#"# Release notes

The **stream** renderer keeps a live window of the last few lines and
commits everything above it. Inline `code`, *emphasis* and [links](https://example.com)
are styled; long paragraphs are wrapped to the terminal width.

- First item with some text
- Second item
  - Nested item
- [x] Done task

> Quoted text that spans a little more than one line when wrapped at
> eighty columns, to exercise the gutter.

```rust
fn main() {
    println!("hello");
}
```

| Name | Value |
|------|------:|
| a    | 1     |
| b    | 22    |

```mermaid
graph TD
    A --> B
```
"#;

fn unthrottled() -> StreamConfig {
    StreamConfig {
        min_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
        ..StreamConfig::default()
    }
}

fn render_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_lines");
    for repeat in [1, 4, 16] {
        let text = DOCUMENT.repeat(repeat);
        let renderer = MarkdownRenderer::new(MarkdownOptions::default());
        group.bench_with_input(BenchmarkId::from_parameter(text.len()), &text, |b, text| {
            b.iter(|| renderer.render_lines(black_box(text)));
        });
    }
    group.finish();
}

fn stream_document(c: &mut Criterion) {
    c.bench_function("stream_by_line", |b| {
        let cuts: Vec<usize> = DOCUMENT
            .match_indices('\n')
            .map(|(i, _)| i + 1)
            .collect();
        b.iter(|| {
            let renderer = MarkdownRenderer::new(MarkdownOptions::default());
            let mut stream =
                MarkdownStream::with_config(renderer, RecordingSurface::new(), unthrottled());
            for &cut in &cuts {
                let _ = stream.update(black_box(&DOCUMENT[..cut]), false);
            }
            let _ = stream.update(DOCUMENT, true);
        });
    });
}

fn diagram_links(c: &mut Criterion) {
    c.bench_function("mermaid_link", |b| {
        b.iter(|| mermaid_link(black_box("graph TD\n    A --> B\n    B --> C")));
    });

    c.bench_function("augment_document", |b| {
        b.iter(|| augment(black_box(DOCUMENT)));
    });
}

criterion_group!(benches, render_document, stream_document, diagram_links);
criterion_main!(benches);
