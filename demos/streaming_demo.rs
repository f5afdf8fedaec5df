//! Streaming Demo: renders a markdown reply as if it arrived token by token.
//!
//! The document grows one character every 10ms. Finished lines scroll into
//! normal terminal history while the last few lines keep updating in place.
//!
//! Run with `RUST_LOG=mdstream=debug` to see per-update stats on stderr.

use mdstream::{MarkdownOptions, MarkdownStream, Update};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

/// Sample text to stream (simulating an LLM response).
const SAMPLE_TEXT: &str = r#"
# Header

Lorem Ipsum is simply dummy text of the printing and typesetting industry. Lorem Ipsum has been the industry's standard dummy text ever since the 1500s, when an unknown printer took a galley of type and scrambled it to make a type specimen book. It has survived not only five centuries, but also the leap into electronic typesetting, remaining essentially unchanged.

## Sub header

- List 1
- List 2
- List me
- List you

```python
import sys

def greeting():
    print("Hello world!")
```

```mermaid
graph LR
    Prompt --> Model --> Stream
```

## Sub header too

| Tokens | Updates |
|-------:|:--------|
| 100    | 20/s    |
| 10000  | adaptive |

The end.

"#;

/// Number of times the sample is repeated.
const REPEAT: usize = 3;

fn main() -> mdstream::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let text = SAMPLE_TEXT.repeat(REPEAT);
    let mut stream = MarkdownStream::stdout(MarkdownOptions::default());

    let start = Instant::now();
    let mut rendered = 0usize;
    let mut throttled = 0usize;

    for (end, _) in text.char_indices().skip(6) {
        match stream.update(&text[..end], false)? {
            Update::Throttled => throttled += 1,
            _ => rendered += 1,
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    stream.update(&text, true)?;

    println!(
        "\n{rendered} renders, {throttled} throttled, {:.1}s",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
