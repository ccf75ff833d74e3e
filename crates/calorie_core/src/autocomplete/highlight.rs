//! Match highlighting for suggestion names.

use serde::Serialize;

/// A run of consecutive characters sharing the same emphasis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub emphasized: bool,
}

/// Splits `name` into plain and emphasized runs.
///
/// Single left-to-right scan with a cursor into `positions` that only moves
/// forward. `positions` are character indices and are expected to be strictly
/// ascending; indices past the end of `name` are ignored.
pub fn highlight(name: &str, positions: &[usize]) -> Vec<Segment> {
    let mut segments: Vec<Segment> = Vec::new();
    let mut cursor = 0;

    for (index, ch) in name.chars().enumerate() {
        while cursor < positions.len() && positions[cursor] < index {
            cursor += 1;
        }
        let emphasized = cursor < positions.len() && positions[cursor] == index;
        if emphasized {
            cursor += 1;
        }

        match segments.last_mut() {
            Some(last) if last.emphasized == emphasized => last.text.push(ch),
            _ => segments.push(Segment {
                text: ch.to_string(),
                emphasized,
            }),
        }
    }

    segments
}

/// Renders segments as text, wrapping emphasized runs in `open`/`close`.
pub fn render_marked(segments: &[Segment], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.emphasized {
            out.push_str(open);
            out.push_str(&segment.text);
            out.push_str(close);
        } else {
            out.push_str(&segment.text);
        }
    }
    out
}
