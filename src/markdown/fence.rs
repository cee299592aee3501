//! Fenced code block splitting.
//!
//! Lesson source is partitioned into an ordered run of [`Segment`]s. Every
//! well-formed fence (three backticks, optional language tag, newline, body,
//! three backticks) becomes one `Segment::Code`; every run of characters in
//! between becomes one `Segment::Text`, kept verbatim.
//!
//! A fence that is never closed does not match, so its marker and everything
//! after it stay inside the surrounding `Text` segment.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(dead_code)]
pub const FENCE: &str = "```";

// Non-greedy body: the first closing marker after the opener ends the block.
static FENCE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"(?s)```([A-Za-z0-9_+#.-]*)\n(.*?)```").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
  Code {
    /// Tag written after the opening marker, `None` when the fence was bare.
    language: Option<String>,
    /// Body with leading blank lines and trailing whitespace removed.
    body: String,
    /// Body exactly as it appeared between the markers.
    raw_body: String,
  },
  Text {
    body: String,
  },
}

/// Split lesson source into code and text segments, in source order.
pub fn split(source: &str) -> Vec<Segment> {
  let mut segments = Vec::new();
  let mut cursor = 0;

  for caps in FENCE_RE.captures_iter(source) {
    let (Some(whole), Some(tag), Some(raw)) = (caps.get(0), caps.get(1), caps.get(2)) else {
      continue;
    };
    if whole.start() > cursor {
      segments.push(Segment::Text { body: source[cursor..whole.start()].to_string() });
    }
    let tag = tag.as_str();
    segments.push(Segment::Code {
      language: (!tag.is_empty()).then(|| tag.to_string()),
      body: trim_blank_lines(raw.as_str()).to_string(),
      raw_body: raw.as_str().to_string(),
    });
    cursor = whole.end();
  }

  if cursor < source.len() {
    segments.push(Segment::Text { body: source[cursor..].to_string() });
  }
  segments
}

/// Rebuild the source text from its segments, reinserting fence markers.
#[allow(dead_code)]
pub fn join(segments: &[Segment]) -> String {
  let mut out = String::new();
  for segment in segments {
    match segment {
      Segment::Text { body } => out.push_str(body),
      Segment::Code { language, raw_body, .. } => {
        out.push_str(FENCE);
        out.push_str(language.as_deref().unwrap_or_default());
        out.push('\n');
        out.push_str(raw_body);
        out.push_str(FENCE);
      }
    }
  }
  out
}

/// Drop whole blank lines at the start (keeping the first line's indentation)
/// and all trailing whitespace.
fn trim_blank_lines(raw: &str) -> &str {
  let trimmed = raw.trim_end();
  let mut start = 0;
  for line in trimmed.split_inclusive('\n') {
    if !line.trim().is_empty() {
      break;
    }
    start += line.len();
  }
  &trimmed[start..]
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use proptest::prelude::*;

  fn text(body: &str) -> Segment {
    Segment::Text { body: body.to_string() }
  }

  #[test]
  fn splits_text_and_tagged_fence() {
    let source = "Intro\n```python\nprint(\"hi\")\n```\nOutro";
    let segments = split(source);
    assert_eq!(
      segments,
      vec![
        text("Intro\n"),
        Segment::Code {
          language: Some("python".into()),
          body: "print(\"hi\")".into(),
          raw_body: "print(\"hi\")\n".into(),
        },
        text("\nOutro"),
      ]
    );
  }

  #[test]
  fn bare_fence_has_no_language() {
    let segments = split("```\nlet x = 1;\n```");
    assert_eq!(
      segments,
      vec![Segment::Code { language: None, body: "let x = 1;".into(), raw_body: "let x = 1;\n".into() }]
    );
  }

  #[test]
  fn body_keeps_indentation_but_drops_blank_edges() {
    let segments = split("```py\n\n\n    indented()\n\n```");
    match &segments[0] {
      Segment::Code { body, .. } => assert_eq!(body, "    indented()"),
      other => panic!("expected code segment, got {other:?}"),
    }
  }

  #[test]
  fn unterminated_fence_stays_text() {
    let source = "```js\nconsole.log(1)\n";
    assert_eq!(split(source), vec![text(source)]);
  }

  #[test]
  fn second_fence_unterminated_after_a_closed_one() {
    let source = "```\na\n```\nmiddle\n```rust\nfn main() {}\n";
    let segments = split(source);
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1], text("\nmiddle\n```rust\nfn main() {}\n"));
  }

  #[test]
  fn adjacent_fences_produce_no_empty_text() {
    let segments = split("```a\n1\n``````b\n2\n```");
    assert_eq!(segments.len(), 2);
    assert!(segments.iter().all(|s| matches!(s, Segment::Code { .. })));
  }

  #[test]
  fn empty_source_has_no_segments() {
    assert!(split("").is_empty());
  }

  proptest! {
    #[test]
    fn join_reconstructs_source(
      parts in prop::collection::vec(
        ("[a-z #*\n]{0,12}", proptest::option::of("[a-z]{1,6}"), "[a-z =();\n]{0,16}"),
        0..5,
      )
    ) {
      let mut source = String::new();
      for (prose, tag, code) in &parts {
        source.push_str(prose);
        source.push_str(FENCE);
        source.push_str(tag.as_deref().unwrap_or(""));
        source.push('\n');
        source.push_str(code);
        source.push_str(FENCE);
      }
      prop_assert_eq!(join(&split(&source)), source);
    }

    #[test]
    fn join_reconstructs_arbitrary_text(source in "[a-z`\n ]{0,40}") {
      prop_assert_eq!(join(&split(&source)), source);
    }
  }
}
