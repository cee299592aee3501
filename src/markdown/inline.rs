//! Inline spans: `**bold**` and `` `code` ``.
//!
//! Two passes, left to right, non-overlapping. Bold is resolved first; only
//! the plain runs it leaves behind are scanned for inline code, so markers
//! inside a bold span are kept literally. Unmatched markers are plain text.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static BOLD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*\*([^*]+)\*\*").unwrap());
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"`([^`]+)`").unwrap());

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum Span {
  Text(String),
  Bold(String),
  Code(String),
}

impl Span {
  /// Text content without any markers.
  #[allow(dead_code)]
  pub fn text(&self) -> &str {
    match self {
      Span::Text(s) | Span::Bold(s) | Span::Code(s) => s,
    }
  }
}

pub fn parse_inline(input: &str) -> Vec<Span> {
  let mut spans = Vec::new();
  for piece in split_by(&BOLD_RE, input, Span::Bold) {
    match piece {
      Span::Text(plain) => spans.extend(split_by(&CODE_RE, &plain, Span::Code)),
      styled => spans.push(styled),
    }
  }
  spans
}

fn split_by(re: &Regex, input: &str, styled: fn(String) -> Span) -> Vec<Span> {
  let mut out = Vec::new();
  let mut cursor = 0;
  for caps in re.captures_iter(input) {
    let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1)) else {
      continue;
    };
    if whole.start() > cursor {
      out.push(Span::Text(input[cursor..whole.start()].to_string()));
    }
    out.push(styled(inner.as_str().to_string()));
    cursor = whole.end();
  }
  if cursor < input.len() {
    out.push(Span::Text(input[cursor..].to_string()));
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;
  use proptest::prelude::*;

  fn t(s: &str) -> Span {
    Span::Text(s.into())
  }

  #[test]
  fn resolves_bold_and_code() {
    assert_eq!(
      parse_inline("Some **bold** and `code` text."),
      vec![t("Some "), Span::Bold("bold".into()), t(" and "), Span::Code("code".into()), t(" text.")]
    );
  }

  #[test]
  fn plain_text_is_one_span() {
    assert_eq!(parse_inline("nothing special"), vec![t("nothing special")]);
  }

  #[test]
  fn empty_input_has_no_spans() {
    assert!(parse_inline("").is_empty());
  }

  #[test]
  fn unterminated_markers_stay_literal() {
    assert_eq!(parse_inline("a **b and `c"), vec![t("a **b and `c")]);
  }

  #[test]
  fn code_inside_bold_is_not_rescanned() {
    assert_eq!(parse_inline("**`x`**"), vec![Span::Bold("`x`".into())]);
  }

  #[test]
  fn bold_markers_inside_code_do_not_nest() {
    // Bold runs first and the asterisks inside the backticks form its markers.
    assert_eq!(
      parse_inline("`a **b** c`"),
      vec![t("`a "), Span::Bold("b".into()), t(" c`")]
    );
  }

  #[test]
  fn empty_markers_are_not_spans() {
    assert_eq!(parse_inline("**** and ``"), vec![t("**** and ``")]);
  }

  #[test]
  fn serializes_with_type_tag() {
    let json = serde_json::to_value(Span::Bold("hi".into())).unwrap();
    assert_eq!(json, serde_json::json!({ "type": "bold", "text": "hi" }));
  }

  fn rewrap(spans: &[Span]) -> String {
    spans
      .iter()
      .map(|s| match s {
        Span::Text(x) => x.clone(),
        Span::Bold(x) => format!("**{x}**"),
        Span::Code(x) => format!("`{x}`"),
      })
      .collect()
  }

  proptest! {
    #[test]
    fn only_marker_characters_are_consumed(input in "[a-c *`\n]{0,40}") {
      let spans = parse_inline(&input);
      let bold = spans.iter().filter(|s| matches!(s, Span::Bold(_))).count();
      let code = spans.iter().filter(|s| matches!(s, Span::Code(_))).count();
      let kept: usize = spans.iter().map(|s| s.text().len()).sum();
      prop_assert_eq!(kept, input.len() - 4 * bold - 2 * code);
      prop_assert_eq!(rewrap(&spans), input);
    }
  }
}
