//! Best-guess language label for untagged code fences.
//!
//! Keyword heuristics, checked in a fixed priority order. The first rule that
//! fires wins; anything unrecognised is `Text`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static PYTHON_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r"\b(def|import|class|print|for|while|if|elif|else|try|except|with)\b").unwrap()
});
static JAVASCRIPT_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(const|let|var|function)\b|=>|console\.log").unwrap());
static JAVA_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\b(class|public|private|void|int|string|new)\b").unwrap());

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  Python,
  JavaScript,
  Java,
  Cpp,
  Text,
}

impl Language {
  #[allow(dead_code)]
  pub const ALL: [Language; 5] =
    [Language::Python, Language::JavaScript, Language::Java, Language::Cpp, Language::Text];

  pub fn as_str(&self) -> &'static str {
    match self {
      Language::Python => "python",
      Language::JavaScript => "javascript",
      Language::Java => "java",
      Language::Cpp => "cpp",
      Language::Text => "text",
    }
  }
}

/// Guess the language of an untagged code body. Total: every input maps to
/// one of [`Language::ALL`].
pub fn infer(body: &str) -> Language {
  if PYTHON_RE.is_match(body) {
    Language::Python
  } else if JAVASCRIPT_RE.is_match(body) {
    Language::JavaScript
  } else if body.trim_start().starts_with("#include") {
    // Checked ahead of the Java keywords: `int main()` would otherwise
    // claim every C++ translation unit.
    Language::Cpp
  } else if JAVA_RE.is_match(body) {
    Language::Java
  } else {
    Language::Text
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use rstest::rstest;

  #[rstest]
  #[case("for i in range(10):\n    print(i)", Language::Python)]
  #[case("const x = 1; console.log(x)", Language::JavaScript)]
  #[case("#include <iostream>\nint main(){}", Language::Cpp)]
  #[case("just some prose", Language::Text)]
  #[case("", Language::Text)]
  #[case("items.map(x => x * 2)", Language::JavaScript)]
  #[case("public static void main(String[] args) {}", Language::Java)]
  #[case("  #include <vector>", Language::Cpp)]
  // Python keywords outrank everything else, including Java-looking bodies.
  #[case("public class Main {}", Language::Python)]
  #[case("print", Language::Python)]
  fn infers_expected_label(#[case] body: &str, #[case] expected: Language) {
    assert_eq!(infer(body), expected);
  }

  #[test]
  fn keywords_need_word_boundaries() {
    assert_eq!(infer("format deform letter"), Language::Text);
    assert_eq!(infer("interval"), Language::Text);
  }

  #[test]
  fn serializes_as_lowercase_label() {
    for lang in Language::ALL {
      let json = serde_json::to_string(&lang).unwrap();
      assert_eq!(json, format!("\"{}\"", lang.as_str()));
    }
  }

  proptest! {
    #[test]
    fn always_returns_a_known_label(body in "\\PC{0,64}") {
      prop_assert!(Language::ALL.contains(&infer(&body)));
    }
  }
}
