//! Block-level structure of a text segment: headings, bullet lists, paragraphs.
//!
//! Line-oriented state machine. Headings (`#` to `###`) always stand alone,
//! consecutive bullet lines (`-` or `*`) merge into one list, other non-blank
//! lines merge into one paragraph. A blank line ends whatever is open.

use once_cell::sync::Lazy;
use regex::Regex;

static HEADING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(#{1,3})\s+(\S.*)$").unwrap());
static LIST_ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-*]\s+(\S.*)$").unwrap());

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
  Heading { level: u8, text: String },
  List { items: Vec<String> },
  /// Lines joined with `\n`; each newline is a soft break.
  Paragraph { text: String },
}

enum Line<'a> {
  Heading { level: u8, text: &'a str },
  Item(&'a str),
  Blank,
  Text(&'a str),
}

fn classify(line: &str) -> Line<'_> {
  if let Some(caps) = HEADING_RE.captures(line) {
    let (Some(marks), Some(text)) = (caps.get(1), caps.get(2)) else {
      return Line::Text(line);
    };
    return Line::Heading { level: marks.as_str().len() as u8, text: text.as_str().trim_end() };
  }
  if let Some(text) = LIST_ITEM_RE.captures(line).and_then(|caps| caps.get(1)) {
    return Line::Item(text.as_str().trim_end());
  }
  if line.trim().is_empty() {
    return Line::Blank;
  }
  Line::Text(line)
}

enum State<'a> {
  Default,
  InParagraph(Vec<&'a str>),
  InList(Vec<&'a str>),
}

impl State<'_> {
  fn flush(self, blocks: &mut Vec<Block>) {
    match self {
      State::Default => {}
      State::InParagraph(lines) => blocks.push(Block::Paragraph { text: lines.join("\n") }),
      State::InList(items) => {
        blocks.push(Block::List { items: items.into_iter().map(str::to_string).collect() })
      }
    }
  }
}

pub fn parse_blocks(body: &str) -> Vec<Block> {
  let mut blocks = Vec::new();
  let mut state = State::Default;

  for line in body.lines() {
    state = match (state, classify(line)) {
      (open, Line::Heading { level, text }) => {
        open.flush(&mut blocks);
        blocks.push(Block::Heading { level, text: text.to_string() });
        State::Default
      }
      (State::InList(mut items), Line::Item(item)) => {
        items.push(item);
        State::InList(items)
      }
      (open, Line::Item(item)) => {
        open.flush(&mut blocks);
        State::InList(vec![item])
      }
      (open, Line::Blank) => {
        open.flush(&mut blocks);
        State::Default
      }
      (State::InParagraph(mut lines), Line::Text(text)) => {
        lines.push(text);
        State::InParagraph(lines)
      }
      (open, Line::Text(text)) => {
        open.flush(&mut blocks);
        State::InParagraph(vec![text])
      }
    };
  }
  state.flush(&mut blocks);
  blocks
}

/// Write blocks back as source lines: `#`-prefixed headings, `-` items,
/// paragraphs verbatim, blocks separated by a blank line.
#[allow(dead_code)]
pub fn to_source(blocks: &[Block]) -> String {
  blocks
    .iter()
    .map(|block| match block {
      Block::Heading { level, text } => format!("{} {}", "#".repeat(*level as usize), text),
      Block::List { items } => {
        items.iter().map(|item| format!("- {item}")).collect::<Vec<_>>().join("\n")
      }
      Block::Paragraph { text } => text.clone(),
    })
    .collect::<Vec<_>>()
    .join("\n\n")
}
