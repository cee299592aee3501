//! Lesson content rendering: a small markdown subset with fenced code.
//!
//! Pipeline: source → [`fence::split`] → per text segment [`blocks::parse_blocks`]
//! → per block [`inline::parse_inline`]. Code segments without a tag get a
//! label from [`language::infer`]. Everything here is pure and total.

pub mod blocks;
pub mod fence;
pub mod inline;
pub mod language;

use serde::Serialize;

use self::blocks::{parse_blocks, Block};
use self::fence::{split, Segment};
use self::inline::{parse_inline, Span};

/// A renderable node handed to the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
  Code {
    language: String,
    /// True when `language` was guessed rather than written on the fence.
    inferred: bool,
    body: String,
  },
  Heading {
    level: u8,
    content: Vec<Span>,
  },
  List {
    items: Vec<Vec<Span>>,
  },
  Paragraph {
    content: Vec<Span>,
  },
}

pub fn render(source: &str) -> Vec<Node> {
  let mut nodes = Vec::new();
  for segment in split(source) {
    match segment {
      Segment::Code { language: Some(language), body, .. } => {
        nodes.push(Node::Code { language, inferred: false, body });
      }
      Segment::Code { language: None, body, .. } => {
        let language = language::infer(&body).as_str().to_string();
        nodes.push(Node::Code { language, inferred: true, body });
      }
      Segment::Text { body } => nodes.extend(parse_blocks(&body).into_iter().map(render_block)),
    }
  }
  nodes
}

fn render_block(block: Block) -> Node {
  match block {
    Block::Heading { level, text } => Node::Heading { level, content: parse_inline(&text) },
    Block::List { items } => Node::List { items: items.iter().map(|item| parse_inline(item)).collect() },
    Block::Paragraph { text } => Node::Paragraph { content: parse_inline(&text) },
  }
}
