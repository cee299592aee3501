//! Domain models: difficulty, rewards, topics, lessons and code-arena challenges.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Named difficulty levels; the numeric level (1..=3) is what the client sorts on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
  #[default]
  Beginner,
  Intermediate,
  Advanced,
}

impl Difficulty {
  pub fn level(&self) -> u8 {
    match self {
      Difficulty::Beginner => 1,
      Difficulty::Intermediate => 2,
      Difficulty::Advanced => 3,
    }
  }

  pub fn from_level(level: u8) -> Option<Self> {
    match level {
      1 => Some(Difficulty::Beginner),
      2 => Some(Difficulty::Intermediate),
      3 => Some(Difficulty::Advanced),
      _ => None,
    }
  }

  /// Reward used when a bank entry does not name one.
  pub fn default_reward(&self) -> Reward {
    match self {
      Difficulty::Beginner => Reward { diamonds: 10, experience: 50 },
      Difficulty::Intermediate => Reward { diamonds: 20, experience: 100 },
      Difficulty::Advanced => Reward { diamonds: 30, experience: 150 },
    }
  }
}

/// Accepts a level name (`advanced`) or its number (`3`), case-insensitive.
impl FromStr for Difficulty {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let s = s.trim();
    let parsed = match s.to_ascii_lowercase().as_str() {
      "beginner" => Some(Difficulty::Beginner),
      "intermediate" => Some(Difficulty::Intermediate),
      "advanced" => Some(Difficulty::Advanced),
      other => other.parse::<u8>().ok().and_then(Difficulty::from_level),
    };
    parsed.ok_or_else(|| format!("unknown difficulty `{s}`, expected beginner/intermediate/advanced or 1..=3"))
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
  pub diamonds: u32,
  pub experience: u32,
}

/// Where did a lesson or challenge come from?
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
  LocalBank, // from the TOML content bank
  Seed,      // built-in curriculum
}

/// Which kind of item a completion refers to.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
  Lesson,
  Challenge,
}

impl fmt::Display for ItemKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ItemKind::Lesson => f.write_str("lesson"),
      ItemKind::Challenge => f.write_str("challenge"),
    }
  }
}

/// Category metadata shown on the topic cards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TopicMeta {
  pub slug: String,
  pub name: String,
  pub icon: String,
  pub color: String,
  pub description: String,
}

impl TopicMeta {
  /// Metadata for a topic that has content but no registry entry.
  pub fn fallback(slug: &str) -> Self {
    Self {
      slug: slug.to_string(),
      name: slug.to_string(),
      icon: "📘".into(),
      color: "#6B7280".into(),
      description: String::new(),
    }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lesson {
  pub id: String,
  pub topic: String,
  pub title: String,
  pub difficulty: Difficulty,
  pub estimated_minutes: u32,
  pub reward: Reward,
  /// Markdown-subset source with fenced code blocks.
  pub content: String,
  /// Position within its topic.
  pub order: u32,
  pub source: ContentSource,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
  pub id: String,
  pub topic: String,
  pub title: String,
  pub difficulty: Difficulty,
  pub estimated_minutes: u32,
  pub reward: Reward,
  pub description: String,
  pub starter_code: Option<String>,
  pub language: Option<String>,
  pub order: u32,
  pub source: ContentSource,
}
