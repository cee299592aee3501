//! Loading the content bank (topic table, lessons, challenges) from TOML.
//!
//! See `CatalogConfig` for the expected schema. Every section is optional.

use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Difficulty;
use crate::error::ConfigError;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct CatalogConfig {
  #[serde(default)]
  pub topics: Vec<TopicCfg>,
  #[serde(default)]
  pub lessons: Vec<LessonCfg>,
  #[serde(default)]
  pub challenges: Vec<ChallengeCfg>,
}

/// Category metadata. Overrides a built-in topic with the same slug.
#[derive(Clone, Debug, Deserialize)]
pub struct TopicCfg {
  pub slug: String,
  #[serde(default)] pub name: Option<String>,
  #[serde(default)] pub icon: Option<String>,
  #[serde(default)] pub color: Option<String>,
  #[serde(default)] pub description: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct LessonCfg {
  #[serde(default)] pub id: Option<String>,
  pub topic: String,
  #[serde(default)] pub title: String,
  #[serde(default)] pub difficulty: Difficulty,
  #[serde(default)] pub estimated_minutes: Option<u32>,
  #[serde(default)] pub diamond_reward: Option<u32>,
  #[serde(default)] pub experience_reward: Option<u32>,
  #[serde(default)] pub content: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ChallengeCfg {
  #[serde(default)] pub id: Option<String>,
  pub topic: String,
  #[serde(default)] pub title: String,
  #[serde(default)] pub difficulty: Difficulty,
  #[serde(default)] pub estimated_minutes: Option<u32>,
  #[serde(default)] pub diamond_reward: Option<u32>,
  #[serde(default)] pub experience_reward: Option<u32>,
  #[serde(default)] pub description: String,
  #[serde(default)] pub starter_code: Option<String>,
  #[serde(default)] pub language: Option<String>,
}

pub fn load_catalog_config(path: &Path) -> Result<CatalogConfig, ConfigError> {
  let display = path.display().to_string();
  let raw = std::fs::read_to_string(path)
    .map_err(|source| ConfigError::Read { path: display.clone(), source })?;
  toml::from_str::<CatalogConfig>(&raw).map_err(|source| ConfigError::Parse { path: display, source })
}

/// Attempt to load `CatalogConfig` from CATALOG_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_catalog_config_from_env() -> Option<CatalogConfig> {
  let path = std::env::var("CATALOG_CONFIG_PATH").ok()?;
  match load_catalog_config(Path::new(&path)) {
    Ok(cfg) => {
      info!(
        target: "codearena_backend",
        %path,
        topics = cfg.topics.len(),
        lessons = cfg.lessons.len(),
        challenges = cfg.challenges.len(),
        "Loaded content bank (TOML)"
      );
      Some(cfg)
    }
    Err(e) => {
      error!(target: "codearena_backend", %path, error = %e, "Failed to load content bank; using built-in seeds only");
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const BANK: &str = r#"
[[topics]]
slug = "rust"
name = "Rust"
icon = "🦀"

[[lessons]]
id = "rs-101"
topic = "rust"
title = "Ownership"
difficulty = "intermediate"
diamond_reward = 25
content = """
# Ownership
Every value has **one** owner.
"""

[[challenges]]
topic = "rust"
title = "Borrow checker"
description = "Fix the `borrow` error."
"#;

  #[test]
  fn parses_full_bank() {
    let cfg: CatalogConfig = toml::from_str(BANK).unwrap();
    assert_eq!(cfg.topics.len(), 1);
    assert_eq!(cfg.topics[0].color, None);
    let lesson = &cfg.lessons[0];
    assert_eq!(lesson.difficulty, Difficulty::Intermediate);
    assert_eq!(lesson.diamond_reward, Some(25));
    assert_eq!(lesson.experience_reward, None);
    assert!(lesson.content.starts_with("# Ownership"));
    let challenge = &cfg.challenges[0];
    assert_eq!(challenge.id, None);
    assert_eq!(challenge.difficulty, Difficulty::Beginner);
  }

  #[test]
  fn empty_document_is_empty_bank() {
    let cfg: CatalogConfig = toml::from_str("").unwrap();
    assert!(cfg.topics.is_empty() && cfg.lessons.is_empty() && cfg.challenges.is_empty());
  }

  #[test]
  fn unknown_difficulty_is_a_parse_error() {
    let res = toml::from_str::<CatalogConfig>("[[lessons]]\ntopic = \"x\"\ndifficulty = \"expert\"\n");
    assert!(res.is_err());
  }

  #[test]
  fn missing_file_is_read_error() {
    let err = load_catalog_config(Path::new("/nonexistent/codearena/bank.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
  }

  #[test]
  fn malformed_file_is_parse_error() {
    let path = std::env::temp_dir().join(format!("codearena-bank-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, "[[lessons]\n").unwrap();
    let err = load_catalog_config(&path).unwrap_err();
    std::fs::remove_file(&path).ok();
    assert!(matches!(err, ConfigError::Parse { .. }));
  }
}
