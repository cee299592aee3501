//! Application state: the content catalog and the learner progress store.
//!
//! This module owns:
//!   - the catalog (topic registry, lessons, challenges), immutable after startup
//!   - per-learner completion sets and reward totals
//!
//! Content bank entries are inserted first; built-in seeds fill in whatever
//! ids and slugs the bank did not provide.

use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::config::{load_catalog_config_from_env, CatalogConfig, ChallengeCfg, LessonCfg, TopicCfg};
use crate::domain::{Challenge, ContentSource, ItemKind, Lesson, Reward, TopicMeta};
use crate::error::AppError;
use crate::progress::LearnerProgress;
use crate::seeds::{seed_challenges, seed_lessons, seed_topics};

const DEFAULT_MINUTES: u32 = 10;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub learners: Arc<RwLock<HashMap<String, LearnerProgress>>>,
}

impl AppState {
    /// Build state from env: load the content bank (if any), then seed.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        Self::from_config(load_catalog_config_from_env())
    }

    #[instrument(level = "info", skip_all, fields(has_bank = cfg.is_some()))]
    pub fn from_config(cfg: Option<CatalogConfig>) -> Self {
        let mut catalog = Catalog::default();
        let seeded_lessons = seed_lessons();
        let seeded_challenges = seed_challenges();

        if let Some(cfg) = &cfg {
            for tc in &cfg.topics {
                if !catalog.register_topic(topic_from_cfg(tc)) {
                    error!(target: "lesson", slug = %tc.slug, "Skipping duplicate topic in bank.");
                }
            }
            let mut slots =
                OrderSlots::from_seeds(seeded_lessons.iter().map(|l| (l.id.as_str(), l.topic.as_str(), l.order)));
            for lc in &cfg.lessons {
                let Some(lesson) = lesson_from_cfg(lc, &mut slots) else {
                    continue;
                };
                let id = lesson.id.clone();
                if !catalog.insert_lesson(lesson) {
                    error!(target: "lesson", %id, "Skipping bank lesson: duplicate id.");
                }
            }
            let mut slots =
                OrderSlots::from_seeds(seeded_challenges.iter().map(|c| (c.id.as_str(), c.topic.as_str(), c.order)));
            for cc in &cfg.challenges {
                let Some(challenge) = challenge_from_cfg(cc, &mut slots) else {
                    continue;
                };
                let id = challenge.id.clone();
                if !catalog.insert_challenge(challenge) {
                    error!(target: "lesson", %id, "Skipping bank challenge: duplicate id.");
                }
            }
        }

        // Always insert built-in seeds, but don't overwrite existing ids or slugs.
        for t in seed_topics() {
            catalog.register_topic(t);
        }
        for l in seeded_lessons {
            let id = l.id.clone();
            if !catalog.insert_lesson(l) {
                debug!(target: "lesson", %id, "Seed lesson overridden by bank.");
            }
        }
        for c in seeded_challenges {
            let id = c.id.clone();
            if !catalog.insert_challenge(c) {
                debug!(target: "lesson", %id, "Seed challenge overridden by bank.");
            }
        }

        log_inventory(&catalog);

        Self {
            catalog: Arc::new(catalog),
            learners: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Copy of a learner's progress; unknown learners start empty.
    #[instrument(level = "debug", skip_all, fields(%user_id))]
    pub async fn learner(&self, user_id: &str) -> LearnerProgress {
        self.learners.read().await.get(user_id).cloned().unwrap_or_default()
    }

    /// Record a completion and pay out its reward exactly once.
    #[instrument(level = "info", skip_all, fields(%user_id, %kind, %id))]
    pub async fn claim(
        &self,
        user_id: &str,
        kind: ItemKind,
        id: &str,
        reward: Reward,
    ) -> Result<LearnerProgress, AppError> {
        let mut learners = self.learners.write().await;
        let progress = learners.entry(user_id.to_string()).or_default();
        if !progress.claim(kind, id, reward) {
            return Err(AppError::AlreadyCompleted { kind, id: id.to_string() });
        }
        info!(
            target: "progress",
            %user_id, %kind, %id,
            diamonds = progress.diamonds,
            experience = progress.experience,
            "Reward claimed"
        );
        Ok(progress.clone())
    }
}

fn topic_from_cfg(tc: &TopicCfg) -> TopicMeta {
    let fallback = TopicMeta::fallback(&tc.slug);
    TopicMeta {
        slug: tc.slug.clone(),
        name: tc.name.clone().unwrap_or(fallback.name),
        icon: tc.icon.clone().unwrap_or(fallback.icon),
        color: tc.color.clone().unwrap_or(fallback.color),
        description: tc.description.clone().unwrap_or(fallback.description),
    }
}

/// Positions within a topic. A bank entry replacing a built-in one keeps its
/// slot; new entries follow the built-ins of their topic in bank order.
#[derive(Default)]
struct OrderSlots {
    by_id: HashMap<String, (String, u32)>,
    last: HashMap<String, u32>,
}

impl OrderSlots {
    fn from_seeds<'a>(seeds: impl IntoIterator<Item = (&'a str, &'a str, u32)>) -> Self {
        let mut slots = Self::default();
        for (id, topic, order) in seeds {
            slots.by_id.insert(id.to_string(), (topic.to_string(), order));
            let last = slots.last.entry(topic.to_string()).or_default();
            *last = (*last).max(order);
        }
        slots
    }

    fn assign(&mut self, id: &str, topic: &str) -> u32 {
        if let Some((_, order)) = self.by_id.get(id).filter(|(seed_topic, _)| seed_topic == topic) {
            return *order;
        }
        let last = self.last.entry(topic.to_string()).or_default();
        *last += 1;
        *last
    }
}

fn reward_from_cfg(default: Reward, diamonds: Option<u32>, experience: Option<u32>) -> Reward {
    Reward {
        diamonds: diamonds.unwrap_or(default.diamonds),
        experience: experience.unwrap_or(default.experience),
    }
}

fn lesson_from_cfg(lc: &LessonCfg, slots: &mut OrderSlots) -> Option<Lesson> {
    let id = lc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
    if lc.title.trim().is_empty() || lc.content.trim().is_empty() {
        error!(target: "lesson", %id, topic = %lc.topic, "Skipping bank lesson: missing title or content.");
        return None;
    }
    let order = slots.assign(&id, &lc.topic);
    Some(Lesson {
        id,
        topic: lc.topic.clone(),
        title: lc.title.clone(),
        difficulty: lc.difficulty,
        estimated_minutes: lc.estimated_minutes.unwrap_or(DEFAULT_MINUTES),
        reward: reward_from_cfg(lc.difficulty.default_reward(), lc.diamond_reward, lc.experience_reward),
        content: lc.content.clone(),
        order,
        source: ContentSource::LocalBank,
    })
}

fn challenge_from_cfg(cc: &ChallengeCfg, slots: &mut OrderSlots) -> Option<Challenge> {
    let id = cc.id.clone().unwrap_or_else(|| Uuid::new_v4().to_string());
    if cc.title.trim().is_empty() || cc.description.trim().is_empty() {
        error!(target: "lesson", %id, topic = %cc.topic, "Skipping bank challenge: missing title or description.");
        return None;
    }
    let order = slots.assign(&id, &cc.topic);
    Some(Challenge {
        id,
        topic: cc.topic.clone(),
        title: cc.title.clone(),
        difficulty: cc.difficulty,
        estimated_minutes: cc.estimated_minutes.unwrap_or(DEFAULT_MINUTES),
        reward: reward_from_cfg(cc.difficulty.default_reward(), cc.diamond_reward, cc.experience_reward),
        description: cc.description.clone(),
        starter_code: cc.starter_code.clone(),
        language: cc.language.clone(),
        order,
        source: ContentSource::LocalBank,
    })
}

/// Inventory summary by topic/source.
fn log_inventory(catalog: &Catalog) {
    let mut counts: HashMap<(String, ContentSource), (usize, usize)> = HashMap::new();
    for l in catalog.all_lessons() {
        counts.entry((l.topic.clone(), l.source)).or_default().0 += 1;
    }
    for c in catalog.all_challenges() {
        counts.entry((c.topic.clone(), c.source)).or_default().1 += 1;
    }
    for ((topic, source), (lessons, challenges)) in counts {
        info!(target: "lesson", %topic, ?source, lessons, challenges, "Startup content inventory");
    }
    info!(
        target: "codearena_backend",
        topics = catalog.topics().len(),
        lessons = catalog.lesson_count(),
        challenges = catalog.challenge_count(),
        "Catalog ready"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Difficulty;

    fn bank() -> CatalogConfig {
        toml::from_str(
            r##"
[[topics]]
slug = "python"
name = "Python 3"

[[topics]]
slug = "rust"
icon = "🦀"

[[lessons]]
id = "py-variables"
topic = "python"
title = "Names"
content = "Overrides the seed."

[[lessons]]
topic = "rust"
title = "Ownership"
difficulty = "advanced"
experience_reward = 999
content = "# Ownership"

[[lessons]]
topic = "rust"
title = "No content"

[[challenges]]
id = "rs-arena"
topic = "rust"
title = "Borrow"
description = "Fix it."
"##,
        )
        .unwrap()
    }

    #[test]
    fn seeds_only_without_bank() {
        let state = AppState::from_config(None);
        assert_eq!(state.catalog.lesson_count(), seed_lessons().len());
        assert_eq!(state.catalog.challenge_count(), seed_challenges().len());
        assert_eq!(state.catalog.topics().len(), seed_topics().len());
    }

    #[test]
    fn bank_overrides_seeds_and_adds_content() {
        let state = AppState::from_config(Some(bank()));
        let cat = &state.catalog;

        let py = cat.lesson("py-variables").unwrap();
        assert_eq!(py.title, "Names");
        assert_eq!(py.source, ContentSource::LocalBank);

        let python = cat.topic("python").unwrap();
        assert_eq!(python.name, "Python 3");
        assert_eq!(python.icon, "📘");

        let rust = cat.lessons_for("rust");
        assert_eq!(rust.len(), 1, "lesson without content is skipped");
        assert_eq!(rust[0].content, "# Ownership");
        assert_eq!(rust[0].order, 1);
        assert_eq!(rust[0].difficulty, Difficulty::Advanced);
        assert_eq!(rust[0].reward, Reward { diamonds: 30, experience: 999 });
        assert_eq!(rust[0].estimated_minutes, DEFAULT_MINUTES);
        assert!(Uuid::parse_str(&rust[0].id).is_ok());

        assert!(cat.challenge("rs-arena").is_some());
        assert_eq!(cat.topics()[0].slug, "python");
        assert_eq!(cat.topics()[1].slug, "rust");
    }

    #[test]
    fn bank_lessons_follow_seeds_within_their_topic() {
        let cfg: CatalogConfig = toml::from_str(
            r#"
[[lessons]]
topic = "python"
title = "Comprehensions"
content = "Lists in one line."

[[lessons]]
id = "py-loops"
topic = "python"
title = "Zipped Loops"
content = "Replaces the seed, keeps its place."

[[lessons]]
topic = "javascript"
title = "A Promise"
content = "Async values."
"#,
        )
        .unwrap();
        let state = AppState::from_config(Some(cfg));

        let python: Vec<(&str, u32)> =
            state.catalog.lessons_for("python").into_iter().map(|l| (l.title.as_str(), l.order)).collect();
        assert_eq!(
            python,
            vec![("Variables and Types", 1), ("Zipped Loops", 2), ("Functions", 3), ("Comprehensions", 4)]
        );

        let js = state.catalog.lessons_for("javascript");
        assert_eq!(js.last().unwrap().title, "A Promise");
        assert_eq!(js.last().unwrap().order, 3);
    }

    #[tokio::test]
    async fn claim_is_idempotent_per_learner() {
        let state = AppState::from_config(None);
        let reward = Reward { diamonds: 10, experience: 50 };
        let p = state.claim("ada", ItemKind::Lesson, "py-loops", reward).await.unwrap();
        assert_eq!(p.diamonds, 10);

        let err = state.claim("ada", ItemKind::Lesson, "py-loops", reward).await.unwrap_err();
        assert!(matches!(err, AppError::AlreadyCompleted { kind: ItemKind::Lesson, .. }));

        // Another learner is unaffected.
        state.claim("bob", ItemKind::Lesson, "py-loops", reward).await.unwrap();
        assert_eq!(state.learner("ada").await.diamonds, 10);
        assert_eq!(state.learner("nobody").await.diamonds, 0);
    }
}
