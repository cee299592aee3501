//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{de, Deserialize, Deserializer, Serialize};

use crate::catalog::Page;
use crate::domain::{Challenge, Difficulty, ItemKind, Lesson, TopicMeta};
use crate::markdown::Node;
use crate::progress::{Completable, LearnerProgress, TopicProgress};

pub const GUEST_USER: &str = "guest";

//
// Requests
//

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<String>,
}

impl UserQuery {
    pub fn user(&self) -> &str {
        resolve_user(self.user_id.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonListQuery {
    pub user_id: Option<String>,
    pub topic: Option<String>,
    pub search: Option<String>,
    #[serde(default, deserialize_with = "difficulty_param")]
    pub difficulty: Option<Difficulty>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeListQuery {
    pub user_id: Option<String>,
    pub topic: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteIn {
    #[serde(default)]
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RenderIn {
    pub content: String,
}

/// `?difficulty=` takes a level name or its number; blank means no filter.
fn difficulty_param<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Difficulty>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| raw.parse().map_err(de::Error::custom))
        .transpose()
}

/// Blank or missing user ids fall back to the shared guest profile.
pub fn resolve_user(user_id: Option<&str>) -> &str {
    match user_id.map(str::trim) {
        Some(id) if !id.is_empty() => id,
        _ => GUEST_USER,
    }
}

//
// Responses
//

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonSummary {
    pub id: String,
    pub topic: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub difficulty_level: u8,
    pub estimated_minutes: u32,
    pub diamond_reward: u32,
    pub experience_reward: u32,
    pub is_completed: bool,
}

impl Completable for LessonSummary {
    fn is_completed(&self) -> bool {
        self.is_completed
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSummary {
    pub id: String,
    pub topic: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub difficulty_level: u8,
    pub estimated_minutes: u32,
    pub diamond_reward: u32,
    pub experience_reward: u32,
    pub language: Option<String>,
    pub is_completed: bool,
}

impl Completable for ChallengeSummary {
    fn is_completed(&self) -> bool {
        self.is_completed
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOverviewOut {
    pub slug: String,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: String,
    #[serde(flatten)]
    pub progress: TopicProgress,
}

#[derive(Debug, Serialize)]
pub struct TopicDetailOut {
    pub topic: TopicOverviewOut,
    pub lessons: Vec<LessonSummary>,
    pub challenges: Vec<ChallengeSummary>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOut<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

#[derive(Debug, Serialize)]
pub struct LessonDetailOut {
    pub lesson: LessonSummary,
    pub nodes: Vec<Node>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeDetailOut {
    pub challenge: ChallengeSummary,
    pub nodes: Vec<Node>,
    pub starter_code: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileOut {
    pub user_id: String,
    pub diamonds: u32,
    pub experience: u32,
    pub level: u32,
    pub completed_lessons: usize,
    pub completed_challenges: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimOut {
    pub kind: ItemKind,
    pub id: String,
    pub diamonds_awarded: u32,
    pub experience_awarded: u32,
    pub profile: ProfileOut,
}

#[derive(Debug, Serialize)]
pub struct RenderOut {
    pub nodes: Vec<Node>,
}

//
// Conversions from internal types
//

pub fn lesson_summary(l: &Lesson, is_completed: bool) -> LessonSummary {
    LessonSummary {
        id: l.id.clone(),
        topic: l.topic.clone(),
        title: l.title.clone(),
        difficulty: l.difficulty,
        difficulty_level: l.difficulty.level(),
        estimated_minutes: l.estimated_minutes,
        diamond_reward: l.reward.diamonds,
        experience_reward: l.reward.experience,
        is_completed,
    }
}

pub fn challenge_summary(c: &Challenge, is_completed: bool) -> ChallengeSummary {
    ChallengeSummary {
        id: c.id.clone(),
        topic: c.topic.clone(),
        title: c.title.clone(),
        difficulty: c.difficulty,
        difficulty_level: c.difficulty.level(),
        estimated_minutes: c.estimated_minutes,
        diamond_reward: c.reward.diamonds,
        experience_reward: c.reward.experience,
        language: c.language.clone(),
        is_completed,
    }
}

pub fn topic_overview(meta: TopicMeta, progress: TopicProgress) -> TopicOverviewOut {
    TopicOverviewOut {
        slug: meta.slug,
        name: meta.name,
        icon: meta.icon,
        color: meta.color,
        description: meta.description,
        progress,
    }
}

pub fn profile_out(user_id: &str, p: &LearnerProgress) -> ProfileOut {
    ProfileOut {
        user_id: user_id.to_string(),
        diamonds: p.diamonds,
        experience: p.experience,
        level: p.level(),
        completed_lessons: p.completed_lessons.len(),
        completed_challenges: p.completed_challenges.len(),
    }
}

pub fn page_out<T, U>(page: Page<T>, f: impl FnMut(T) -> U) -> PageOut<U> {
    PageOut {
        items: page.items.into_iter().map(f).collect(),
        page: page.page,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
    }
}
