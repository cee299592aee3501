//! Core behaviors behind the HTTP handlers.
//!
//! This includes:
//!   - Topic overviews (grouping + completion aggregate per learner)
//!   - Lesson browsing (search / difficulty filter / pagination)
//!   - Lesson and challenge detail with rendered content
//!   - Completion claims paying diamonds and XP

use tracing::{debug, instrument};

use crate::catalog::LessonQuery;
use crate::domain::{ItemKind, TopicMeta};
use crate::error::AppError;
use crate::markdown::render;
use crate::progress::{aggregate, LearnerProgress};
use crate::protocol::*;
use crate::state::AppState;

fn topic_lists(state: &AppState, progress: &LearnerProgress, slug: &str) -> (Vec<LessonSummary>, Vec<ChallengeSummary>) {
  let lessons = state
    .catalog
    .lessons_for(slug)
    .into_iter()
    .map(|l| lesson_summary(l, progress.has_completed(ItemKind::Lesson, &l.id)))
    .collect();
  let challenges = state
    .catalog
    .challenges_for(slug)
    .into_iter()
    .map(|c| challenge_summary(c, progress.has_completed(ItemKind::Challenge, &c.id)))
    .collect();
  (lessons, challenges)
}

fn overview(state: &AppState, progress: &LearnerProgress, meta: TopicMeta) -> TopicDetailOut {
  let (lessons, challenges) = topic_lists(state, progress, &meta.slug);
  let topic = topic_overview(meta, aggregate(&lessons, &challenges));
  TopicDetailOut { topic, lessons, challenges }
}

#[instrument(level = "info", skip(state))]
pub async fn list_topics(state: &AppState, user_id: &str) -> Vec<TopicOverviewOut> {
  let progress = state.learner(user_id).await;
  state
    .catalog
    .topics()
    .into_iter()
    .map(|meta| overview(state, &progress, meta).topic)
    .collect()
}

#[instrument(level = "info", skip(state))]
pub async fn topic_detail(state: &AppState, user_id: &str, slug: &str) -> Result<TopicDetailOut, AppError> {
  let meta = state.catalog.topic(slug).ok_or_else(|| AppError::UnknownTopic(slug.to_string()))?;
  let progress = state.learner(user_id).await;
  Ok(overview(state, &progress, meta))
}

#[instrument(level = "info", skip(state, query), fields(topic = ?query.topic, search = ?query.search, page = ?query.page))]
pub async fn browse_lessons(state: &AppState, user_id: &str, query: &LessonQuery) -> PageOut<LessonSummary> {
  let progress = state.learner(user_id).await;
  let page = state.catalog.search_lessons(query);
  debug!(target: "lesson", total = page.total_items, page = page.page, pages = page.total_pages, "Lesson page built");
  page_out(page, |l| lesson_summary(l, progress.has_completed(ItemKind::Lesson, &l.id)))
}

#[instrument(level = "info", skip(state, topic))]
pub async fn list_challenges(state: &AppState, user_id: &str, topic: Option<&str>) -> Vec<ChallengeSummary> {
  let progress = state.learner(user_id).await;
  let challenges = match topic {
    Some(slug) => state.catalog.challenges_for(slug),
    None => state.catalog.all_challenges(),
  };
  challenges
    .into_iter()
    .map(|c| challenge_summary(c, progress.has_completed(ItemKind::Challenge, &c.id)))
    .collect()
}

#[instrument(level = "info", skip(state))]
pub async fn lesson_detail(state: &AppState, user_id: &str, id: &str) -> Result<LessonDetailOut, AppError> {
  let lesson = state.catalog.lesson(id).ok_or_else(|| AppError::UnknownLesson(id.to_string()))?;
  let progress = state.learner(user_id).await;
  let nodes = render(&lesson.content);
  debug!(target: "lesson", %id, content_len = lesson.content.len(), nodes = nodes.len(), "Lesson rendered");
  Ok(LessonDetailOut {
    lesson: lesson_summary(lesson, progress.has_completed(ItemKind::Lesson, id)),
    nodes,
  })
}

#[instrument(level = "info", skip(state))]
pub async fn challenge_detail(state: &AppState, user_id: &str, id: &str) -> Result<ChallengeDetailOut, AppError> {
  let challenge = state.catalog.challenge(id).ok_or_else(|| AppError::UnknownChallenge(id.to_string()))?;
  let progress = state.learner(user_id).await;
  Ok(ChallengeDetailOut {
    challenge: challenge_summary(challenge, progress.has_completed(ItemKind::Challenge, id)),
    nodes: render(&challenge.description),
    starter_code: challenge.starter_code.clone(),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn complete_lesson(state: &AppState, user_id: &str, id: &str) -> Result<ClaimOut, AppError> {
  let reward = state.catalog.lesson(id).ok_or_else(|| AppError::UnknownLesson(id.to_string()))?.reward;
  let progress = state.claim(user_id, ItemKind::Lesson, id, reward).await?;
  Ok(ClaimOut {
    kind: ItemKind::Lesson,
    id: id.to_string(),
    diamonds_awarded: reward.diamonds,
    experience_awarded: reward.experience,
    profile: profile_out(user_id, &progress),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn complete_challenge(state: &AppState, user_id: &str, id: &str) -> Result<ClaimOut, AppError> {
  let reward = state.catalog.challenge(id).ok_or_else(|| AppError::UnknownChallenge(id.to_string()))?.reward;
  let progress = state.claim(user_id, ItemKind::Challenge, id, reward).await?;
  Ok(ClaimOut {
    kind: ItemKind::Challenge,
    id: id.to_string(),
    diamonds_awarded: reward.diamonds,
    experience_awarded: reward.experience,
    profile: profile_out(user_id, &progress),
  })
}

#[instrument(level = "info", skip(state))]
pub async fn profile(state: &AppState, user_id: &str) -> ProfileOut {
  profile_out(user_id, &state.learner(user_id).await)
}
