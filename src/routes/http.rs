//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{extract::{Path, Query, State}, Json, response::IntoResponse};
use tracing::{info, instrument};

use crate::catalog::LessonQuery;
use crate::error::AppError;
use crate::logic::*;
use crate::markdown::render;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, q), fields(user = %q.user()))]
pub async fn http_list_topics(
  State(state): State<Arc<AppState>>,
  Query(q): Query<UserQuery>,
) -> impl IntoResponse {
  let topics = list_topics(&state, q.user()).await;
  info!(target: "lesson", user = %q.user(), count = topics.len(), "HTTP topics served");
  Json(topics)
}

#[instrument(level = "info", skip(state, q), fields(%slug, user = %q.user()))]
pub async fn http_get_topic(
  State(state): State<Arc<AppState>>,
  Path(slug): Path<String>,
  Query(q): Query<UserQuery>,
) -> Result<Json<TopicDetailOut>, AppError> {
  Ok(Json(topic_detail(&state, q.user(), &slug).await?))
}

#[instrument(level = "info", skip(state, q), fields(topic = ?q.topic, search = ?q.search, page = ?q.page))]
pub async fn http_list_lessons(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LessonListQuery>,
) -> impl IntoResponse {
  let user = resolve_user(q.user_id.as_deref());
  let query = LessonQuery {
    topic: q.topic.clone(),
    search: q.search.clone(),
    difficulty: q.difficulty,
    page: q.page,
    page_size: q.page_size,
  };
  Json(browse_lessons(&state, user, &query).await)
}

#[instrument(level = "info", skip(state, q), fields(%id, user = %q.user()))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Query(q): Query<UserQuery>,
) -> Result<Json<LessonDetailOut>, AppError> {
  let detail = lesson_detail(&state, q.user(), &id).await?;
  info!(target: "lesson", %id, nodes = detail.nodes.len(), "HTTP lesson served");
  Ok(Json(detail))
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_complete_lesson(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<CompleteIn>,
) -> Result<Json<ClaimOut>, AppError> {
  let user = resolve_user(body.user_id.as_deref());
  let out = complete_lesson(&state, user, &id).await?;
  info!(target: "progress", %user, %id, diamonds = out.diamonds_awarded, xp = out.experience_awarded, "HTTP lesson completed");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, q), fields(topic = ?q.topic))]
pub async fn http_list_challenges(
  State(state): State<Arc<AppState>>,
  Query(q): Query<ChallengeListQuery>,
) -> impl IntoResponse {
  let user = resolve_user(q.user_id.as_deref());
  Json(list_challenges(&state, user, q.topic.as_deref()).await)
}

#[instrument(level = "info", skip(state, q), fields(%id, user = %q.user()))]
pub async fn http_get_challenge(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Query(q): Query<UserQuery>,
) -> Result<Json<ChallengeDetailOut>, AppError> {
  Ok(Json(challenge_detail(&state, q.user(), &id).await?))
}

#[instrument(level = "info", skip(state, body), fields(%id))]
pub async fn http_complete_challenge(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
  Json(body): Json<CompleteIn>,
) -> Result<Json<ClaimOut>, AppError> {
  let user = resolve_user(body.user_id.as_deref());
  let out = complete_challenge(&state, user, &id).await?;
  info!(target: "progress", %user, %id, diamonds = out.diamonds_awarded, xp = out.experience_awarded, "HTTP challenge completed");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, q), fields(user = %q.user()))]
pub async fn http_get_profile(
  State(state): State<Arc<AppState>>,
  Query(q): Query<UserQuery>,
) -> impl IntoResponse {
  Json(profile(&state, q.user()).await)
}

#[instrument(level = "info", skip(body), fields(content_len = body.content.len()))]
pub async fn http_post_render(Json(body): Json<RenderIn>) -> impl IntoResponse {
  Json(RenderOut { nodes: render(&body.content) })
}
