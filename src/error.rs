//! Error types for the service layer and configuration loading.
//!
//! The rendering core has no error type: every parse is total.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use thiserror::Error;

use crate::domain::ItemKind;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Unknown lesson: {0}")]
  UnknownLesson(String),

  #[error("Unknown challenge: {0}")]
  UnknownChallenge(String),

  #[error("Unknown topic: {0}")]
  UnknownTopic(String),

  #[error("The {kind} {id} is already completed; its reward was claimed")]
  AlreadyCompleted { kind: ItemKind, id: String },
}

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      AppError::UnknownLesson(_) | AppError::UnknownChallenge(_) | AppError::UnknownTopic(_) => {
        StatusCode::NOT_FOUND
      }
      AppError::AlreadyCompleted { .. } => StatusCode::CONFLICT,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
  }
}

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read {path}: {source}")]
  Read {
    path: String,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse {path}: {source}")]
  Parse {
    path: String,
    #[source]
    source: toml::de::Error,
  },
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn statuses_follow_error_kind() {
    assert_eq!(AppError::UnknownLesson("x".into()).status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::UnknownTopic("x".into()).status(), StatusCode::NOT_FOUND);
    let dup = AppError::AlreadyCompleted { kind: ItemKind::Challenge, id: "arena-1".into() };
    assert_eq!(dup.status(), StatusCode::CONFLICT);
    assert_eq!(dup.to_string(), "The challenge arena-1 is already completed; its reward was claimed");
  }
}
