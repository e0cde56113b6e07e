//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Exceptions reported by the register are not errors; they are served as
/// `200` with an `errors` body.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("register unavailable: {0}")]
  Upstream(#[source] abr_client::Error),
}

impl From<abr_client::Error> for ApiError {
  fn from(e: abr_client::Error) -> Self {
    if e.is_upstream() {
      ApiError::Upstream(e)
    } else {
      ApiError::BadRequest(e.to_string())
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Upstream(e) => {
        tracing::warn!(error = %e, "register request failed");
        (StatusCode::BAD_GATEWAY, e.to_string())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
