//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use scholar_core::paper::PaperId;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by an API handler.
///
/// Store faults are reported to the caller as a fixed per-operation message;
/// the underlying cause only goes to the log.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("paper {0} not found")]
  NotFound(PaperId),

  /// The request body was not a JSON object; answered with the rejection's
  /// own status (400, 415 or 422).
  #[error(transparent)]
  Body(#[from] JsonRejection),

  #[error("{context}: {source}")]
  Store {
    context: &'static str,
    #[source]
    source:  Box<dyn std::error::Error + Send + Sync>,
  },
}

impl ApiError {
  /// Wrap a backend error under a caller-facing `context` message.
  pub fn store<E>(context: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| ApiError::Store {
      context,
      source: Box::new(e),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "Paper not found".to_owned()),
      ApiError::Body(rejection) => (rejection.status(), rejection.body_text()),
      ApiError::Store { context, source } => {
        error!(error = %source, "{context}");
        (StatusCode::INTERNAL_SERVER_ERROR, context.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
