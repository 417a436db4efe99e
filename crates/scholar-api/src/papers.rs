//! Handlers for `/papers` endpoints.
//!
//! | Method   | Path          | Notes |
//! |----------|---------------|-------|
//! | `GET`    | `/papers`     | All papers, oldest first |
//! | `POST`   | `/papers`     | Body: JSON object of client fields; returns the stored paper |
//! | `GET`    | `/papers/:id` | 404 if not found |
//! | `PUT`    | `/papers/:id` | Body: replacement client fields; 404 if not found |
//! | `DELETE` | `/papers/:id` | `{"message":"Paper deleted"}`; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::JsonRejection},
};
use scholar_core::{
  paper::{Paper, PaperFields, PaperId},
  service::PaperService,
};
use serde::Serialize;
use tracing::info;

use crate::error::ApiError;

/// Body returned by a successful delete.
#[derive(Debug, Serialize)]
pub struct Deleted {
  pub message: &'static str,
}

fn body(payload: Result<Json<PaperFields>, JsonRejection>) -> Result<PaperFields, ApiError> {
  payload
    .map(|Json(fields)| fields)
    .map_err(ApiError::from)
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /papers`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Paper>>, ApiError>
where
  S: PaperService,
{
  let papers = store
    .list()
    .await
    .map_err(ApiError::store("Failed to list papers"))?;
  Ok(Json(papers))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /papers`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  payload: Result<Json<PaperFields>, JsonRejection>,
) -> Result<Json<Paper>, ApiError>
where
  S: PaperService,
{
  let fields = body(payload)?;
  let paper = store
    .create(fields)
    .await
    .map_err(ApiError::store("Failed to create paper"))?;
  info!(id = %paper.id, "created paper");
  Ok(Json(paper))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /papers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PaperId>,
) -> Result<Json<Paper>, ApiError>
where
  S: PaperService,
{
  let paper = store
    .get(&id)
    .await
    .map_err(ApiError::store("Failed to get paper"))?
    .ok_or_else(|| ApiError::NotFound(id.clone()))?;
  Ok(Json(paper))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /papers/:id` replaces every client field.
pub async fn update_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PaperId>,
  payload: Result<Json<PaperFields>, JsonRejection>,
) -> Result<Json<Paper>, ApiError>
where
  S: PaperService,
{
  let fields = body(payload)?;
  let paper = store
    .update(&id, fields)
    .await
    .map_err(ApiError::store("Failed to update paper"))?
    .ok_or_else(|| ApiError::NotFound(id.clone()))?;
  info!(id = %paper.id, "updated paper");
  Ok(Json(paper))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /papers/:id`
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<PaperId>,
) -> Result<Json<Deleted>, ApiError>
where
  S: PaperService,
{
  store
    .delete(&id)
    .await
    .map_err(ApiError::store("Failed to delete paper"))?
    .ok_or_else(|| ApiError::NotFound(id.clone()))?;
  info!(%id, "deleted paper");
  Ok(Json(Deleted {
    message: "Paper deleted",
  }))
}
