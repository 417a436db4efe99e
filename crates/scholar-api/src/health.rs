//! Liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// `GET /`: always answers while the process is serving requests.
pub async fn liveness() -> Json<Value> { Json(json!({ "message": "Backend server is running" })) }
