//! HTTP server assembly for the ScholarAssist backend.
//!
//! Wraps the `scholar-api` router with the liveness route, a CORS policy that
//! admits a single trusted origin, and per-request tracing.

use std::sync::Arc;

use anyhow::Context as _;
use axum::{
  Router,
  http::{HeaderValue, Method, header},
  routing::get,
};
use scholar_core::service::PaperService;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SCHOLAR_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  /// The one browser origin allowed to call the API with credentials.
  #[serde(default = "default_allowed_origin")]
  pub allowed_origin: String,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 8000 }

fn default_allowed_origin() -> String { "http://localhost:3000".to_string() }

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:           default_host(),
      port:           default_port(),
      allowed_origin: default_allowed_origin(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// CORS policy admitting exactly `origin`, with credentials.
pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
  let origin = HeaderValue::from_str(origin)
    .with_context(|| format!("invalid allowed_origin {origin:?}"))?;
  Ok(
    CorsLayer::new()
      .allow_origin(origin)
      .allow_credentials(true)
      .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
      .allow_headers([header::CONTENT_TYPE]),
  )
}

/// Build the complete application router for `store`.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> anyhow::Result<Router>
where
  S: PaperService + 'static,
{
  Ok(
    Router::new()
      .route("/", get(scholar_api::health::liveness))
      .nest("/api", scholar_api::api_router(store))
      .layer(cors_layer(&config.allowed_origin)?)
      .layer(TraceLayer::new_for_http()),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use scholar_store_memory::MemoryStore;
  use tower::ServiceExt as _;

  fn app() -> Router {
    router(Arc::new(MemoryStore::new()), &ServerConfig::default()).unwrap()
  }

  #[tokio::test]
  async fn preflight_from_trusted_origin_is_allowed() {
    let req = Request::builder()
      .method("OPTIONS")
      .uri("/api/papers")
      .header(header::ORIGIN, "http://localhost:3000")
      .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
      .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
      .body(Body::empty())
      .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let headers = resp.headers();
    assert_eq!(
      headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "http://localhost:3000"
    );
    assert_eq!(
      headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
      "true"
    );
  }

  #[tokio::test]
  async fn other_origins_get_no_cors_headers() {
    let req = Request::builder()
      .uri("/api/papers")
      .header(header::ORIGIN, "http://evil.example")
      .body(Body::empty())
      .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
  }

  #[tokio::test]
  async fn liveness_is_mounted_at_root() {
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let resp = app().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
  }

  #[test]
  fn invalid_origin_is_rejected() {
    assert!(cors_layer("bad\norigin").is_err());
  }

  #[test]
  fn config_defaults() {
    let cfg: ServerConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.allowed_origin, "http://localhost:3000");
  }
}
