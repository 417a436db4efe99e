//! JSON REST API for ScholarAssist papers.
//!
//! Exposes an axum [`Router`] backed by any
//! [`scholar_core::service::PaperService`]. CORS, tracing, and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! Router::new()
//!   .route("/", get(scholar_api::health::liveness))
//!   .nest("/api", scholar_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod health;
pub mod papers;

use std::sync::Arc;

use axum::{Router, routing::get};
use scholar_core::service::PaperService;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: PaperService + 'static,
{
  Router::new()
    .route("/papers", get(papers::list::<S>).post(papers::create::<S>))
    .route(
      "/papers/{id}",
      get(papers::get_one::<S>)
        .put(papers::update_one::<S>)
        .delete(papers::delete_one::<S>),
    )
    .with_state(store)
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use scholar_core::{
    clock::SystemClock,
    ident::IdGenerator,
    paper::{Paper, PaperId},
  };
  use scholar_store_memory::MemoryStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  fn app(store: MemoryStore) -> Router {
    Router::new()
      .route("/", get(health::liveness))
      .nest("/api", api_router(Arc::new(store)))
  }

  async fn send(store: &MemoryStore, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app(store.clone()).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn send_raw(store: &MemoryStore, request: Request<Body>) -> Response {
    app(store.clone()).oneshot(request).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Liveness ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_reports_liveness() {
    let store = MemoryStore::new();
    let resp = send(&store, "GET", "/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      json_body(resp).await,
      json!({ "message": "Backend server is running" })
    );
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_200_with_server_fields() {
    let store = MemoryStore::new();
    let resp = send(&store, "POST", "/api/papers", Some(json!({ "title": "A" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let paper: Paper = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(paper.title(), Some("A"));
    assert_eq!(paper.created_at, paper.updated_at);
    assert!(!paper.id.is_new());
  }

  #[tokio::test]
  async fn create_rejects_non_object_body() {
    let store = MemoryStore::new();
    let resp = send(&store, "POST", "/api/papers", Some(json!(["not", "an", "object"]))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn create_rejects_malformed_json() {
    let store = MemoryStore::new();
    let request = Request::post("/api/papers")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = send_raw(&store, request).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn create_without_content_type_is_unsupported_media_type() {
    let store = MemoryStore::new();
    let request = Request::post("/api/papers")
      .body(Body::from(json!({ "title": "A" }).to_string()))
      .unwrap();
    let resp = send_raw(&store, request).await;
    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(json_body(resp).await["error"].is_string());

    let resp = send(&store, "GET", "/api/papers", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }

  // ── Store faults ────────────────────────────────────────────────────────────

  /// Hands out the same id every time.
  struct Repeating;

  impl IdGenerator for Repeating {
    fn next_id(&self) -> PaperId { PaperId::new("same") }
  }

  #[tokio::test]
  async fn store_fault_is_a_generic_500() {
    let store = MemoryStore::with(Arc::new(Repeating), Arc::new(SystemClock));

    let resp = send(&store, "POST", "/api/papers", Some(json!({ "title": "A" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = send(&store, "POST", "/api/papers", Some(json!({ "title": "B" }))).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
      json_body(resp).await,
      json!({ "error": "Failed to create paper" })
    );
  }

  // ── Not found ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_paper_returns_404_for_get_put_delete() {
    let store = MemoryStore::new();

    let resp = send(&store, "GET", "/api/papers/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await, json!({ "error": "Paper not found" }));

    let resp = send(&store, "PUT", "/api/papers/nope", Some(json!({ "title": "B" }))).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = send(&store, "DELETE", "/api/papers/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // The failed PUT must not have created anything.
    let resp = send(&store, "GET", "/api/papers", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_returns_live_papers() {
    let store = MemoryStore::new();
    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
      let resp = send(&store, "POST", "/api/papers", Some(json!({ "title": title }))).await;
      let paper: Paper = serde_json::from_value(json_body(resp).await).unwrap();
      ids.push(paper.id);
    }
    send(&store, "DELETE", &format!("/api/papers/{}", ids[1]), None).await;

    let resp = send(&store, "GET", "/api/papers", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let papers: Vec<Paper> = serde_json::from_value(json_body(resp).await).unwrap();
    let titles: Vec<_> = papers.iter().filter_map(Paper::title).collect();
    assert_eq!(titles, ["one", "three"]);
  }

  // ── End to end ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn draft_to_final_lifecycle() {
    let store = MemoryStore::new();

    let resp = send(&store, "POST", "/api/papers", Some(json!({ "title": "Draft" }))).await;
    let created: Paper = serde_json::from_value(json_body(resp).await).unwrap();
    let uri = format!("/api/papers/{}", created.id);

    let resp = send(&store, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Paper = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(fetched, created);

    // Make sure the millisecond clock ticks between create and update.
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;

    let resp = send(&store, "PUT", &uri, Some(json!({ "title": "Final" }))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Paper = serde_json::from_value(json_body(resp).await).unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert_ne!(updated.updated_at, created.updated_at);
    assert_eq!(updated.title(), Some("Final"));

    let resp = send(&store, "DELETE", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!({ "message": "Paper deleted" }));

    let resp = send(&store, "GET", &uri, None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
