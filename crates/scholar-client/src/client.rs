//! Async HTTP client wrapping the ScholarAssist JSON API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, Url};
use scholar_core::paper::{Paper, PaperFields, PaperId};
use serde::Deserialize;

use crate::error::ClientError;

type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Connection settings for the API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  /// Upper bound on every request, connect through body.
  pub timeout:  Duration,
}

impl Default for ApiConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:8000".to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Deserialize)]
struct MessageBody {
  message: String,
}

/// Async HTTP client for the paper REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct ApiClient {
  client: Client,
  base:   Url,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let base = Url::parse(&config.base_url)
      .ok()
      .filter(|u| !u.cannot_be_a_base())
      .ok_or_else(|| ClientError::InvalidBaseUrl(config.base_url.clone()))?;
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(ClientError::Transport)?;
    Ok(Self { client, base })
  }

  /// Base URL with `segments` appended, each percent-encoded.
  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  /// Turn a non-success status into a [`ClientError`].
  async fn check(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    if status == StatusCode::NOT_FOUND {
      return Err(ClientError::NotFound);
    }
    let message = match resp.json::<ErrorBody>().await {
      Ok(body) => body.error,
      Err(_) => status.canonical_reason().unwrap_or("unknown error").to_owned(),
    };
    Err(ClientError::Server { status, message })
  }

  // ── Liveness ──────────────────────────────────────────────────────────────

  /// `GET /`
  pub async fn health(&self) -> Result<String> {
    let resp = self.client.get(self.url(&[])).send().await?;
    let body: MessageBody = Self::check(resp).await?.json().await?;
    Ok(body.message)
  }

  // ── Papers ────────────────────────────────────────────────────────────────

  /// `GET /api/papers`
  pub async fn list_papers(&self) -> Result<Vec<Paper>> {
    let resp = self.client.get(self.url(&["api", "papers"])).send().await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  /// `GET /api/papers/:id`
  pub async fn get_paper(&self, id: &PaperId) -> Result<Paper> {
    let resp = self
      .client
      .get(self.url(&["api", "papers", id.as_str()]))
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  /// `POST /api/papers`
  pub async fn create_paper(&self, fields: &PaperFields) -> Result<Paper> {
    let resp = self
      .client
      .post(self.url(&["api", "papers"]))
      .json(fields)
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  /// `PUT /api/papers/:id`
  pub async fn update_paper(&self, id: &PaperId, fields: &PaperFields) -> Result<Paper> {
    let resp = self
      .client
      .put(self.url(&["api", "papers", id.as_str()]))
      .json(fields)
      .send()
      .await?;
    Ok(Self::check(resp).await?.json().await?)
  }

  /// `DELETE /api/papers/:id`. Any 2xx counts as confirmation; the body is
  /// not read.
  pub async fn delete_paper(&self, id: &PaperId) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&["api", "papers", id.as_str()]))
      .send()
      .await?;
    Self::check(resp).await?;
    Ok(())
  }
}
