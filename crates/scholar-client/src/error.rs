//! Error types for `scholar-client`.

use std::{io, path::PathBuf};

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ClientError {
  /// The server answered 404.
  #[error("paper not found")]
  NotFound,

  /// The server answered with another non-success status.
  #[error("server returned {status}: {message}")]
  Server { status: StatusCode, message: String },

  #[error("request timed out: {0}")]
  Timeout(#[source] reqwest::Error),

  /// The server could not be reached, or its answer could not be read.
  #[error("transport error: {0}")]
  Transport(#[source] reqwest::Error),

  #[error("invalid base URL {0:?}")]
  InvalidBaseUrl(String),
}

impl From<reqwest::Error> for ClientError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_timeout() {
      ClientError::Timeout(e)
    } else {
      ClientError::Transport(e)
    }
  }
}

/// Failure of local state: settings, the reference library, translations.
#[derive(Debug, Error)]
pub enum Error {
  #[error("i/o error on {path}: {source}")]
  Io {
    path:   PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("malformed JSON in {path}: {source}")]
  Json {
    path:   PathBuf,
    #[source]
    source: serde_json::Error,
  },

  #[error("malformed built-in dictionary: {0}")]
  Dictionary(#[source] serde_json::Error),

  #[error("unknown locale {0:?}")]
  UnknownLocale(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
