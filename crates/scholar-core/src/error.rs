//! Error types for `scholar-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid timestamp {0:?}: {1}")]
  InvalidTimestamp(String, #[source] chrono::ParseError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
