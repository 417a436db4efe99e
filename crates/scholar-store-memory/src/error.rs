//! Error type for `scholar-store-memory`.

use scholar_core::paper::PaperId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The id generator produced an id that is live or was issued before.
  #[error("id {0} has already been issued")]
  IdCollision(PaperId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
