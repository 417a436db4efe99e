//! Identifier minting for new papers.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::paper::PaperId;

/// Mints identifiers for newly created papers.
///
/// Implementations must not hand out the same identifier twice within the
/// lifetime of a store.
pub trait IdGenerator: Send + Sync {
  fn next_id(&self) -> PaperId;
}

/// Random v4 UUIDs. The default for a running server.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
  fn next_id(&self) -> PaperId { PaperId::from(Uuid::new_v4()) }
}

/// `paper-1`, `paper-2`, … in order.
#[derive(Debug, Default)]
pub struct SequentialIds {
  next: AtomicU64,
}

impl SequentialIds {
  pub fn new() -> Self { Self::default() }
}

impl IdGenerator for SequentialIds {
  fn next_id(&self) -> PaperId {
    let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
    PaperId::new(format!("paper-{n}"))
  }
}
