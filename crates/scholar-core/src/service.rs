//! The `PaperService` trait.
//!
//! The trait is implemented by storage backends (e.g. `scholar-store-memory`).
//! The HTTP layer (`scholar-api`) depends on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::paper::{Paper, PaperFields, PaperId};

/// Authoritative keeper of the paper collection.
///
/// A missing paper is never an error: `get`, `update`, and `delete` return
/// `Ok(None)` for an unknown id. `Err` is reserved for faults inside the
/// backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PaperService: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Store a new paper built from `fields`. The backend mints the id and
  /// sets `created_at` and `updated_at` to the same instant. Server-owned
  /// keys in `fields` are ignored.
  fn create(
    &self,
    fields: PaperFields,
  ) -> impl Future<Output = Result<Paper, Self::Error>> + Send + '_;

  /// Retrieve a paper by id.
  fn get<'a>(
    &'a self,
    id: &'a PaperId,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + 'a;

  /// Replace every client field of paper `id` with `fields`, keeping `id`
  /// and `created_at` and refreshing `updated_at`. Returns `None` (and
  /// changes nothing) if the paper does not exist.
  fn update<'a>(
    &'a self,
    id: &'a PaperId,
    fields: PaperFields,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + 'a;

  /// Remove paper `id`, returning the record that was removed.
  fn delete<'a>(
    &'a self,
    id: &'a PaperId,
  ) -> impl Future<Output = Result<Option<Paper>, Self::Error>> + Send + 'a;

  /// All current papers, ascending by `created_at`; papers created at the
  /// same instant keep their creation order.
  fn list(&self) -> impl Future<Output = Result<Vec<Paper>, Self::Error>> + Send + '_;
}
