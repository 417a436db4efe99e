//! In-memory backend for the ScholarAssist paper service.
//!
//! Papers live for the lifetime of the [`MemoryStore`] value; nothing is
//! written to disk. The collection sits behind an async read/write lock so a
//! store can be shared across request handlers on a multi-threaded runtime.

mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::MemoryStore;
