//! Client side of ScholarAssist.
//!
//! - [`client::ApiClient`]: typed HTTP access to the paper API.
//! - [`store::PaperStore`]: the UI's view of the paper collection, with busy
//!   and error flags published on a watch channel.
//! - [`i18n`], [`settings`], [`references`]: local, file-backed state that
//!   never touches the server.

pub mod client;
pub mod error;
pub mod i18n;
pub mod persist;
pub mod references;
pub mod settings;
pub mod store;

pub use client::{ApiClient, ApiConfig};
pub use error::{ClientError, Error, Result};
pub use store::{PaperState, PaperStore};
