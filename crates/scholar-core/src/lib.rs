//! Core types and trait definitions for the ScholarAssist paper service.
//!
//! This crate is deliberately free of HTTP and storage dependencies. The
//! server, the storage backend, and the client all speak in terms of the
//! types defined here.

pub mod clock;
pub mod error;
pub mod ident;
pub mod paper;
pub mod service;

pub use error::{Error, Result};
