//! The paper record, its identifier, and its timestamp format.
//!
//! A paper is an open JSON object. The server owns three keys (`id`,
//! `created_at`, `updated_at`); everything else belongs to the client and is
//! stored verbatim.

use std::{fmt, str::FromStr};

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

use crate::Error;

/// Client-owned fields of a paper: title, content, metadata, anything else.
pub type PaperFields = serde_json::Map<String, Value>;

/// Keys the server owns. Client-supplied values for these are discarded.
pub const SERVER_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// Identifier the client uses for a paper the server has not seen yet.
pub const NEW_PAPER_ID: &str = "new";

/// Drop any server-owned keys from a client-supplied mapping.
pub fn client_fields(mut fields: PaperFields) -> PaperFields {
  for key in SERVER_FIELDS {
    fields.remove(key);
  }
  fields
}

// ─── Identifier ──────────────────────────────────────────────────────────────

/// Opaque paper identifier, minted by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(String);

impl PaperId {
  pub fn new(id: impl Into<String>) -> Self { Self(id.into()) }

  /// The `"new"` marker for a paper that has not been created yet.
  pub fn new_sentinel() -> Self { Self(NEW_PAPER_ID.to_owned()) }

  pub fn is_new(&self) -> bool { self.0 == NEW_PAPER_ID }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for PaperId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for PaperId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for PaperId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl From<Uuid> for PaperId {
  fn from(id: Uuid) -> Self { Self(id.to_string()) }
}

// ─── Timestamp ───────────────────────────────────────────────────────────────

/// A UTC instant with millisecond precision.
///
/// Always rendered as RFC 3339 with exactly three fractional digits and a `Z`
/// suffix (`2024-05-01T12:00:00.000Z`), so comparing the strings
/// lexicographically gives the same answer as comparing the instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
  /// Wrap `dt`, discarding anything finer than a millisecond.
  pub fn from_datetime(dt: DateTime<Utc>) -> Self { Self(dt.trunc_subsecs(3)) }

  pub fn now() -> Self { Self::from_datetime(Utc::now()) }

  pub fn as_datetime(&self) -> DateTime<Utc> { self.0 }
}

impl From<DateTime<Utc>> for Timestamp {
  fn from(dt: DateTime<Utc>) -> Self { Self::from_datetime(dt) }
}

impl fmt::Display for Timestamp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::Millis, true))
  }
}

impl FromStr for Timestamp {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    DateTime::parse_from_rfc3339(s)
      .map(|dt| Self::from_datetime(dt.with_timezone(&Utc)))
      .map_err(|e| Error::InvalidTimestamp(s.to_owned(), e))
  }
}

impl Serialize for Timestamp {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(self)
  }
}

impl<'de> Deserialize<'de> for Timestamp {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
  }
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A paper as stored and returned by the server.
///
/// Serialises as a single flat JSON object: the client fields sit alongside
/// `id`, `created_at`, and `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
  pub id:         PaperId,
  pub created_at: Timestamp,
  pub updated_at: Timestamp,
  #[serde(flatten)]
  pub fields:     PaperFields,
}

impl Paper {
  /// Look up a client field by key.
  pub fn field(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

  /// The `title` field, if present and a string.
  pub fn title(&self) -> Option<&str> { self.field("title").and_then(Value::as_str) }
}

/// A paper as the client edits it: either an existing record (real id) or a
/// fresh one carrying the `"new"` sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperDraft {
  pub id:     PaperId,
  #[serde(flatten)]
  pub fields: PaperFields,
}

impl PaperDraft {
  /// A draft that has never been saved.
  pub fn new(fields: PaperFields) -> Self {
    Self {
      id: PaperId::new_sentinel(),
      fields: client_fields(fields),
    }
  }

  /// A draft that edits the existing paper `id`.
  pub fn existing(id: PaperId, fields: PaperFields) -> Self {
    Self {
      id,
      fields: client_fields(fields),
    }
  }

  pub fn is_new(&self) -> bool { self.id.is_new() }
}

impl From<Paper> for PaperDraft {
  fn from(paper: Paper) -> Self { Self::existing(paper.id, paper.fields) }
}
