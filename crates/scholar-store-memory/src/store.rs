//! [`MemoryStore`]: the in-memory implementation of [`PaperService`].

use std::{
  collections::{HashMap, HashSet},
  sync::Arc,
};

use scholar_core::{
  clock::{Clock, SystemClock},
  ident::{IdGenerator, UuidGenerator},
  paper::{Paper, PaperFields, PaperId, Timestamp, client_fields},
  service::PaperService,
};
use tokio::sync::RwLock;
use tracing::debug;

use crate::{Error, Result};

// ─── Collection ──────────────────────────────────────────────────────────────

struct Entry {
  /// Creation order, used to break `created_at` ties when listing.
  seq:   u64,
  paper: Paper,
}

#[derive(Default)]
struct Collection {
  papers:     HashMap<PaperId, Entry>,
  /// Every id ever minted, live or deleted. Ids are never reused.
  issued:     HashSet<PaperId>,
  next_seq:   u64,
  last_stamp: Option<Timestamp>,
}

impl Collection {
  /// Clamp `now` so issued timestamps never go backwards.
  fn stamp(&mut self, now: Timestamp) -> Timestamp {
    let stamp = match self.last_stamp {
      Some(last) if last > now => last,
      _ => now,
    };
    self.last_stamp = Some(stamp);
    stamp
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A paper collection held in process memory.
///
/// Cloning is cheap and every clone shares the same collection.
#[derive(Clone)]
pub struct MemoryStore {
  inner: Arc<RwLock<Collection>>,
  ids:   Arc<dyn IdGenerator>,
  clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
  fn default() -> Self { Self::new() }
}

impl MemoryStore {
  /// An empty store using random UUIDs and the system clock.
  pub fn new() -> Self { Self::with(Arc::new(UuidGenerator), Arc::new(SystemClock)) }

  /// An empty store with caller-supplied id and time sources.
  pub fn with(ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
    Self {
      inner: Arc::new(RwLock::new(Collection::default())),
      ids,
      clock,
    }
  }

  async fn create_paper(&self, fields: PaperFields) -> Result<Paper> {
    let mut coll = self.inner.write().await;

    let id = self.ids.next_id();
    if !coll.issued.insert(id.clone()) {
      return Err(Error::IdCollision(id));
    }

    let now = coll.stamp(self.clock.now());
    let paper = Paper {
      id:         id.clone(),
      created_at: now,
      updated_at: now,
      fields:     client_fields(fields),
    };

    let seq = coll.next_seq;
    coll.next_seq += 1;
    coll.papers.insert(id, Entry {
      seq,
      paper: paper.clone(),
    });

    debug!(id = %paper.id, "paper created");
    Ok(paper)
  }

  async fn update_paper(&self, id: &PaperId, fields: PaperFields) -> Option<Paper> {
    let mut coll = self.inner.write().await;
    if !coll.papers.contains_key(id) {
      return None;
    }

    let now = coll.stamp(self.clock.now());
    let entry = coll.papers.get_mut(id)?;
    entry.paper.fields = client_fields(fields);
    entry.paper.updated_at = now;

    debug!(%id, "paper updated");
    Some(entry.paper.clone())
  }

  async fn delete_paper(&self, id: &PaperId) -> Option<Paper> {
    let removed = self.inner.write().await.papers.remove(id)?;
    debug!(%id, "paper deleted");
    Some(removed.paper)
  }

  async fn list_papers(&self) -> Vec<Paper> {
    let coll = self.inner.read().await;
    let mut entries: Vec<&Entry> = coll.papers.values().collect();
    entries.sort_by_key(|e| (e.paper.created_at, e.seq));
    entries.into_iter().map(|e| e.paper.clone()).collect()
  }
}

impl PaperService for MemoryStore {
  type Error = Error;

  async fn create(&self, fields: PaperFields) -> Result<Paper> { self.create_paper(fields).await }

  async fn get(&self, id: &PaperId) -> Result<Option<Paper>> {
    let coll = self.inner.read().await;
    Ok(coll.papers.get(id).map(|e| e.paper.clone()))
  }

  async fn update(&self, id: &PaperId, fields: PaperFields) -> Result<Option<Paper>> {
    Ok(self.update_paper(id, fields).await)
  }

  async fn delete(&self, id: &PaperId) -> Result<Option<Paper>> { Ok(self.delete_paper(id).await) }

  async fn list(&self) -> Result<Vec<Paper>> { Ok(self.list_papers().await) }
}
