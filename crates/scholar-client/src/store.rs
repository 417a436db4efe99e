//! [`PaperStore`]: the client-side view of the paper collection.
//!
//! The store owns the list of papers the UI shows, plus a busy flag and the
//! last error message. Its state is published on a [`watch`] channel: a UI
//! subscribes once and re-renders whenever a new snapshot arrives.
//!
//! Store operations never return `Err` and never panic. A failed call leaves
//! the paper list as it was, records a human-readable message in
//! [`PaperState::error`], and returns `None` / `false`.

use std::sync::Arc;

use scholar_core::paper::{Paper, PaperDraft, PaperId};
use tokio::sync::watch;
use tracing::{debug, error};

use crate::{client::ApiClient, error::ClientError};

const FETCH_ALL_FAILED: &str = "Failed to fetch papers";
const FETCH_ONE_FAILED: &str = "Failed to fetch paper";
const SAVE_FAILED: &str = "Failed to save paper";
const DELETE_FAILED: &str = "Failed to delete paper";
const NOT_FOUND: &str = "Paper not found";

/// A snapshot of the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaperState {
  pub papers:     Vec<Paper>,
  /// `true` while at least one operation is in flight.
  pub is_loading: bool,
  /// Message from the most recent failed operation, cleared when the next
  /// operation starts.
  pub error:      Option<String>,
  in_flight:      usize,
}

/// Held for the duration of one operation. Dropping it, including when the
/// operation's future is cancelled, releases the busy flag.
struct Busy<'a> {
  state: &'a watch::Sender<PaperState>,
}

impl Drop for Busy<'_> {
  fn drop(&mut self) {
    self.state.send_modify(|s| {
      s.in_flight = s.in_flight.saturating_sub(1);
      s.is_loading = s.in_flight > 0;
    });
  }
}

/// Client-side paper store.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct PaperStore {
  client: ApiClient,
  state:  Arc<watch::Sender<PaperState>>,
}

impl PaperStore {
  pub fn new(client: ApiClient) -> Self {
    let (state, _) = watch::channel(PaperState::default());
    Self {
      client,
      state: Arc::new(state),
    }
  }

  /// Receive every future state change.
  pub fn subscribe(&self) -> watch::Receiver<PaperState> { self.state.subscribe() }

  /// The current state.
  pub fn snapshot(&self) -> PaperState { self.state.borrow().clone() }

  pub fn papers(&self) -> Vec<Paper> { self.state.borrow().papers.clone() }

  pub fn is_loading(&self) -> bool { self.state.borrow().is_loading }

  pub fn error(&self) -> Option<String> { self.state.borrow().error.clone() }

  fn begin(&self) -> Busy<'_> {
    self.state.send_modify(|s| {
      s.in_flight += 1;
      s.is_loading = true;
      s.error = None;
    });
    Busy { state: &self.state }
  }

  fn fail(&self, message: &str, cause: &ClientError) {
    error!(error = %cause, "{message}");
    self.state.send_modify(|s| s.error = Some(message.to_owned()));
  }

  // ── Operations ────────────────────────────────────────────────────────────

  /// Replace the local list with the server's.
  pub async fn load_all(&self) {
    let _busy = self.begin();
    match self.client.list_papers().await {
      Ok(papers) => {
        debug!(count = papers.len(), "loaded papers");
        self.state.send_modify(|s| s.papers = papers);
      }
      Err(e) => self.fail(FETCH_ALL_FAILED, &e),
    }
  }

  /// Fetch one paper without touching the local list.
  pub async fn load_one(&self, id: &PaperId) -> Option<Paper> {
    let _busy = self.begin();
    match self.client.get_paper(id).await {
      Ok(paper) => Some(paper),
      Err(e @ ClientError::NotFound) => {
        self.fail(NOT_FOUND, &e);
        None
      }
      Err(e) => {
        self.fail(FETCH_ONE_FAILED, &e);
        None
      }
    }
  }

  /// Create the draft if it carries the `"new"` sentinel, otherwise update
  /// it. The server's copy is merged into the local list by id.
  pub async fn save(&self, draft: &PaperDraft) -> Option<Paper> {
    let _busy = self.begin();
    let result = if draft.is_new() {
      self.client.create_paper(&draft.fields).await
    } else {
      self.client.update_paper(&draft.id, &draft.fields).await
    };

    match result {
      Ok(saved) => {
        self.state.send_modify(|s| reconcile(&mut s.papers, saved.clone()));
        Some(saved)
      }
      Err(e) => {
        self.fail(SAVE_FAILED, &e);
        None
      }
    }
  }

  /// Delete on the server, then drop the local entry. The local list only
  /// changes once the server confirms the deletion.
  pub async fn delete(&self, id: &PaperId) -> bool {
    let _busy = self.begin();
    match self.client.delete_paper(id).await {
      Ok(()) => {
        self.state.send_modify(|s| s.papers.retain(|p| &p.id != id));
        true
      }
      Err(e @ ClientError::NotFound) => {
        self.fail(NOT_FOUND, &e);
        false
      }
      Err(e) => {
        self.fail(DELETE_FAILED, &e);
        false
      }
    }
  }
}

/// Replace the entry with `paper`'s id in place, or append it.
fn reconcile(papers: &mut Vec<Paper>, paper: Paper) {
  match papers.iter_mut().find(|p| p.id == paper.id) {
    Some(slot) => *slot = paper,
    None => papers.push(paper),
  }
}

#[cfg(test)]
mod tests {
  use scholar_core::paper::{PaperFields, Timestamp};

  use super::*;

  fn paper(id: &str, title: &str) -> Paper {
    let ts: Timestamp = "2024-05-01T12:00:00.000Z".parse().unwrap();
    let mut fields = PaperFields::new();
    fields.insert("title".into(), title.into());
    Paper {
      id: PaperId::new(id),
      created_at: ts,
      updated_at: ts,
      fields,
    }
  }

  #[test]
  fn reconcile_replaces_in_place() {
    let mut papers = vec![paper("a", "A"), paper("b", "B"), paper("c", "C")];
    reconcile(&mut papers, paper("b", "B2"));
    let titles: Vec<_> = papers.iter().filter_map(Paper::title).collect();
    assert_eq!(titles, ["A", "B2", "C"]);
  }

  #[test]
  fn reconcile_appends_unknown() {
    let mut papers = vec![paper("a", "A")];
    reconcile(&mut papers, paper("z", "Z"));
    assert_eq!(papers.len(), 2);
    assert_eq!(papers[1].id.as_str(), "z");
  }
}
