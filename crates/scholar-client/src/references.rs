//! The local reference library.
//!
//! References are kept on disk next to the settings file; the server knows
//! nothing about them. A fresh library starts with a few sample entries.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{error::Result, persist::Persisted};

pub const REFERENCES_FILE: &str = "references.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
  Article,
  Book,
  Website,
  #[serde(other)]
  Other,
}

/// One bibliographic entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
  pub id:      String,
  #[serde(rename = "type")]
  pub kind:    ReferenceKind,
  pub title:   String,
  pub authors: String,
  pub year:    String,
  pub source:  String,
  #[serde(default)]
  pub url:     String,
  #[serde(default)]
  pub doi:     String,
  #[serde(default)]
  pub tags:    Vec<String>,
  #[serde(default)]
  pub notes:   String,
}

fn sample_references() -> Vec<Reference> {
  fn tags(t: &[&str]) -> Vec<String> { t.iter().map(|s| s.to_string()).collect() }

  vec![
    Reference {
      id:      "ref-1".into(),
      kind:    ReferenceKind::Article,
      title:   "Artificial Intelligence and Academic Writing: A Review of Current Applications".into(),
      authors: "Smith, J., Johnson, M., Williams, A.".into(),
      year:    "2022".into(),
      source:  "Journal of Digital Humanities".into(),
      url:     "https://example.com/ai-academic-writing".into(),
      doi:     "10.1234/jdh.2022.1234".into(),
      tags:    tags(&["AI", "academic writing", "digital humanities"]),
      notes:   "Comprehensive review of AI applications in academic writing, with focus on reference management.".into(),
    },
    Reference {
      id:      "ref-2".into(),
      kind:    ReferenceKind::Book,
      title:   "The Future of Academic Publishing".into(),
      authors: "Brown, R.".into(),
      year:    "2021".into(),
      source:  "Academic Press".into(),
      url:     String::new(),
      doi:     String::new(),
      tags:    tags(&["publishing", "digital transformation"]),
      notes:   "Chapter 5 discusses integration of AI tools in the academic workflow.".into(),
    },
    Reference {
      id:      "ref-3".into(),
      kind:    ReferenceKind::Website,
      title:   "Reference Management Best Practices".into(),
      authors: "Wilson, T.".into(),
      year:    "2023".into(),
      source:  "Academic Resources Online".into(),
      url:     "https://academicresources.com/reference-management".into(),
      doi:     String::new(),
      tags:    tags(&["reference management", "best practices"]),
      notes:   "Useful guide for reference management across different citation styles.".into(),
    },
  ]
}

/// References persisted in `<data_dir>/references.json`.
#[derive(Debug)]
pub struct ReferenceLibrary {
  cell: Persisted<Vec<Reference>>,
}

impl ReferenceLibrary {
  pub fn open(data_dir: &Path) -> Result<Self> {
    let cell = Persisted::load_or_else(data_dir.join(REFERENCES_FILE), sample_references)?;
    Ok(Self { cell })
  }

  pub fn list(&self) -> &[Reference] { self.cell.get() }

  pub fn get(&self, id: &str) -> Option<&Reference> { self.list().iter().find(|r| r.id == id) }

  /// Append `reference` to the library.
  pub fn add(&mut self, reference: Reference) -> Result<Reference> {
    info!(id = %reference.id, "adding reference");
    self.cell.update(|refs| refs.push(reference.clone()))?;
    Ok(reference)
  }

  /// Replace the entry with the same id. `None` if there is no such entry.
  pub fn update(&mut self, reference: Reference) -> Result<Option<Reference>> {
    let Some(index) = self.list().iter().position(|r| r.id == reference.id) else {
      return Ok(None);
    };
    self.cell.update(|refs| refs[index] = reference.clone())?;
    Ok(Some(reference))
  }

  /// Remove the entry with `id`. `false` if there is no such entry.
  pub fn delete(&mut self, id: &str) -> Result<bool> {
    let Some(index) = self.list().iter().position(|r| r.id == id) else {
      return Ok(false);
    };
    self.cell.update(|refs| refs.remove(index))?;
    info!(%id, "deleted reference");
    Ok(true)
  }
}
