//! JSON-file-backed values: loaded once at startup, flushed on every change.

use std::{
  fs, io,
  path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{Error, Result};

/// A value mirrored to a JSON file.
#[derive(Debug)]
pub struct Persisted<T> {
  path:  PathBuf,
  value: T,
}

impl<T> Persisted<T>
where
  T: Clone + Serialize + DeserializeOwned,
{
  /// Read `path`, or start from `default()` if the file does not exist yet.
  /// Nothing is written until the first change.
  pub fn load_or_else(path: impl Into<PathBuf>, default: impl FnOnce() -> T) -> Result<Self> {
    let path = path.into();
    let value = match fs::read_to_string(&path) {
      Ok(raw) => serde_json::from_str(&raw).map_err(|source| Error::Json {
        path: path.clone(),
        source,
      })?,
      Err(e) if e.kind() == io::ErrorKind::NotFound => default(),
      Err(source) => return Err(Error::Io { path, source }),
    };
    Ok(Self { path, value })
  }

  pub fn get(&self) -> &T { &self.value }

  pub fn path(&self) -> &Path { &self.path }

  /// Mutate a copy of the value and write it out. The in-memory value only
  /// changes once the write has succeeded.
  pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
    let mut next = self.value.clone();
    let out = f(&mut next);
    self.flush(&next)?;
    self.value = next;
    Ok(out)
  }

  /// Write to a sibling temp file, then rename over the target.
  fn flush(&self, value: &T) -> Result<()> {
    let io_err = |source| Error::Io {
      path: self.path.clone(),
      source,
    };
    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      fs::create_dir_all(parent).map_err(io_err)?;
    }
    let raw = serde_json::to_vec_pretty(value).map_err(|source| Error::Json {
      path: self.path.clone(),
      source,
    })?;
    let tmp = self.path.with_extension("json.tmp");
    fs::write(&tmp, raw).map_err(io_err)?;
    fs::rename(&tmp, &self.path).map_err(io_err)?;
    debug!(path = %self.path.display(), "flushed");
    Ok(())
  }
}
