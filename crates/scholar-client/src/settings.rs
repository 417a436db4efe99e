//! Theme and language preferences, persisted between runs.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
  error::Result,
  i18n::{Locale, Translator},
  persist::Persisted,
};

pub const SETTINGS_FILE: &str = "settings.json";

/// User preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub dark_mode: bool,
  pub language:  Locale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
  Light,
  Dark,
}

impl Theme {
  /// Class name applied to the document root.
  pub fn class_name(self) -> &'static str {
    match self {
      Theme::Light => "light",
      Theme::Dark => "dark",
    }
  }
}

/// Preferences loaded from `<data_dir>/settings.json`.
#[derive(Debug)]
pub struct SettingsStore {
  cell: Persisted<Settings>,
}

impl SettingsStore {
  pub fn open(data_dir: &Path) -> Result<Self> {
    let cell = Persisted::load_or_else(data_dir.join(SETTINGS_FILE), Settings::default)?;
    Ok(Self { cell })
  }

  pub fn settings(&self) -> &Settings { self.cell.get() }

  pub fn theme(&self) -> Theme {
    if self.settings().dark_mode {
      Theme::Dark
    } else {
      Theme::Light
    }
  }

  /// Flip dark mode and return the new theme.
  pub fn toggle_dark_mode(&mut self) -> Result<Theme> {
    self.cell.update(|s| s.dark_mode = !s.dark_mode)?;
    let theme = self.theme();
    info!(theme = theme.class_name(), "theme changed");
    Ok(theme)
  }

  pub fn set_language(&mut self, locale: Locale) -> Result<()> {
    self.cell.update(|s| s.language = locale)?;
    info!(%locale, "language changed");
    Ok(())
  }

  /// A translator for the current language.
  pub fn translator(&self) -> Result<Translator> { Translator::new(self.settings().language) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_to_light_english() {
    let dir = tempfile::tempdir().unwrap();
    let store = SettingsStore::open(dir.path()).unwrap();
    assert_eq!(store.settings(), &Settings::default());
    assert_eq!(store.theme(), Theme::Light);
    assert_eq!(store.translator().unwrap().locale(), Locale::En);
  }

  #[test]
  fn changes_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
      let mut store = SettingsStore::open(dir.path()).unwrap();
      assert_eq!(store.toggle_dark_mode().unwrap(), Theme::Dark);
      store.set_language(Locale::Zh).unwrap();
    }

    let store = SettingsStore::open(dir.path()).unwrap();
    assert_eq!(store.theme(), Theme::Dark);
    assert_eq!(store.theme().class_name(), "dark");
    assert_eq!(store.translator().unwrap().t("nav.home"), "首页");
  }

  #[test]
  fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(SETTINGS_FILE), r#"{"language":"zh"}"#).unwrap();
    let store = SettingsStore::open(dir.path()).unwrap();
    assert!(!store.settings().dark_mode);
    assert_eq!(store.settings().language, Locale::Zh);
  }
}
