//! UI string lookup for the two supported locales.
//!
//! Dictionaries are nested JSON objects compiled into the binary. Keys are
//! dotted paths (`"writingTypes.academic.title"`); a key that does not lead
//! to a non-empty string translates to itself.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

const EN: &str = include_str!("../locales/en.json");
const ZH: &str = include_str!("../locales/zh.json");

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
  #[default]
  En,
  Zh,
}

impl Locale {
  pub const ALL: [Locale; 2] = [Locale::En, Locale::Zh];

  pub fn code(self) -> &'static str {
    match self {
      Locale::En => "en",
      Locale::Zh => "zh",
    }
  }

  fn source(self) -> &'static str {
    match self {
      Locale::En => EN,
      Locale::Zh => ZH,
    }
  }
}

impl fmt::Display for Locale {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.code()) }
}

impl FromStr for Locale {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Locale::ALL
      .into_iter()
      .find(|l| l.code() == s)
      .ok_or_else(|| Error::UnknownLocale(s.to_owned()))
  }
}

/// Translates dotted keys for one locale.
#[derive(Debug, Clone)]
pub struct Translator {
  locale:     Locale,
  dictionary: Value,
}

impl Translator {
  pub fn new(locale: Locale) -> Result<Self> {
    let dictionary = serde_json::from_str(locale.source()).map_err(Error::Dictionary)?;
    Ok(Self { locale, dictionary })
  }

  pub fn locale(&self) -> Locale { self.locale }

  /// Look up `key`, falling back to the key itself.
  pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
    key
      .split('.')
      .try_fold(&self.dictionary, |node, segment| node.get(segment))
      .and_then(Value::as_str)
      .filter(|s| !s.is_empty())
      .unwrap_or(key)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn looks_up_nested_keys() {
    let en = Translator::new(Locale::En).unwrap();
    assert_eq!(en.t("nav.papers"), "My Papers");
    assert_eq!(en.t("writingTypes.academic.types.caseStudy"), "Case Study");

    let zh = Translator::new(Locale::Zh).unwrap();
    assert_eq!(zh.t("nav.papers"), "我的文章");
  }

  #[test]
  fn missing_key_falls_back_to_itself() {
    let en = Translator::new(Locale::En).unwrap();
    assert_eq!(en.t("nav.nonexistent"), "nav.nonexistent");
    assert_eq!(en.t("nowhere.at.all"), "nowhere.at.all");
    assert_eq!(en.t(""), "");
  }

  #[test]
  fn section_key_falls_back_to_itself() {
    // `nav` is an object, not a string.
    let en = Translator::new(Locale::En).unwrap();
    assert_eq!(en.t("nav"), "nav");
  }

  #[test]
  fn every_locale_has_the_same_keys() {
    fn leaves(prefix: &str, value: &Value, out: &mut Vec<String>) {
      match value {
        Value::Object(map) => {
          for (k, v) in map {
            let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
            leaves(&path, v, out);
          }
        }
        _ => out.push(prefix.to_owned()),
      }
    }

    let mut reference = Vec::new();
    leaves("", &Translator::new(Locale::En).unwrap().dictionary, &mut reference);
    reference.sort();

    for locale in Locale::ALL {
      let mut keys = Vec::new();
      leaves("", &Translator::new(locale).unwrap().dictionary, &mut keys);
      keys.sort();
      assert_eq!(keys, reference, "key set differs for {locale}");
    }
  }

  #[test]
  fn locale_codes_round_trip() {
    assert_eq!("zh".parse::<Locale>().unwrap(), Locale::Zh);
    assert_eq!(Locale::En.to_string(), "en");
    assert!(matches!("fr".parse::<Locale>(), Err(Error::UnknownLocale(_))));
  }
}
