//! `scholar`: command-line front end for ScholarAssist.
//!
//! # Usage
//!
//! ```
//! scholar papers list
//! scholar papers save --title "Draft" --field 'tags=["ml"]'
//! scholar papers save --id <ID> --title "Final"
//! scholar --url http://localhost:8000 papers delete <ID>
//! scholar lang zh
//! scholar t nav.papers
//! ```

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use scholar_client::{
  ApiClient, ApiConfig, PaperState, PaperStore,
  i18n::{Locale, Translator},
  references::ReferenceLibrary,
  settings::SettingsStore,
};
use scholar_core::paper::{Paper, PaperDraft, PaperFields, PaperId};
use serde::Deserialize;
use serde_json::Value;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "scholar", about = "Command-line front end for ScholarAssist")]
struct Args {
  /// Path to a TOML config file (api_base_url, timeout_secs, data_dir).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the API server (default: http://localhost:8000).
  #[arg(long, env = "SCHOLAR_API_URL")]
  url: Option<String>,

  /// Per-request timeout in seconds (default: 30).
  #[arg(long)]
  timeout: Option<u64>,

  /// Directory for settings and the reference library (default: .scholar).
  #[arg(long, env = "SCHOLAR_DATA_DIR")]
  data_dir: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Check that the server is up.
  Health,
  /// Work with papers on the server.
  #[command(subcommand)]
  Papers(PaperCmd),
  /// Work with the local reference library.
  #[command(subcommand)]
  Refs(RefCmd),
  /// Set the UI language (`en` or `zh`).
  Lang { code: String },
  /// Toggle dark mode.
  Theme,
  /// Translate a dotted key in the current language.
  T { key: String },
}

#[derive(Subcommand, Debug)]
enum PaperCmd {
  List,
  Show {
    id: String,
  },
  /// Create (no `--id`) or replace (with `--id`) a paper.
  Save {
    #[arg(long, default_value = "new")]
    id:      String,
    #[arg(long)]
    title:   Option<String>,
    #[arg(long)]
    content: Option<String>,
    /// Extra field as `key=value`; the value is parsed as JSON, or taken
    /// as a plain string if it is not valid JSON.
    #[arg(long = "field", value_name = "KEY=VALUE")]
    fields:  Vec<String>,
  },
  Delete {
    id: String,
  },
}

#[derive(Subcommand, Debug)]
enum RefCmd {
  List,
  Delete { id: String },
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  api_base_url: Option<String>,
  #[serde(default)]
  timeout_secs: Option<u64>,
  #[serde(default)]
  data_dir:     Option<PathBuf>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let defaults = ApiConfig::default();
  let api_config = ApiConfig {
    base_url: args.url.or(file_cfg.api_base_url).unwrap_or(defaults.base_url),
    timeout:  args
      .timeout
      .or(file_cfg.timeout_secs)
      .map(Duration::from_secs)
      .unwrap_or(defaults.timeout),
  };
  let data_dir = args
    .data_dir
    .or(file_cfg.data_dir)
    .unwrap_or_else(|| PathBuf::from(".scholar"));

  match args.command {
    Command::Health => {
      let client = ApiClient::new(api_config)?;
      println!("{}", client.health().await?);
    }
    Command::Papers(cmd) => {
      let translator = SettingsStore::open(&data_dir)?.translator()?;
      let store = PaperStore::new(ApiClient::new(api_config)?);
      run_papers(&store, &translator, cmd).await?;
    }
    Command::Refs(cmd) => run_refs(&data_dir, cmd)?,
    Command::Lang { code } => {
      let locale: Locale = code.parse()?;
      SettingsStore::open(&data_dir)?.set_language(locale)?;
      println!("{locale}");
    }
    Command::Theme => {
      let theme = SettingsStore::open(&data_dir)?.toggle_dark_mode()?;
      println!("{}", theme.class_name());
    }
    Command::T { key } => {
      let translator = SettingsStore::open(&data_dir)?.translator()?;
      println!("{}", translator.t(&key));
    }
  }

  Ok(())
}

// ─── Papers ───────────────────────────────────────────────────────────────────

async fn run_papers(store: &PaperStore, tr: &Translator, cmd: PaperCmd) -> Result<()> {
  match cmd {
    PaperCmd::List => {
      store.load_all().await;
      let state = store.snapshot();
      check(&state)?;
      println!("{}", tr.t("nav.papers"));
      for paper in &state.papers {
        print_summary(paper);
      }
    }
    PaperCmd::Show { id } => {
      let paper = store.load_one(&PaperId::new(id)).await;
      check(&store.snapshot())?;
      if let Some(paper) = paper {
        println!("{}", serde_json::to_string_pretty(&paper)?);
      }
    }
    PaperCmd::Save {
      id,
      title,
      content,
      fields,
    } => {
      let mut map = PaperFields::new();
      if let Some(title) = title {
        map.insert("title".into(), Value::String(title));
      }
      if let Some(content) = content {
        map.insert("content".into(), Value::String(content));
      }
      for pair in &fields {
        let (key, value) = parse_field(pair)?;
        map.insert(key, value);
      }

      let id = PaperId::new(id);
      let draft = if id.is_new() {
        PaperDraft::new(map)
      } else {
        PaperDraft::existing(id, map)
      };
      let saved = store.save(&draft).await;
      check(&store.snapshot())?;
      if let Some(paper) = saved {
        print_summary(&paper);
      }
    }
    PaperCmd::Delete { id } => {
      let id = PaperId::new(id);
      if store.delete(&id).await {
        println!("deleted {id}");
      }
      check(&store.snapshot())?;
    }
  }
  Ok(())
}

/// Fail the command if the store recorded an error.
fn check(state: &PaperState) -> Result<()> {
  match &state.error {
    Some(message) => bail!("{message}"),
    None => Ok(()),
  }
}

fn print_summary(paper: &Paper) {
  println!(
    "{}  {}  {}",
    paper.id,
    paper.updated_at,
    paper.title().unwrap_or("(untitled)")
  );
}

fn parse_field(pair: &str) -> Result<(String, Value)> {
  let (key, raw) = pair
    .split_once('=')
    .ok_or_else(|| anyhow!("expected KEY=VALUE, got {pair:?}"))?;
  let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()));
  Ok((key.to_owned(), value))
}

// ─── References ───────────────────────────────────────────────────────────────

fn run_refs(data_dir: &Path, cmd: RefCmd) -> Result<()> {
  let mut library = ReferenceLibrary::open(data_dir)?;
  match cmd {
    RefCmd::List => {
      for r in library.list() {
        println!("{}  {}  {} ({})", r.id, r.authors, r.title, r.year);
      }
    }
    RefCmd::Delete { id } => {
      if !library.delete(&id)? {
        bail!("no reference with id {id}");
      }
      println!("deleted {id}");
    }
  }
  Ok(())
}
