//! `qrcard`: command-line companion to the qrcard server.
//!
//! # Usage
//!
//! ```text
//! qrcard preview contacts.csv
//! qrcard cards contacts.csv --out cards/
//! qrcard --url https://cards.example.com --user admin upload contacts.csv -t B
//! qrcard --config ~/.config/qrcard/config.toml upload contacts.csv
//! ```

mod client;
mod commands;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use qrcard_core::TemplateKind;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "qrcard", about = "Turn contact spreadsheets into QR business cards")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE", global = true)]
  config: Option<PathBuf>,

  /// Base URL of the qrcard server (default: http://localhost:8080).
  #[arg(long, env = "QRCARD_URL", global = true)]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "QRCARD_USER", global = true)]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "QRCARD_PASSWORD", global = true, hide_env_values = true)]
  password: Option<String>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Show which rows of a CSV file would become contacts.
  Preview {
    file: PathBuf,

    /// Print the accepted contacts as JSON instead.
    #[arg(long)]
    json: bool,
  },

  /// Write one .vcf file per contact, without talking to a server.
  Cards {
    file: PathBuf,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out: PathBuf,
  },

  /// Import a CSV file into a running server and print the card links.
  Upload {
    file: PathBuf,

    /// Profile template: A, B or C.
    #[arg(short, long, default_value = "A", value_parser = parse_template)]
    template: TemplateKind,
  },
}

fn parse_template(s: &str) -> Result<TemplateKind, String> {
  TemplateKind::parse(s).map_err(|e| e.to_string())
}

// ─── Config file ──────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

impl ConfigFile {
  fn load(path: Option<&Path>) -> Result<Self> {
    let Some(path) = path else {
      return Ok(Self::default());
    };
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")
  }
}

/// CLI flags override the config file, which overrides defaults.
fn api_config(args: &Args, file_cfg: ConfigFile) -> ApiConfig {
  let pick = |flag: &Option<String>, file: String| {
    flag.clone().or_else(|| (!file.is_empty()).then_some(file))
  };
  ApiConfig {
    base_url: pick(&args.url, file_cfg.url)
      .unwrap_or_else(|| "http://localhost:8080".to_string()),
    username: pick(&args.user, file_cfg.username).unwrap_or_default(),
    password: pick(&args.password, file_cfg.password).unwrap_or_default(),
  }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let args = Args::parse();

  match &args.command {
    Command::Preview { file, json } => {
      let csv = read_csv(file)?;
      let report = qrcard_csv::CsvContactPipeline::default().run_with_report(&csv);
      if *json {
        let records: Vec<_> = report.contacts.iter().map(|c| &c.record).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
      } else {
        print!("{}", commands::render_preview(&report));
      }
    }

    Command::Cards { file, out } => {
      let csv = read_csv(file)?;
      let contacts = qrcard_csv::import(&csv);
      if contacts.is_empty() {
        anyhow::bail!("No valid contacts found. Check file format/required columns.");
      }
      let written = commands::write_cards(&contacts, out)?;
      for path in &written {
        println!("{}", path.display());
      }
      eprintln!("wrote {} card(s) to {}", written.len(), out.display());
    }

    Command::Upload { file, template } => {
      let csv = read_csv(file)?;
      let file_cfg = ConfigFile::load(args.config.as_deref())?;
      let client = ApiClient::new(api_config(&args, file_cfg))?;
      let report = client.import(csv, *template).await?;
      print!("{}", commands::render_upload(&report));
    }
  }

  Ok(())
}

fn read_csv(path: &Path) -> Result<String> {
  std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))
}
