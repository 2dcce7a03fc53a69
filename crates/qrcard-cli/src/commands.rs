//! Subcommand bodies, kept free of argument parsing so they can be tested.

use std::{
  collections::HashSet,
  fmt::Write as _,
  fs,
  path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use qrcard_api::BatchStatus;
use qrcard_csv::{ImportReport, ImportedContact};

use crate::client::UploadReport;

// ─── preview ──────────────────────────────────────────────────────────────────

/// Human-readable listing of what an import would produce.
pub fn render_preview(report: &ImportReport) -> String {
  let mut out = String::new();
  for c in &report.contacts {
    let marker = if c.synthetic_id { " (generated ID)" } else { "" };
    let _ = writeln!(
      out,
      "line {:>4}  {}{}  {}",
      c.line,
      c.id(),
      marker,
      c.record.display_name()
    );
  }
  for s in &report.skipped {
    let _ = writeln!(out, "line {:>4}  skipped: {}", s.line, s.reason);
  }
  let _ = writeln!(
    out,
    "{} contact(s), {} row(s) skipped",
    report.contacts.len(),
    report.skipped.len()
  );
  out
}

// ─── cards ────────────────────────────────────────────────────────────────────

/// `base`, or `base` with `-2`, `-3`, … inserted before the extension,
/// whichever is not yet in `used`. The result is added to `used`.
pub fn unique_filename(base: &str, used: &mut HashSet<String>) -> String {
  let (stem, ext) = match base.rsplit_once('.') {
    Some((stem, ext)) => (stem, format!(".{ext}")),
    None => (base, String::new()),
  };

  let mut candidate = base.to_owned();
  let mut n = 2;
  while used.contains(&candidate) {
    candidate = format!("{stem}-{n}{ext}");
    n += 1;
  }
  used.insert(candidate.clone());
  candidate
}

/// Write one `.vcf` per contact into `dir`, creating it if needed. Returns
/// the written paths in contact order.
pub fn write_cards(contacts: &[ImportedContact], dir: &Path) -> Result<Vec<PathBuf>> {
  fs::create_dir_all(dir)
    .with_context(|| format!("creating output directory {}", dir.display()))?;

  let mut used = HashSet::new();
  let mut written = Vec::with_capacity(contacts.len());

  for contact in contacts {
    let base = qrcard_vcard::download_filename(&contact.record);
    let path = dir.join(unique_filename(&base, &mut used));
    fs::write(&path, contact.card.as_bytes())
      .with_context(|| format!("writing {}", path.display()))?;
    tracing::debug!(path = %path.display(), id = contact.id(), "wrote card");
    written.push(path);
  }

  Ok(written)
}

// ─── upload ───────────────────────────────────────────────────────────────────

pub fn render_upload(report: &UploadReport) -> String {
  let mut out = String::new();
  for card in &report.saved {
    let _ = writeln!(out, "line {:>4}  {}  {}  {}", card.line, card.id, card.name, card.url);
  }
  for f in &report.failed {
    let _ = writeln!(out, "line {:>4}  {}  FAILED: {}", f.line, f.id, f.error);
  }

  let summary = match report.status {
    BatchStatus::NoValidContacts => {
      "No valid contacts found. Check file format/required columns.".to_string()
    }
    BatchStatus::NothingSaved => format!(
      "None of {} contact(s) could be saved, {} row(s) skipped",
      report.found,
      report.skipped.len()
    ),
    BatchStatus::Imported if report.durable => format!(
      "{} of {} contact(s) saved, {} row(s) skipped",
      report.saved.len(),
      report.found,
      report.skipped.len()
    ),
    BatchStatus::Imported => format!(
      "{} contact(s) parsed; the server does not persist them",
      report.found
    ),
  };
  let _ = writeln!(out, "{summary}");
  out
}
