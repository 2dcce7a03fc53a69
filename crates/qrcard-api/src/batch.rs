//! Batch import: CSV text → persisted contacts → card URLs.
//!
//! This is the one place where the pure importer meets a [`ContactStore`].
//! Each accepted row is written independently; a failed write is reported and
//! excluded from the output but never stops the batch.

use chrono::Utc;
use qrcard_core::{
  ContactRecord, TemplateKind,
  link::CardLinks,
  store::{ContactStore, ContactWrite},
};
use qrcard_csv::{CsvContactPipeline, ImportedContact, SYNTHETIC_ID_PREFIX, SkippedRow};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Options ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportOptions {
  /// Replace `local-<line>` IDs with `local-<uuid>` before saving, so rows
  /// from different uploads never merge into one contact.
  #[serde(default)]
  pub rekey_synthetic_ids: bool,
}

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
  /// The document yielded no contacts at all.
  NoValidContacts,
  /// Contacts were found but every write failed.
  NothingSaved,
  Imported,
}

/// A contact that was written and can be linked to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedCard {
  pub id:     String,
  /// Name, else Phone, else Email.
  pub name:   String,
  pub line:   usize,
  pub url:    String,
  pub record: ContactRecord,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedWrite {
  pub id:    String,
  pub line:  usize,
  pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
  pub status:   BatchStatus,
  pub template: TemplateKind,
  /// Rows accepted by the importer.
  pub found:    usize,
  pub skipped:  Vec<SkippedRow>,
  pub saved:    Vec<SavedCard>,
  pub failed:   Vec<FailedWrite>,
  /// Whether `saved` contacts outlive the server process.
  pub durable:  bool,
}

impl BatchReport {
  fn empty(template: TemplateKind, skipped: Vec<SkippedRow>, durable: bool) -> Self {
    Self {
      status: BatchStatus::NoValidContacts,
      template,
      found: 0,
      skipped,
      saved: Vec::new(),
      failed: Vec::new(),
      durable,
    }
  }

  /// One-line summary suitable for showing to whoever uploaded the file.
  pub fn message(&self) -> String {
    match self.status {
      BatchStatus::NoValidContacts => {
        "No valid contacts found. Check file format/required columns.".into()
      }
      BatchStatus::NothingSaved => {
        "No valid contacts found with unique IDs.".into()
      }
      BatchStatus::Imported if self.durable => format!(
        "Successfully processed and saved {} contacts!",
        self.saved.len()
      ),
      BatchStatus::Imported => format!(
        "Successfully parsed {} contacts! (Database save skipped for local testing)",
        self.found
      ),
    }
  }
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// Import `csv`, upsert every accepted contact into `store` tagged with
/// `template`, and return what happened to each row.
pub async fn import_csv<S>(
  store: &S,
  csv: &str,
  template: TemplateKind,
  links: &CardLinks,
  options: &ImportOptions,
) -> BatchReport
where
  S: ContactStore,
{
  let report = CsvContactPipeline::default().run_with_report(csv);
  let durable = store.is_durable();

  if report.is_empty() {
    return BatchReport::empty(template, report.skipped, durable);
  }

  let found = report.contacts.len();
  tracing::info!(found, skipped = report.skipped.len(), %template, "importing contacts");

  let written_at = Utc::now();
  let mut saved = Vec::with_capacity(found);
  let mut failed = Vec::new();

  for contact in report.contacts {
    let ImportedContact { line, record, synthetic_id, .. } = contact;
    let record = if synthetic_id && options.rekey_synthetic_ids {
      record.with_id(format!("{SYNTHETIC_ID_PREFIX}{}", Uuid::new_v4()))
    } else {
      record
    };
    let id = record.id().unwrap_or_default().to_owned();

    match store
      .upsert(ContactWrite::new(record, template, written_at))
      .await
    {
      Ok(stored) => {
        let Some(url) = links.card_url(&stored.id, template) else {
          continue;
        };
        saved.push(SavedCard {
          name: stored.record.display_name().to_owned(),
          id: stored.id,
          line,
          url,
          record: stored.record,
        });
      }
      Err(e) => {
        tracing::warn!(contact_id = %id, line, error = %e, "failed to save contact");
        failed.push(FailedWrite { id, line, error: e.to_string() });
      }
    }
  }

  let status = if saved.is_empty() {
    BatchStatus::NothingSaved
  } else {
    BatchStatus::Imported
  };

  BatchReport {
    status,
    template,
    found,
    skipped: report.skipped,
    saved,
    failed,
    durable,
  }
}
