//! CSV document → ordered list of contacts with their cards.
//!
//! Pipeline:
//!   raw &str
//!     └─ non-blank lines
//!          ├─ line 0 → HeaderResolver → Vec<Option<CanonicalField>>
//!          └─ line i → split(',') → validate_row() → with synthetic ID
//!                        └─ qrcard_vcard::serialize() → ImportedContact
//!
//! Splitting is a plain comma split: quoted fields are not supported, and a
//! comma inside a value always starts a new cell.

use qrcard_core::record::ContactRecord;
use qrcard_vcard::SerializedCard;
use serde::Serialize;

use crate::{
  error::RowError,
  header::{BYTE_ORDER_MARK, HeaderResolver},
  row::validate_row,
};

/// Prefix of IDs assigned to rows that carry none.
pub const SYNTHETIC_ID_PREFIX: &str = "local-";

/// The ID given to an ID-less row at position `line` (header = 0).
pub fn synthetic_id(line: usize) -> String {
  format!("{SYNTHETIC_ID_PREFIX}{line}")
}

// ─── Output types ────────────────────────────────────────────────────────────

/// One accepted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportedContact {
  /// Position among the document's non-blank lines; the header is line 0.
  pub line:         usize,
  /// Always carries an ID.
  pub record:       ContactRecord,
  pub card:         SerializedCard,
  /// `true` when the ID was assigned by the pipeline rather than read from
  /// the row.
  pub synthetic_id: bool,
}

impl ImportedContact {
  pub fn id(&self) -> &str { self.record.id().unwrap_or_default() }
}

/// One rejected row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRow {
  pub line:   usize,
  pub reason: RowError,
}

/// Accepted contacts and rejected rows, both in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
  pub contacts: Vec<ImportedContact>,
  pub skipped:  Vec<SkippedRow>,
}

impl ImportReport {
  /// `true` when no row produced a contact (including empty documents).
  pub fn is_empty(&self) -> bool { self.contacts.is_empty() }
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct CsvContactPipeline {
  resolver: HeaderResolver,
}

impl CsvContactPipeline {
  pub fn new(resolver: HeaderResolver) -> Self { Self { resolver } }

  /// Accepted contacts only, in input order.
  pub fn run(&self, csv: &str) -> Vec<ImportedContact> {
    self.run_with_report(csv).contacts
  }

  /// Accepted contacts plus the reason each other row was dropped.
  ///
  /// Never fails: a document with fewer than two non-blank lines yields an
  /// empty report.
  pub fn run_with_report(&self, csv: &str) -> ImportReport {
    let csv = csv.strip_prefix(BYTE_ORDER_MARK).unwrap_or(csv);
    let lines: Vec<&str> =
      csv.lines().filter(|l| !l.trim().is_empty()).collect();

    let Some((header_line, rows)) = lines.split_first() else {
      return ImportReport::default();
    };
    if rows.is_empty() {
      return ImportReport::default();
    }

    let headers = self.resolver.resolve(header_line.split(','));
    let mut report = ImportReport::default();

    for (offset, row) in rows.iter().enumerate() {
      let line = offset + 1;
      let cells: Vec<&str> = row.split(',').collect();

      match import_row(line, &cells, &headers) {
        Ok(contact) => report.contacts.push(contact),
        Err(reason) => {
          tracing::debug!(line, %reason, "skipping CSV row");
          report.skipped.push(SkippedRow { line, reason });
        }
      }
    }

    report
  }
}

fn import_row(
  line: usize,
  cells: &[&str],
  headers: &[Option<qrcard_core::CanonicalField>],
) -> Result<ImportedContact, RowError> {
  let record = validate_row(cells, headers)?;

  let synthetic = record.id().is_none();
  let record = if synthetic {
    record.with_id(synthetic_id(line))
  } else {
    record
  };

  let card =
    qrcard_vcard::serialize(&record).map_err(|_| RowError::Unserializable)?;

  Ok(ImportedContact { line, record, card, synthetic_id: synthetic })
}

/// Run the pipeline with the default synonym table.
pub fn import(csv: &str) -> Vec<ImportedContact> {
  CsvContactPipeline::default().run(csv)
}
