//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings; templates and field names use their
//! external spelling (`"A"`, `"Name"`).

use chrono::{DateTime, Utc};
use qrcard_core::{
  field::CanonicalField, record::ContactRecord, store::StoredContact,
  template::TemplateKind,
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── TemplateKind / CanonicalField
// ────────────────────────────────────────────

pub fn encode_template(t: TemplateKind) -> &'static str { t.as_str() }

pub fn decode_template(s: &str) -> Result<TemplateKind> {
  Ok(TemplateKind::parse(s)?)
}

pub fn encode_field(f: CanonicalField) -> &'static str { f.as_str() }

pub fn decode_field(s: &str) -> Result<CanonicalField> {
  Ok(CanonicalField::parse(s)?)
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read from a `contacts` row and its `contact_fields` rows.
pub struct RawContact {
  pub contact_id: String,
  pub template:   String,
  pub created_at: String,
  pub updated_at: String,
  pub fields:     Vec<(String, String)>,
}

impl RawContact {
  pub fn into_stored(self) -> Result<StoredContact> {
    let pairs = self
      .fields
      .iter()
      .map(|(f, v)| Ok((decode_field(f)?, v.as_str())))
      .collect::<Result<Vec<_>>>()?;

    Ok(StoredContact {
      record:     ContactRecord::from_fields(pairs)?,
      template:   decode_template(&self.template)?,
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
      id:         self.contact_id,
    })
  }
}
