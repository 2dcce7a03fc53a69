//! vCard 3.0 serializer for qrcard.
//!
//! Converts a [`ContactRecord`] into the portable text payload that address
//! books import. Pure synchronous; no HTTP or database dependencies.
//!
//! # Quick start
//!
//! ```
//! use qrcard_core::{CanonicalField, ContactRecord};
//!
//! let record = ContactRecord::from_fields([
//!   (CanonicalField::Name, "Jane Doe"),
//!   (CanonicalField::Email, "jane@example.com"),
//! ])
//! .unwrap();
//! let card = qrcard_vcard::serialize(&record).unwrap();
//! assert!(card.as_str().starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
//! assert_eq!(qrcard_vcard::download_filename(&record), "Jane_Doe.vcf");
//! ```

mod download;
pub mod error;
mod serialize;

use std::fmt;

pub use download::{FALLBACK_FILENAME, download_filename};
pub use error::{Error, Result};
use qrcard_core::record::ContactRecord;
use serde::Serialize;

// ─── Public types
// ─────────────────────────────────────────────────────────────

/// The vCard text derived from one [`ContactRecord`].
///
/// Only [`serialize`] produces values of this type, so every instance carries
/// at least one identifying property.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SerializedCard(String);

impl SerializedCard {
  pub fn as_str(&self) -> &str { &self.0 }

  pub fn as_bytes(&self) -> &[u8] { self.0.as_bytes() }

  pub fn len(&self) -> usize { self.0.len() }

  pub fn is_empty(&self) -> bool { self.0.is_empty() }

  pub fn into_string(self) -> String { self.0 }
}

impl fmt::Display for SerializedCard {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl AsRef<str> for SerializedCard {
  fn as_ref(&self) -> &str { &self.0 }
}

// ─── Public API
// ───────────────────────────────────────────────────────────────

/// Serialize `record` as a vCard 3.0 string.
///
/// Fails with [`Error::NoIdentifyingField`] rather than emit a card with no
/// name, phone or email.
pub fn serialize(record: &ContactRecord) -> Result<SerializedCard> {
  serialize::serialize(record)
}

/// The MIME type under which cards are served.
pub const CONTENT_TYPE: &str = "text/vcard; charset=utf-8";
