//! The `ContactStore` trait and the types it exchanges.
//!
//! The trait is implemented by storage backends (`qrcard-store-sqlite`, and
//! [`MemoryStore`](crate::memory::MemoryStore) for local runs). Higher layers
//! (`qrcard-api`, `qrcard-server`) receive a store explicitly; the importer
//! never sees one.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{record::ContactRecord, template::TemplateKind};

// ─── Write request ───────────────────────────────────────────────────────────

/// Input to [`ContactStore::upsert`].
#[derive(Debug, Clone)]
pub struct ContactWrite {
  /// Keyed by its ID field; writes without one are rejected.
  pub record:     ContactRecord,
  pub template:   TemplateKind,
  pub written_at: DateTime<Utc>,
}

impl ContactWrite {
  pub fn new(
    record: ContactRecord,
    template: TemplateKind,
    written_at: DateTime<Utc>,
  ) -> Self {
    Self { record, template, written_at }
  }

  pub fn id(&self) -> Option<&str> { self.record.id() }
}

// ─── Stored contact ──────────────────────────────────────────────────────────

/// A contact as persisted: the merge of every write made under its ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredContact {
  pub id:         String,
  pub record:     ContactRecord,
  /// Template tag of the most recent write.
  pub template:   TemplateKind,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a key-value store of contact records.
///
/// Writes have merge semantics: fields absent from a write keep their
/// previously stored values. Nothing is ever deleted.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait ContactStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert or merge `write` under its record's ID and return the stored
  /// result.
  fn upsert(
    &self,
    write: ContactWrite,
  ) -> impl Future<Output = Result<StoredContact, Self::Error>> + Send + '_;

  /// Fetch a contact by ID. Returns `None` if not found.
  fn get<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<StoredContact>, Self::Error>> + Send + 'a;

  /// Whether writes survive a process restart.
  fn is_durable(&self) -> bool { true }
}
