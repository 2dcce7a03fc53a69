//! [`MemoryStore`], a process-local [`ContactStore`].
//!
//! Selected with `backend = "memory"` for local runs where no database is
//! wanted. Contacts live only as long as the process.

use std::{
  collections::HashMap,
  sync::{Arc, PoisonError, RwLock},
};

use crate::{
  Error, Result,
  store::{ContactStore, ContactWrite, StoredContact},
};

/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  contacts: Arc<RwLock<HashMap<String, StoredContact>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn len(&self) -> usize {
    self
      .contacts
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .len()
  }

  pub fn is_empty(&self) -> bool { self.len() == 0 }

  fn upsert_sync(&self, write: ContactWrite) -> Result<StoredContact> {
    let id = write.id().ok_or(Error::MissingId)?.to_owned();
    let mut contacts =
      self.contacts.write().unwrap_or_else(PoisonError::into_inner);

    let stored = match contacts.get(&id) {
      Some(existing) => StoredContact {
        id:         id.clone(),
        record:     existing.record.merged_with(&write.record),
        template:   write.template,
        created_at: existing.created_at,
        updated_at: write.written_at,
      },
      None => StoredContact {
        id:         id.clone(),
        record:     write.record,
        template:   write.template,
        created_at: write.written_at,
        updated_at: write.written_at,
      },
    };

    contacts.insert(id, stored.clone());
    Ok(stored)
  }
}

impl ContactStore for MemoryStore {
  type Error = Error;

  async fn upsert(&self, write: ContactWrite) -> Result<StoredContact> {
    self.upsert_sync(write)
  }

  async fn get(&self, id: &str) -> Result<Option<StoredContact>> {
    Ok(
      self
        .contacts
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(id)
        .cloned(),
    )
  }

  fn is_durable(&self) -> bool { false }
}
