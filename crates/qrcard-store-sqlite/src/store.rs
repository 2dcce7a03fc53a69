//! [`SqliteStore`]: the SQLite implementation of [`ContactStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use qrcard_core::{
  Error as CoreError,
  store::{ContactStore, ContactWrite, StoredContact},
};

use crate::{
  Error, Result,
  encode::{RawContact, encode_dt, encode_field, encode_template},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A qrcard contact store backed by a single SQLite file.
///
/// The inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Number of stored contacts.
  pub async fn count(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM contacts", [], |r| r.get(0))?)
      })
      .await?;
    Ok(usize::try_from(n).unwrap_or_default())
  }
}

/// Read one contact and all of its field rows.
fn read_contact(
  conn: &rusqlite::Connection,
  id: &str,
) -> rusqlite::Result<Option<RawContact>> {
  let head = conn
    .query_row(
      "SELECT contact_id, template, created_at, updated_at
         FROM contacts WHERE contact_id = ?1",
      rusqlite::params![id],
      |row| {
        Ok((
          row.get::<_, String>(0)?,
          row.get::<_, String>(1)?,
          row.get::<_, String>(2)?,
          row.get::<_, String>(3)?,
        ))
      },
    )
    .optional()?;

  let Some((contact_id, template, created_at, updated_at)) = head else {
    return Ok(None);
  };

  let mut stmt = conn.prepare(
    "SELECT field, value FROM contact_fields WHERE contact_id = ?1 ORDER BY field",
  )?;
  let fields = stmt
    .query_map(rusqlite::params![id], |row| Ok((row.get(0)?, row.get(1)?)))?
    .collect::<rusqlite::Result<Vec<(String, String)>>>()?;

  Ok(Some(RawContact { contact_id, template, created_at, updated_at, fields }))
}

// ─── ContactStore impl ───────────────────────────────────────────────────────

impl ContactStore for SqliteStore {
  type Error = Error;

  async fn upsert(&self, write: ContactWrite) -> Result<StoredContact> {
    let id = write.id().ok_or(CoreError::MissingId)?.to_owned();

    let at_str       = encode_dt(write.written_at);
    let template_str = encode_template(write.template);
    let fields: Vec<(&'static str, String)> = write
      .record
      .fields()
      .map(|(f, v)| (encode_field(f), v.to_owned()))
      .collect();

    let id_for_call = id.clone();
    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        tx.execute(
          "INSERT INTO contacts (contact_id, template, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)
             ON CONFLICT(contact_id) DO UPDATE SET
               template   = excluded.template,
               updated_at = excluded.updated_at",
          rusqlite::params![id_for_call, template_str, at_str],
        )?;
        for (field, value) in &fields {
          tx.execute(
            "INSERT INTO contact_fields (contact_id, field, value)
               VALUES (?1, ?2, ?3)
               ON CONFLICT(contact_id, field) DO UPDATE SET value = excluded.value",
            rusqlite::params![id_for_call, field, value],
          )?;
        }
        let raw = read_contact(&tx, &id_for_call)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    tracing::debug!(contact_id = %id, "contact upserted");
    raw.ok_or(Error::ContactNotFound(id))?.into_stored()
  }

  async fn get(&self, id: &str) -> Result<Option<StoredContact>> {
    let id = id.to_owned();
    let raw = self
      .conn
      .call(move |conn| Ok(read_contact(conn, &id)?))
      .await?;
    raw.map(RawContact::into_stored).transpose()
  }
}
