//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Duration, TimeZone, Utc};
use qrcard_core::{
  CanonicalField::*,
  ContactRecord, TemplateKind,
  store::{ContactStore, ContactWrite},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn write(
  pairs: &[(qrcard_core::CanonicalField, &str)],
  template: TemplateKind,
  minutes: i64,
) -> ContactWrite {
  let base = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
  ContactWrite::new(
    ContactRecord::from_fields(pairs.iter().copied()).unwrap(),
    template,
    base + Duration::minutes(minutes),
  )
}

// ─── Upsert / get ────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_then_get() {
  let s = store().await;

  let stored = s
    .upsert(write(&[(Id, "E1"), (Name, "Jane Doe")], TemplateKind::B, 0))
    .await
    .unwrap();
  assert_eq!(stored.id, "E1");
  assert_eq!(stored.template, TemplateKind::B);
  assert_eq!(stored.created_at, stored.updated_at);

  let fetched = s.get("E1").await.unwrap().unwrap();
  assert_eq!(fetched, stored);
  assert_eq!(fetched.record.name(), Some("Jane Doe"));
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn write_without_id_is_rejected() {
  let s = store().await;
  let err = s
    .upsert(write(&[(Name, "Jane")], TemplateKind::A, 0))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Core(qrcard_core::Error::MissingId)));
  assert_eq!(s.count().await.unwrap(), 0);
}

// ─── Merge semantics ─────────────────────────────────────────────────────────

#[tokio::test]
async fn second_write_merges_fields() {
  let s = store().await;
  s.upsert(write(
    &[(Id, "E1"), (Name, "Jane"), (Phone, "555")],
    TemplateKind::A,
    0,
  ))
  .await
  .unwrap();

  let merged = s
    .upsert(write(
      &[(Id, "E1"), (Email, "jane@x.com"), (Phone, "777")],
      TemplateKind::C,
      5,
    ))
    .await
    .unwrap();

  assert_eq!(merged.record.name(), Some("Jane"));
  assert_eq!(merged.record.phone(), Some("777"));
  assert_eq!(merged.record.email(), Some("jane@x.com"));
  assert_eq!(merged.template, TemplateKind::C);
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn created_at_survives_rewrites() {
  let s = store().await;
  let first = s
    .upsert(write(&[(Id, "E1"), (Name, "Jane")], TemplateKind::A, 0))
    .await
    .unwrap();
  let second = s
    .upsert(write(&[(Id, "E1"), (Name, "Jane")], TemplateKind::A, 30))
    .await
    .unwrap();

  assert_eq!(second.created_at, first.created_at);
  assert_eq!(second.updated_at - first.updated_at, Duration::minutes(30));
}

#[tokio::test]
async fn distinct_ids_are_independent() {
  let s = store().await;
  s.upsert(write(&[(Id, "a"), (Name, "Ann")], TemplateKind::A, 0))
    .await
    .unwrap();
  s.upsert(write(&[(Id, "b"), (Email, "b@x.com")], TemplateKind::B, 0))
    .await
    .unwrap();

  assert_eq!(s.count().await.unwrap(), 2);
  let b = s.get("b").await.unwrap().unwrap();
  assert_eq!(b.record.name(), None);
  assert_eq!(b.template, TemplateKind::B);
}

// ─── Durability ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn contacts_survive_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("cards.db");

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert(write(&[(Id, "E9"), (Phone, "555")], TemplateKind::C, 0))
      .await
      .unwrap();
    assert!(s.is_durable());
  }

  let reopened = SqliteStore::open(&path).await.unwrap();
  let fetched = reopened.get("E9").await.unwrap().unwrap();
  assert_eq!(fetched.record.phone(), Some("555"));
  assert_eq!(fetched.template, TemplateKind::C);
}
