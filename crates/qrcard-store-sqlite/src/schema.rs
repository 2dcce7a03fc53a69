//! SQL schema for the qrcard SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per contact ID. Rows are never deleted.
CREATE TABLE IF NOT EXISTS contacts (
    contact_id  TEXT PRIMARY KEY,
    template    TEXT NOT NULL,   -- 'A' | 'B' | 'C'; last write wins
    created_at  TEXT NOT NULL,   -- RFC 3339 UTC of the first write
    updated_at  TEXT NOT NULL    -- RFC 3339 UTC of the latest write
);

-- Canonical field values. A write replaces the fields it carries and
-- leaves every other field of the contact alone.
CREATE TABLE IF NOT EXISTS contact_fields (
    contact_id  TEXT NOT NULL REFERENCES contacts(contact_id),
    field       TEXT NOT NULL,   -- 'ID' | 'Name' | 'Phone' | 'Email' | 'Organization' | 'Title'
    value       TEXT NOT NULL,
    PRIMARY KEY (contact_id, field)
);

PRAGMA user_version = 1;
";
