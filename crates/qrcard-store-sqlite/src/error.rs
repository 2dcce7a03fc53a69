//! Error type for `qrcard-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] qrcard_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A contact that was just written could not be read back.
  #[error("contact not found: {0}")]
  ContactNotFound(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
