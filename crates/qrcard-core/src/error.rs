//! Error types for `qrcard-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record has none of Name, Phone or Email")]
  InsufficientData,

  #[error("record has no ID")]
  MissingId,

  #[error("unknown template: {0:?}")]
  UnknownTemplate(String),

  #[error("unknown contact field: {0:?}")]
  UnknownField(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
