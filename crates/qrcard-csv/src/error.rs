//! Row-level rejection reasons.
//!
//! None of these abort an import; a rejected row is left out of the result
//! and, when asked for, reported alongside it.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowError {
  #[error("row has {found} cells but the header has {expected}")]
  Malformed { expected: usize, found: usize },

  #[error("row has no name, phone or email")]
  InsufficientData,

  #[error("row could not be serialized as a contact card")]
  Unserializable,

  #[error("row was rejected: {reason}")]
  Rejected { reason: String },
}

pub type Result<T, E = RowError> = std::result::Result<T, E>;
