//! Error types for the qrcard-vcard serializer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The record carries none of Name, Phone or Email; a card without any
  /// identifying information is never produced.
  #[error("contact has no name, phone or email to put on a card")]
  NoIdentifyingField,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
