//! Canonical contact fields.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// One of the fixed contact attributes the importer understands.
///
/// Declaration order matters: it is the order in which CSV header synonyms
/// are tried and the order in which a record's fields iterate.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum CanonicalField {
  #[serde(rename = "ID")]
  #[strum(serialize = "ID")]
  Id,
  Name,
  Phone,
  Email,
  Organization,
  Title,
}

/// Fields of which at least one must be present for a record to be usable.
pub const IDENTIFYING_FIELDS: [CanonicalField; 3] =
  [CanonicalField::Name, CanonicalField::Phone, CanonicalField::Email];

impl CanonicalField {
  /// The external spelling, as used in JSON and in storage columns.
  pub fn as_str(self) -> &'static str { self.into() }

  pub fn is_identifying(self) -> bool { IDENTIFYING_FIELDS.contains(&self) }

  /// Parse the external spelling (`"ID"`, `"Name"`, …).
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownField(s.to_owned()))
  }
}
