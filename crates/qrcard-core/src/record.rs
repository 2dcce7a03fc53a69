//! [`ContactRecord`]: a validated mapping from canonical field to value.
//!
//! A record can only be built through [`ContactRecord::from_fields`] (or the
//! equivalent `TryFrom` / serde path), which rejects inputs that carry none
//! of the identifying fields. Values are opaque strings; nothing is coerced.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  field::{CanonicalField, IDENTIFYING_FIELDS},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
  try_from = "BTreeMap<CanonicalField, String>",
  into = "BTreeMap<CanonicalField, String>"
)]
pub struct ContactRecord {
  fields: BTreeMap<CanonicalField, String>,
}

impl ContactRecord {
  /// Build a record from `(field, value)` pairs.
  ///
  /// Values are trimmed and empty values are dropped. A later pair for the
  /// same field replaces an earlier one. Fails with
  /// [`Error::InsufficientData`] if no identifying field survives.
  pub fn from_fields<I, V>(pairs: I) -> Result<Self>
  where
    I: IntoIterator<Item = (CanonicalField, V)>,
    V: AsRef<str>,
  {
    let fields: BTreeMap<CanonicalField, String> = pairs
      .into_iter()
      .filter_map(|(field, value)| {
        let value = value.as_ref().trim();
        (!value.is_empty()).then(|| (field, value.to_owned()))
      })
      .collect();

    if !IDENTIFYING_FIELDS.iter().any(|f| fields.contains_key(f)) {
      return Err(Error::InsufficientData);
    }
    Ok(Self { fields })
  }

  pub fn get(&self, field: CanonicalField) -> Option<&str> {
    self.fields.get(&field).map(String::as_str)
  }

  pub fn contains(&self, field: CanonicalField) -> bool {
    self.fields.contains_key(&field)
  }

  pub fn id(&self) -> Option<&str> { self.get(CanonicalField::Id) }

  pub fn name(&self) -> Option<&str> { self.get(CanonicalField::Name) }

  pub fn phone(&self) -> Option<&str> { self.get(CanonicalField::Phone) }

  pub fn email(&self) -> Option<&str> { self.get(CanonicalField::Email) }

  pub fn organization(&self) -> Option<&str> {
    self.get(CanonicalField::Organization)
  }

  pub fn title(&self) -> Option<&str> { self.get(CanonicalField::Title) }

  /// Name, else Phone, else Email.
  pub fn display_name(&self) -> &str {
    self
      .name()
      .or_else(|| self.phone())
      .or_else(|| self.email())
      .unwrap_or_default()
  }

  /// Present fields in canonical order.
  pub fn fields(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
    self.fields.iter().map(|(f, v)| (*f, v.as_str()))
  }

  pub fn len(&self) -> usize { self.fields.len() }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }

  /// Return a copy of this record carrying `id` as its ID.
  ///
  /// A blank `id` leaves the record unchanged.
  pub fn with_id(mut self, id: impl Into<String>) -> Self {
    let id = id.into();
    let id = id.trim();
    if !id.is_empty() {
      self.fields.insert(CanonicalField::Id, id.to_owned());
    }
    self
  }

  /// Overlay `newer` on top of `self`: fields present in `newer` win, all
  /// other fields of `self` are kept.
  pub fn merged_with(&self, newer: &ContactRecord) -> ContactRecord {
    let mut fields = self.fields.clone();
    fields.extend(newer.fields.iter().map(|(f, v)| (*f, v.clone())));
    ContactRecord { fields }
  }
}

impl TryFrom<BTreeMap<CanonicalField, String>> for ContactRecord {
  type Error = Error;

  fn try_from(fields: BTreeMap<CanonicalField, String>) -> Result<Self> {
    Self::from_fields(fields)
  }
}

impl From<ContactRecord> for BTreeMap<CanonicalField, String> {
  fn from(record: ContactRecord) -> Self { record.fields }
}
