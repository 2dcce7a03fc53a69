//! Profile-page layouts.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::{Error, Result};

/// The visual layout used when a stored contact is rendered as a web page.
///
/// The set is closed; an unrecognised tag is a typed error rather than a
/// missing lookup.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  EnumString,
  IntoStaticStr,
)]
pub enum TemplateKind {
  /// Teal banner with the organization name.
  #[default]
  A,
  /// Minimal blue layout.
  B,
  /// Indigo layout with the organization initial as avatar.
  C,
}

impl TemplateKind {
  /// Parse a template tag such as `"A"`; surrounding whitespace is ignored.
  pub fn parse(tag: &str) -> Result<Self> {
    Self::from_str(tag.trim())
      .map_err(|_| Error::UnknownTemplate(tag.to_owned()))
  }

  pub fn as_str(self) -> &'static str { self.into() }

  /// Human-readable label for selection lists.
  pub fn label(self) -> &'static str {
    match self {
      Self::A => "Template A: Teal Theme (Professional)",
      Self::B => "Template B: Blue Theme (Minimalist)",
      Self::C => "Template C: Indigo Theme (Iconic)",
    }
  }
}
