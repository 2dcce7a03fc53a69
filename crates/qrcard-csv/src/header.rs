//! CSV header resolution.
//!
//! Raw column names are trimmed and lowercased, then looked up in a
//! [`SynonymTable`]. There is no fuzzy matching: `"E-Mail "` resolves to
//! `Email` because `e-mail` is a listed synonym, `"emial"` does not.

use qrcard_core::field::CanonicalField;

/// Excel and Notepad prefix UTF-8 exports with this.
pub const BYTE_ORDER_MARK: char = '\u{feff}';

// ─── Synonym table ───────────────────────────────────────────────────────────

/// Accepted header spellings for each canonical field, in lookup order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymTable {
  entries: Vec<(CanonicalField, Vec<String>)>,
}

impl Default for SynonymTable {
  fn default() -> Self {
    use CanonicalField::*;
    Self::builder()
      .field(Id, ["id", "contact id", "record id"])
      .field(Name, ["name", "full name", "contact name", "fullname"])
      .field(Phone, ["phone", "mobile", "cell", "telephone", "tel"])
      .field(Email, ["email", "e-mail", "mail"])
      .field(Organization, ["organization", "company", "org", "firm"])
      .field(Title, ["title", "job title", "position", "job"])
      .build()
  }
}

impl SynonymTable {
  pub fn builder() -> SynonymTableBuilder { SynonymTableBuilder::default() }

  /// The normalised synonyms registered for `field`.
  pub fn synonyms(&self, field: CanonicalField) -> &[String] {
    self
      .entries
      .iter()
      .find(|(f, _)| *f == field)
      .map(|(_, s)| s.as_slice())
      .unwrap_or_default()
  }

  /// Every synonym listed under more than one field, with the fields that
  /// claim it. An empty result means the table is unambiguous.
  pub fn conflicts(&self) -> Vec<(String, Vec<CanonicalField>)> {
    let mut conflicts: Vec<(String, Vec<CanonicalField>)> = Vec::new();
    for (_, synonyms) in &self.entries {
      for synonym in synonyms {
        if conflicts.iter().any(|(s, _)| s == synonym) {
          continue;
        }
        let owners = self.owners(synonym);
        if owners.len() > 1 {
          conflicts.push((synonym.clone(), owners));
        }
      }
    }
    conflicts
  }

  fn owners(&self, normalised: &str) -> Vec<CanonicalField> {
    self
      .entries
      .iter()
      .filter(|(_, synonyms)| synonyms.iter().any(|s| s == normalised))
      .map(|(f, _)| *f)
      .collect()
  }

  /// Resolve one raw header. Headers claimed by several fields resolve to
  /// `None`, the same as unknown headers.
  pub fn lookup(&self, raw_header: &str) -> Option<CanonicalField> {
    match self.owners(&normalise(raw_header)).as_slice() {
      [field] => Some(*field),
      _ => None,
    }
  }
}

/// Builds a [`SynonymTable`]; fields are looked up in the order added.
#[derive(Debug, Default)]
pub struct SynonymTableBuilder {
  entries: Vec<(CanonicalField, Vec<String>)>,
}

impl SynonymTableBuilder {
  /// Register `synonyms` for `field`. Calling this twice for the same field
  /// extends its list.
  pub fn field<I, S>(mut self, field: CanonicalField, synonyms: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let normalised = synonyms.into_iter().map(|s| normalise(s.as_ref()));
    match self.entries.iter_mut().find(|(f, _)| *f == field) {
      Some((_, list)) => list.extend(normalised),
      None => self.entries.push((field, normalised.collect())),
    }
    self
  }

  pub fn build(self) -> SynonymTable { SynonymTable { entries: self.entries } }
}

/// Trim whitespace and any byte-order mark, then lowercase.
fn normalise(header: &str) -> String {
  header
    .trim_matches(|c: char| c.is_whitespace() || c == BYTE_ORDER_MARK)
    .to_lowercase()
}

// ─── Resolver ────────────────────────────────────────────────────────────────

/// Maps a header row to canonical fields.
#[derive(Debug, Clone, Default)]
pub struct HeaderResolver {
  table: SynonymTable,
}

impl HeaderResolver {
  pub fn new(table: SynonymTable) -> Self { Self { table } }

  pub fn table(&self) -> &SynonymTable { &self.table }

  /// One entry per input header: the canonical field it names, or `None`
  /// if it is unknown or ambiguous.
  pub fn resolve<I, S>(&self, raw_headers: I) -> Vec<Option<CanonicalField>>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    raw_headers
      .into_iter()
      .map(|h| self.table.lookup(h.as_ref()))
      .collect()
  }
}
