//! vCard 3.0 serializer.
//!
//! Output is LF-separated, unfolded, and ends at `END:VCARD` with no trailing
//! newline. The same record always yields the same bytes.

use qrcard_core::record::ContactRecord;

use crate::{
  SerializedCard,
  error::{Error, Result},
};

const PREAMBLE: [&str; 2] = ["BEGIN:VCARD", "VERSION:3.0"];
const CLOSING: &str = "END:VCARD";

// ─── Value escaping ───────────────────────────────────────────────────────────

/// Escape `;` then `,` in a TEL / EMAIL value.
///
/// Semicolons go first so that the backslashes introduced for them are not
/// touched by the comma pass.
fn escape_list_chars(s: &str) -> String {
  s.replace(';', "\\;").replace(',', "\\,")
}

// ─── Name splitting ───────────────────────────────────────────────────────────

/// Split a full name into `(given, family)`: the first whitespace-separated
/// token, and the remaining tokens joined by single spaces.
fn split_name(full: &str) -> (&str, String) {
  let mut tokens = full.split_whitespace();
  let given = tokens.next().unwrap_or_default();
  let family = tokens.collect::<Vec<_>>().join(" ");
  (given, family)
}

// ─── Serializer ───────────────────────────────────────────────────────────────

pub(crate) fn serialize(record: &ContactRecord) -> Result<SerializedCard> {
  let name = record.name();
  let phone = record.phone();
  let email = record.email();

  let mut lines: Vec<String> = PREAMBLE.iter().map(|l| l.to_string()).collect();

  match (name, phone.or(email)) {
    (Some(name), _) => {
      let (given, family) = split_name(name);
      lines.push(format!("N:{family};{given};;;"));
      lines.push(format!("FN:{name}"));
    }
    (None, Some(fallback)) => lines.push(format!("FN:{fallback}")),
    (None, None) => return Err(Error::NoIdentifyingField),
  }

  if let Some(title) = record.title() {
    lines.push(format!("TITLE:{title}"));
  }
  if let Some(org) = record.organization() {
    lines.push(format!("ORG:{org}"));
  }
  if let Some(phone) = phone {
    lines.push(format!("TEL;TYPE=CELL,VOICE:{}", escape_list_chars(phone)));
  }
  if let Some(email) = email {
    lines.push(format!(
      "EMAIL;TYPE=PREF,INTERNET:{}",
      escape_list_chars(email)
    ));
  }

  lines.push(CLOSING.to_string());
  Ok(SerializedCard(lines.join("\n")))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
