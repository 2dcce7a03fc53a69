//! Suggested filenames for downloaded cards.

use qrcard_core::record::ContactRecord;

/// Used when the contact has no name.
pub const FALLBACK_FILENAME: &str = "contact.vcf";

/// `<Name with each whitespace character replaced by '_'>.vcf`, or
/// [`FALLBACK_FILENAME`] when the record has no Name.
pub fn download_filename(record: &ContactRecord) -> String {
  match record.name() {
    Some(name) => {
      let stem: String = name
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();
      format!("{stem}.vcf")
    }
    None => FALLBACK_FILENAME.to_string(),
  }
}
