//! Per-row validation.

use qrcard_core::{Error as CoreError, field::CanonicalField, record::ContactRecord};

use crate::error::{Result, RowError};

/// Build a [`ContactRecord`] from one row of cells.
///
/// `headers` is the resolved header row. A row whose cell count differs from
/// it is rejected whole. Cells under unmapped headers are ignored, blank cells
/// are dropped, and the result must carry a Name, Phone or Email.
pub fn validate_row<S>(
  cells: &[S],
  headers: &[Option<CanonicalField>],
) -> Result<ContactRecord>
where
  S: AsRef<str>,
{
  if cells.len() != headers.len() {
    return Err(RowError::Malformed {
      expected: headers.len(),
      found:    cells.len(),
    });
  }

  let pairs = headers
    .iter()
    .zip(cells)
    .filter_map(|(header, cell)| header.map(|field| (field, cell.as_ref())));

  ContactRecord::from_fields(pairs).map_err(row_error)
}

fn row_error(e: CoreError) -> RowError {
  match e {
    CoreError::InsufficientData => RowError::InsufficientData,
    other => RowError::Rejected { reason: other.to_string() },
  }
}

#[cfg(test)]
mod tests {
  use CanonicalField::*;

  use super::*;

  const HEADERS: [Option<CanonicalField>; 4] =
    [Some(Name), Some(Phone), None, Some(Email)];

  #[test]
  fn copies_mapped_non_empty_cells() {
    let rec =
      validate_row(&["Jane Doe", " 555 ", "ignored", ""], &HEADERS).unwrap();
    assert_eq!(rec.name(), Some("Jane Doe"));
    assert_eq!(rec.phone(), Some("555"));
    assert_eq!(rec.email(), None);
    assert_eq!(rec.len(), 2);
  }

  #[test]
  fn short_row_is_malformed() {
    let err = validate_row(&["Jane", "555", "x"], &HEADERS).unwrap_err();
    assert_eq!(err, RowError::Malformed { expected: 4, found: 3 });
  }

  #[test]
  fn long_row_is_malformed_even_with_data() {
    let err =
      validate_row(&["Jane", "555", "x", "j@x.com", "extra"], &HEADERS)
        .unwrap_err();
    assert_eq!(err, RowError::Malformed { expected: 4, found: 5 });
  }

  #[test]
  fn other_record_errors_keep_their_reason() {
    assert_eq!(row_error(CoreError::InsufficientData), RowError::InsufficientData);
    assert_eq!(row_error(CoreError::MissingId), RowError::Rejected {
      reason: "record has no ID".into(),
    });
  }

  #[test]
  fn org_and_title_only_is_insufficient() {
    let headers = [Some(Organization), Some(Title), Some(Name)];
    let err = validate_row(&["Acme", "CEO", "  "], &headers).unwrap_err();
    assert_eq!(err, RowError::InsufficientData);
  }

  #[test]
  fn unmapped_cells_do_not_make_a_row_valid() {
    let headers = [None, Some(Email)];
    let err = validate_row(&["Jane", ""], &headers).unwrap_err();
    assert_eq!(err, RowError::InsufficientData);
  }

  #[test]
  fn later_duplicate_column_wins_when_non_empty() {
    let headers = [Some(Phone), Some(Phone)];
    let rec = validate_row(&["111", "222"], &headers).unwrap();
    assert_eq!(rec.phone(), Some("222"));
    let rec = validate_row(&["111", ""], &headers).unwrap();
    assert_eq!(rec.phone(), Some("111"));
  }
}
