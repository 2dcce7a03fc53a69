//! CSV contact importer for qrcard.
//!
//! Turns the text of a CSV file into validated [`ContactRecord`]s, each with
//! its vCard attached. Pure synchronous; no HTTP, file or database access.
//! Rows that cannot become a contact are skipped, never fatal.
//!
//! # Quick start
//!
//! ```
//! let csv = "Name,Mobile,E-Mail\nJane Doe,555-1234,jane@x.com\n";
//! let contacts = qrcard_csv::import(csv);
//! assert_eq!(contacts.len(), 1);
//! assert_eq!(contacts[0].id(), "local-1");
//! assert!(contacts[0].card.as_str().contains("FN:Jane Doe"));
//! ```
//!
//! [`ContactRecord`]: qrcard_core::record::ContactRecord

pub mod error;
pub mod header;
pub mod pipeline;
pub mod row;

pub use error::RowError;
pub use header::{HeaderResolver, SynonymTable};
pub use pipeline::{
  CsvContactPipeline, ImportReport, ImportedContact, SYNTHETIC_ID_PREFIX,
  SkippedRow, import, synthetic_id,
};
pub use row::validate_row;
