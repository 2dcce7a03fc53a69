//! Core types and trait definitions for qrcard.
//!
//! This crate is deliberately free of HTTP, CSV and database dependencies.
//! The importer, the vCard codec and the storage backends all build on the
//! types defined here.

// Native `async fn` in traits; the store trait spells out its `Send` bounds.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod field;
pub mod link;
pub mod memory;
pub mod record;
pub mod store;
pub mod template;

pub use error::{Error, Result};
pub use field::CanonicalField;
pub use record::ContactRecord;
pub use template::TemplateKind;
