//! ETags for downloadable cards.
//!
//! The tag is a SHA-256 over the exact bytes served, so it changes whenever
//! a merge changes the card and never otherwise.

use axum::http::{HeaderMap, header};
use qrcard_vcard::SerializedCard;
use sha2::{Digest, Sha256};

/// Strong ETag (quoted hex digest) for `card`.
pub fn compute_etag(card: &SerializedCard) -> String {
  let hash = Sha256::digest(card.as_bytes());
  format!("\"{}\"", hex::encode(hash))
}

/// Whether the request's `If-None-Match` already names `etag`.
///
/// Handles comma-separated lists, weak validators and `*`.
pub fn if_none_match(headers: &HeaderMap, etag: &str) -> bool {
  headers
    .get_all(header::IF_NONE_MATCH)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .flat_map(|v| v.split(','))
    .map(str::trim)
    .any(|candidate| {
      candidate == "*" || candidate.trim_start_matches("W/") == etag
    })
}
