//! vCard downloads and QR images for stored contacts.

use axum::{
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::{IntoResponse, Response},
};
use qrcard_core::{ContactRecord, store::ContactStore};
use qrcard_vcard::SerializedCard;

use super::{load, viewer::ViewerParams};
use crate::{
  AppState,
  error::Error,
  etag::{compute_etag, if_none_match},
  pages::sample_contact,
  qr,
};

/// `GET /cards/:id/download`
pub async fn download<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
  headers: HeaderMap,
) -> Result<Response, Error>
where
  S: ContactStore + 'static,
{
  let contact = load(&state, &id).await?;
  let card = qrcard_vcard::serialize(&contact.record)?;
  Ok(card_response(&card, &contact.record, &headers))
}

/// `GET /demo/download[?id=<id>]`
pub async fn demo_download(
  Query(params): Query<ViewerParams>,
  headers: HeaderMap,
) -> Result<Response, Error> {
  let id = params.id.as_deref().filter(|id| !id.is_empty()).unwrap_or("demo");
  let record = sample_contact(id)?;
  let card = qrcard_vcard::serialize(&record)?;
  Ok(card_response(&card, &record, &headers))
}

/// `GET /cards/:id/qr.svg`: links to the profile page with the stored
/// template.
pub async fn qr_svg<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<String>,
) -> Result<Response, Error>
where
  S: ContactStore + 'static,
{
  let contact = load(&state, &id).await?;
  let url = state
    .links
    .card_url(&contact.id, contact.template)
    .ok_or_else(|| Error::ContactNotFound(id.clone()))?;
  let svg = qr::render_svg(&url)?;

  Ok(
    (
      StatusCode::OK,
      [
        (header::CONTENT_TYPE, "image/svg+xml"),
        (header::CACHE_CONTROL, "no-cache"),
      ],
      svg,
    )
      .into_response(),
  )
}

fn card_response(
  card: &SerializedCard,
  record: &ContactRecord,
  headers: &HeaderMap,
) -> Response {
  let etag = compute_etag(card);
  if if_none_match(headers, &etag) {
    return (StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response();
  }

  let filename = qrcard_vcard::download_filename(record);
  (
    StatusCode::OK,
    [
      (header::CONTENT_TYPE, qrcard_vcard::CONTENT_TYPE.to_owned()),
      (header::CONTENT_DISPOSITION, content_disposition(&filename)),
      (header::ETAG, etag),
    ],
    card.as_str().to_owned(),
  )
    .into_response()
}

/// `attachment` with an ASCII `filename` and, when that had to be altered, a
/// UTF-8 `filename*` (RFC 6266).
pub fn content_disposition(filename: &str) -> String {
  let ascii: String = filename
    .chars()
    .map(|c| {
      if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' }
    })
    .collect();

  if ascii == filename {
    format!("attachment; filename=\"{filename}\"")
  } else {
    format!(
      "attachment; filename=\"{ascii}\"; filename*=UTF-8''{}",
      urlencoding::encode(filename)
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_names_use_a_simple_filename() {
    assert_eq!(
      content_disposition("Jane_Doe.vcf"),
      "attachment; filename=\"Jane_Doe.vcf\""
    );
  }

  #[test]
  fn non_ascii_names_get_an_encoded_fallback() {
    assert_eq!(
      content_disposition("José.vcf"),
      "attachment; filename=\"Jos_.vcf\"; filename*=UTF-8''Jos%C3%A9.vcf"
    );
  }

  #[test]
  fn quotes_cannot_break_the_header() {
    let value = content_disposition("a\"b.vcf");
    assert!(value.starts_with("attachment; filename=\"a_b.vcf\";"));
  }
}
