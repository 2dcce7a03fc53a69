//! `POST /generate`, the upload form's target.

use askama::Template as _;
use axum::{
  extract::{Multipart, State},
  response::Html,
};
use qrcard_api::import_csv;
use qrcard_core::{TemplateKind, store::ContactStore};

use crate::{
  AppState,
  auth::Authenticated,
  error::Error,
  pages::{GeneratorPage, Outcome},
};

/// Multipart fields: `template` (tag, optional) and `csv` (file).
pub async fn handler<S>(
  _auth: Authenticated,
  State(state): State<AppState<S>>,
  mut multipart: Multipart,
) -> Result<Html<String>, Error>
where
  S: ContactStore + 'static,
{
  let mut template = state.config.default_template;
  let mut csv = None;

  while let Some(field) = multipart.next_field().await.map_err(bad_upload)? {
    let name = field.name().map(str::to_owned);
    match name.as_deref() {
      Some("template") => {
        template = TemplateKind::parse(&field.text().await.map_err(bad_upload)?)?;
      }
      Some("csv") => csv = Some(field.text().await.map_err(bad_upload)?),
      _ => {}
    }
  }

  let csv = csv.ok_or_else(|| Error::BadRequest("missing `csv` field".into()))?;
  let report = import_csv(
    &*state.store,
    &csv,
    template,
    &state.links,
    &state.import_options(),
  )
  .await;

  tracing::info!(
    status = ?report.status,
    saved = report.saved.len(),
    failed = report.failed.len(),
    "processed upload"
  );

  let page = GeneratorPage::new(template, state.auth.is_some())
    .with_outcome(Outcome::from_report(report)?);
  Ok(Html(page.render()?))
}

fn bad_upload(e: axum::extract::multipart::MultipartError) -> Error {
  Error::BadRequest(e.body_text())
}
