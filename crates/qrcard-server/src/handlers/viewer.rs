//! `GET /` and `GET /demo`.

use askama::Template as _;
use axum::{
  extract::{Query, State},
  response::Html,
};
use qrcard_core::{TemplateKind, store::ContactStore};
use serde::Deserialize;

use super::{download_path, load};
use crate::{
  AppState,
  error::Error,
  pages::{GeneratorPage, ProfileView, render_profile, sample_contact},
};

#[derive(Debug, Deserialize)]
pub struct ViewerParams {
  pub id: Option<String>,
  /// Requested layout; ignored when the contact was stored with one.
  pub t:  Option<String>,
}

/// The layout to render: the stored one if any, else the requested one,
/// else `A`. An empty `t` counts as absent.
pub fn resolve_template(
  stored: Option<TemplateKind>,
  requested: Option<&str>,
) -> Result<TemplateKind, Error> {
  if let Some(kind) = stored {
    return Ok(kind);
  }
  match requested.filter(|t| !t.is_empty()) {
    Some(tag) => Ok(TemplateKind::parse(tag)?),
    None => Ok(TemplateKind::default()),
  }
}

/// `GET /[?id=<id>&t=<tag>]`
pub async fn index<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ViewerParams>,
) -> Result<Html<String>, Error>
where
  S: ContactStore + 'static,
{
  let Some(id) = params.id.as_deref().filter(|id| !id.is_empty()) else {
    let page = GeneratorPage::new(
      state.config.default_template,
      state.auth.is_some(),
    );
    return Ok(Html(page.render()?));
  };

  let contact = load(&state, id).await?;
  let template = resolve_template(Some(contact.template), params.t.as_deref())?;
  let view = ProfileView::new(&contact.id, contact.record, download_path(&contact.id));
  Ok(Html(render_profile(template, &view)?))
}

/// `GET /demo[?id=<id>&t=<tag>]`: the sample contact, never stored.
pub async fn demo(Query(params): Query<ViewerParams>) -> Result<Html<String>, Error> {
  let template = resolve_template(None, params.t.as_deref())?;
  let id = params.id.as_deref().filter(|id| !id.is_empty()).unwrap_or("demo");

  let download_url = format!("/demo/download?id={}", urlencoding::encode(id));
  let view = ProfileView::new(id, sample_contact(id)?, download_url);
  Ok(Html(render_profile(template, &view)?))
}
