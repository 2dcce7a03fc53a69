//! Handlers for `/import` and `/contacts` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/import` | Body: CSV text; optional `?t=A\|B\|C`; returns [`BatchReport`] |
//! | `GET`  | `/contacts/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, Query, State},
};
use qrcard_core::{TemplateKind, store::ContactStore, store::StoredContact};
use serde::Deserialize;

use crate::{
  ApiState,
  batch::{BatchReport, import_csv},
  error::ApiError,
};

// ─── Import ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ImportParams {
  /// Template tag; the state's default when absent.
  pub t: Option<String>,
}

/// `POST /import[?t=<tag>]`, body: the CSV document.
pub async fn import<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ImportParams>,
  body: String,
) -> Result<Json<BatchReport>, ApiError>
where
  S: ContactStore + 'static,
{
  let template = match params.t.as_deref() {
    Some(tag) => TemplateKind::parse(tag)?,
    None => state.default_template,
  };

  let report =
    import_csv(&*state.store, &body, template, &state.links, &state.options)
      .await;
  Ok(Json(report))
}

// ─── Get one ─────────────────────────────────────────────────────────────────

/// `GET /contacts/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<StoredContact>, ApiError>
where
  S: ContactStore + 'static,
{
  let contact = state
    .store
    .get(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("contact {id} not found")))?;
  Ok(Json(contact))
}
