//! JSON REST API for qrcard.
//!
//! Exposes an axum [`Router`] backed by any [`ContactStore`]. Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", qrcard_api::api_router(ApiState::new(store.clone(), links)))
//! ```

pub mod batch;
pub mod contacts;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use qrcard_core::{TemplateKind, link::CardLinks, store::ContactStore};

pub use batch::{BatchReport, BatchStatus, ImportOptions, import_csv};
pub use error::ApiError;

/// Everything the handlers need: the store plus how to link to cards.
pub struct ApiState<S> {
  pub store:            Arc<S>,
  pub links:            CardLinks,
  pub options:          ImportOptions,
  pub default_template: TemplateKind,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, links: CardLinks) -> Self {
    Self {
      store,
      links,
      options: ImportOptions::default(),
      default_template: TemplateKind::default(),
    }
  }

  pub fn with_options(mut self, options: ImportOptions) -> Self {
    self.options = options;
    self
  }

  pub fn with_default_template(mut self, template: TemplateKind) -> Self {
    self.default_template = template;
    self
  }
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:            Arc::clone(&self.store),
      links:            self.links.clone(),
      options:          self.options.clone(),
      default_template: self.default_template,
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: ContactStore + 'static,
{
  Router::new()
    .route("/import", post(contacts::import::<S>))
    .route("/contacts/{id}", get(contacts::get_one::<S>))
    .with_state(state)
}
