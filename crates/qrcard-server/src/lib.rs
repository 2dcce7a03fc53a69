//! Web front end for qrcard.
//!
//! Serves the upload form, the per-contact profile pages that QR codes link
//! to, vCard downloads, QR images, and the JSON API under `/api`, all backed
//! by any [`ContactStore`].

pub mod auth;
pub mod error;
pub mod etag;
pub mod handlers;
pub mod pages;
pub mod qr;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  middleware,
  routing::{get, post},
};
use qrcard_api::{ApiState, ImportOptions};
use qrcard_core::{TemplateKind, link::CardLinks, store::ContactStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use handlers::{cards, generate, viewer};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`ContactStore`] the binary opens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  #[default]
  Sqlite,
  /// Process-local; contacts are lost on exit.
  Memory,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `QRCARD_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:                String,
  pub port:                u16,
  /// Public origin encoded into QR codes, e.g. `https://cards.example.com`.
  pub base_url:            String,
  /// Public path of the profile page under `base_url`.
  pub viewer_path:         String,
  pub backend:             Backend,
  pub store_path:          PathBuf,
  pub default_template:    TemplateKind,
  pub rekey_synthetic_ids: bool,
  pub auth_username:       Option<String>,
  pub auth_password_hash:  Option<String>,
  pub max_upload_bytes:    usize,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                "127.0.0.1".to_string(),
      port:                8080,
      base_url:            "http://localhost:8080".to_string(),
      viewer_path:         "/".to_string(),
      backend:             Backend::default(),
      store_path:          PathBuf::from("qrcard.db"),
      default_template:    TemplateKind::default(),
      rekey_synthetic_ids: false,
      auth_username:       None,
      auth_password_hash:  None,
      max_upload_bytes:    8 * 1024 * 1024,
    }
  }
}

impl ServerConfig {
  /// Credentials, if both halves are configured.
  pub fn auth(&self) -> Option<AuthConfig> {
    match (&self.auth_username, &self.auth_password_hash) {
      (Some(username), Some(hash)) => Some(AuthConfig {
        username:      username.clone(),
        password_hash: hash.clone(),
      }),
      _ => None,
    }
  }

  pub fn links(&self) -> CardLinks {
    CardLinks::new(&self.base_url, &self.viewer_path)
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
  pub auth:   Option<Arc<AuthConfig>>,
  pub links:  CardLinks,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, config: ServerConfig) -> Self {
    Self {
      auth: config.auth().map(Arc::new),
      links: config.links(),
      config: Arc::new(config),
      store,
    }
  }

  pub fn import_options(&self) -> ImportOptions {
    ImportOptions { rekey_synthetic_ids: self.config.rekey_synthetic_ids }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      store:  Arc::clone(&self.store),
      config: Arc::clone(&self.config),
      auth:   self.auth.clone(),
      links:  self.links.clone(),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: ContactStore + 'static,
{
  let api_state = ApiState::new(Arc::clone(&state.store), state.links.clone())
    .with_options(state.import_options())
    .with_default_template(state.config.default_template);
  let api = qrcard_api::api_router(api_state).layer(
    middleware::from_fn_with_state(state.auth.clone(), auth::guard_writes),
  );
  let body_limit = state.config.max_upload_bytes;

  Router::new()
    .route("/",                    get(viewer::index::<S>))
    .route("/demo",                get(viewer::demo))
    .route("/demo/download",       get(cards::demo_download))
    .route("/generate",            post(generate::handler::<S>))
    .route("/cards/{id}/download", get(cards::download::<S>))
    .route("/cards/{id}/qr.svg",   get(cards::qr_svg::<S>))
    .nest_service("/api", api)
    .layer(DefaultBodyLimit::max(body_limit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
  };
  use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
  use chrono::Utc;
  use qrcard_core::{
    CanonicalField::*,
    ContactRecord,
    memory::MemoryStore,
    store::ContactWrite,
  };
  use qrcard_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use tower::ServiceExt as _;

  use super::*;

  const BOUNDARY: &str = "qrcard-test-boundary";
  const CSV: &str = "Name,Phone,Email\nJane Doe,555-1234,jane@x.com\n,,\nBob,,bob@x.com\n";

  fn config(password: Option<&str>) -> ServerConfig {
    let hash = password.map(|p| {
      let salt = SaltString::generate(&mut OsRng);
      Argon2::default()
        .hash_password(p.as_bytes(), &salt)
        .unwrap()
        .to_string()
    });
    ServerConfig {
      base_url: "https://cards.test".to_string(),
      auth_username: password.map(|_| "user".to_string()),
      auth_password_hash: hash,
      ..ServerConfig::default()
    }
  }

  fn memory_state(password: Option<&str>) -> AppState<MemoryStore> {
    AppState::new(Arc::new(MemoryStore::new()), config(password))
  }

  async fn seed<S: ContactStore>(state: &AppState<S>, template: TemplateKind) {
    let record = ContactRecord::from_fields([
      (Id, "E1"),
      (Name, "Jane Doe"),
      (Title, "Engineer"),
      (Phone, "555;1,234"),
    ])
    .unwrap();
    state
      .store
      .upsert(ContactWrite::new(record, template, Utc::now()))
      .await
      .unwrap();
  }

  async fn send<S: ContactStore + 'static>(
    state: &AppState<S>,
    req: Request<Body>,
  ) -> Response {
    router(state.clone()).oneshot(req).await.unwrap()
  }

  fn get_req(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
  }

  async fn text(res: Response) -> String {
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn upload(template: &str, csv: &str, auth: Option<(&str, &str)>) -> Request<Body> {
    let body = format!(
      "--{BOUNDARY}\r\n\
       Content-Disposition: form-data; name=\"template\"\r\n\r\n\
       {template}\r\n\
       --{BOUNDARY}\r\n\
       Content-Disposition: form-data; name=\"csv\"; filename=\"contacts.csv\"\r\n\
       Content-Type: text/csv\r\n\r\n\
       {csv}\r\n\
       --{BOUNDARY}--\r\n"
    );
    let mut builder = Request::post("/generate").header(
      header::CONTENT_TYPE,
      format!("multipart/form-data; boundary={BOUNDARY}"),
    );
    if let Some((user, pass)) = auth {
      builder = builder.header(header::AUTHORIZATION, basic(user, pass));
    }
    builder.body(Body::from(body)).unwrap()
  }

  fn basic(user: &str, pass: &str) -> String {
    format!("Basic {}", B64.encode(format!("{user}:{pass}")))
  }

  // ── Generator ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_without_id_serves_the_upload_form() {
    let state = memory_state(None);
    for uri in ["/", "/?id="] {
      let res = send(&state, get_req(uri)).await;
      assert_eq!(res.status(), StatusCode::OK);
      let html = text(res).await;
      assert!(html.contains("Batch VCard QR Code Generator"));
      assert!(html.contains("enctype=\"multipart/form-data\""));
    }
  }

  #[tokio::test]
  async fn upload_saves_contacts_and_shows_qr_codes() {
    let state = memory_state(None);
    let res = send(&state, upload("B", CSV, None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let html = text(res).await;
    assert!(html.contains(
      "Successfully parsed 2 contacts! (Database save skipped for local testing)"
    ));
    assert_eq!(html.matches("data:image/svg+xml;base64,").count(), 2);
    assert!(html.contains("(ID: local-3)"));
    assert_eq!(state.store.len(), 2);

    let stored = state.store.get("local-1").await.unwrap().unwrap();
    assert_eq!(stored.template, TemplateKind::B);
  }

  #[tokio::test]
  async fn upload_without_contacts_reports_status() {
    let state = memory_state(None);
    let html = text(send(&state, upload("A", "Name,Phone\n", None)).await).await;
    assert!(
      html.contains("No valid contacts found. Check file format/required columns.")
    );
    assert!(state.store.is_empty());
  }

  #[tokio::test]
  async fn upload_with_unknown_template_is_rejected() {
    let state = memory_state(None);
    let res = send(&state, upload("Q", CSV, None)).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(text(res).await.contains("Error: Invalid template selected."));
    assert!(state.store.is_empty());
  }

  // ── Viewer ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn viewer_uses_stored_template_over_query() {
    let state = memory_state(None);
    seed(&state, TemplateKind::C).await;

    let res = send(&state, get_req("/?id=E1&t=A")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let html = text(res).await;
    assert!(html.contains("Save Contact to Address Book"));
    assert!(html.contains("Jane Doe"));
    assert!(html.contains("Card ID: E1"));
    assert!(html.contains("href=\"/cards/E1/download\""));
  }

  #[tokio::test]
  async fn viewer_for_unknown_id_is_404_page() {
    let state = memory_state(None);
    let res = send(&state, get_req("/?id=ghost")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(text(res).await.contains("not found in the database"));
  }

  #[tokio::test]
  async fn demo_renders_sample_contact() {
    let state = memory_state(None);
    let html = text(send(&state, get_req("/demo?t=B")).await).await;
    assert!(html.contains("Alex R. Henderson"));
    assert!(html.contains("Download Contact"));
  }

  #[tokio::test]
  async fn demo_with_unknown_template_is_error_page() {
    let state = memory_state(None);
    let res = send(&state, get_req("/demo?t=Z")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert!(text(res).await.contains("Error: Invalid template selected."));
  }

  // ── Download / QR ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn download_serves_vcard_attachment() {
    let state = memory_state(None);
    seed(&state, TemplateKind::A).await;

    let res = send(&state, get_req("/cards/E1/download")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
      res.headers()[header::CONTENT_TYPE],
      "text/vcard; charset=utf-8"
    );
    assert_eq!(
      res.headers()[header::CONTENT_DISPOSITION],
      "attachment; filename=\"Jane_Doe.vcf\""
    );
    assert!(res.headers().contains_key(header::ETAG));

    let body = text(res).await;
    assert!(body.starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
    assert!(body.contains("N:Doe;Jane;;;"));
    assert!(body.contains("TEL;TYPE=CELL,VOICE:555\\;1\\,234"));
    assert!(body.ends_with("END:VCARD"));
  }

  #[tokio::test]
  async fn download_honours_if_none_match() {
    let state = memory_state(None);
    seed(&state, TemplateKind::A).await;

    let first = send(&state, get_req("/cards/E1/download")).await;
    let etag = first.headers()[header::ETAG].clone();

    let req = Request::get("/cards/E1/download")
      .header(header::IF_NONE_MATCH, etag.clone())
      .body(Body::empty())
      .unwrap();
    let res = send(&state, req).await;
    assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    assert_eq!(res.headers()[header::ETAG], etag);
  }

  #[tokio::test]
  async fn download_of_unknown_contact_is_404() {
    let state = memory_state(None);
    let res = send(&state, get_req("/cards/ghost/download")).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn qr_svg_for_stored_contact() {
    let state = memory_state(None);
    seed(&state, TemplateKind::B).await;

    let res = send(&state, get_req("/cards/E1/qr.svg")).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "image/svg+xml");
    assert!(text(res).await.contains("<svg"));
  }

  #[tokio::test]
  async fn demo_download_is_a_vcard() {
    let state = memory_state(None);
    let res = send(&state, get_req("/demo/download")).await;
    assert_eq!(
      res.headers()[header::CONTENT_DISPOSITION],
      "attachment; filename=\"Alex_R._Henderson.vcf\""
    );
    assert!(text(res).await.contains("ORG:Acme Tech Solutions"));
  }

  // ── Auth ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn upload_requires_credentials_when_configured() {
    let state = memory_state(Some("secret"));

    let res = send(&state, upload("A", CSV, None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(res.headers().contains_key(header::WWW_AUTHENTICATE));

    let res = send(&state, upload("A", CSV, Some(("user", "secret")))).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(state.store.len(), 2);
  }

  #[tokio::test]
  async fn viewer_stays_public_when_auth_is_configured() {
    let state = memory_state(Some("secret"));
    seed(&state, TemplateKind::A).await;
    for uri in ["/?id=E1", "/cards/E1/download", "/cards/E1/qr.svg", "/demo"] {
      let res = send(&state, get_req(uri)).await;
      assert_eq!(res.status(), StatusCode::OK, "{uri}");
    }
  }

  #[tokio::test]
  async fn api_writes_need_auth_but_reads_do_not() {
    let state = memory_state(Some("secret"));
    seed(&state, TemplateKind::A).await;

    let import = |auth: Option<&str>| {
      let mut b = Request::post("/api/import?t=B");
      if let Some(value) = auth {
        b = b.header(header::AUTHORIZATION, value);
      }
      b.body(Body::from("ID,Name\nE2,Ann\n")).unwrap()
    };

    let res = send(&state, import(None)).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(&state, import(Some(basic("user", "secret").as_str()))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let report: serde_json::Value =
      serde_json::from_str(&text(res).await).unwrap();
    assert_eq!(report["saved"][0]["url"], "https://cards.test/?id=E2&t=B");

    let res = send(&state, get_req("/api/contacts/E1")).await;
    assert_eq!(res.status(), StatusCode::OK);
  }

  // ── SQLite backend ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn sqlite_backend_reports_saved_contacts() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let state = AppState::new(Arc::new(store), config(None));

    let html = text(send(&state, upload("A", CSV, None)).await).await;
    assert!(html.contains("Successfully processed and saved 2 contacts!"));

    let html = text(send(&state, get_req("/?id=local-3")).await).await;
    assert!(html.contains("Bob"));
    assert!(html.contains("Download Contact Card"));
  }
}
