//! HTTP Basic auth for write endpoints.
//!
//! Auth is optional: with no credentials configured every endpoint is open.
//! Reads (viewer, downloads, QR images, `GET /api/...`) are always public.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  extract::{FromRequestParts, Request, State},
  http::{HeaderMap, Method, request::Parts},
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use qrcard_core::store::ContactStore;

use crate::{AppState, error::Error};

/// Credentials accepted as valid for this server instance.
#[derive(Debug, Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

/// Present in a handler's arguments means the request may write.
pub struct Authenticated;

/// Verify Basic credentials in `headers` against `config`.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Error> {
  let header_val = headers
    .get(axum::http::header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(Error::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| Error::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| Error::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(Error::Unauthorized)?;

  if username != config.username {
    return Err(Error::Unauthorized);
  }

  let parsed_hash = PasswordHash::new(&config.password_hash)
    .map_err(|_| Error::Unauthorized)?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| Error::Unauthorized)?;

  Ok(())
}

impl<S> FromRequestParts<AppState<S>> for Authenticated
where
  S: ContactStore + 'static,
{
  type Rejection = Error;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    if let Some(auth) = &state.auth {
      verify_auth(&parts.headers, auth)?;
    }
    Ok(Authenticated)
  }
}

/// Middleware for the nested API router: anything but `GET`/`HEAD` needs
/// credentials when auth is configured.
pub async fn guard_writes(
  State(auth): State<Option<Arc<AuthConfig>>>,
  req: Request,
  next: Next,
) -> Response {
  let is_read = matches!(*req.method(), Method::GET | Method::HEAD);
  if let Some(auth) = &auth
    && !is_read
    && let Err(e) = verify_auth(req.headers(), auth)
  {
    return e.into_response();
  }
  next.run(req).await
}

#[cfg(test)]
mod tests {
  use argon2::{PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, header},
  };
  use qrcard_core::memory::MemoryStore;
  use rand_core::OsRng;

  use super::*;
  use crate::ServerConfig;

  fn hash(password: &str) -> String {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string()
  }

  fn make_state(password: Option<&str>) -> AppState<MemoryStore> {
    let config = ServerConfig {
      auth_username:      password.map(|_| "user".to_string()),
      auth_password_hash: password.map(hash),
      ..ServerConfig::default()
    };
    AppState::new(Arc::new(MemoryStore::new()), config)
  }

  async fn extract(
    req: Request<Body>,
    state: &AppState<MemoryStore>,
  ) -> Result<Authenticated, Error> {
    let (mut parts, _) = req.into_parts();
    Authenticated::from_request_parts(&mut parts, state).await
  }

  fn basic(user: &str, pass: &str) -> String {
    let encoded = B64.encode(format!("{user}:{pass}"));
    format!("Basic {encoded}")
  }

  #[tokio::test]
  async fn correct_credentials() {
    let state = make_state(Some("secret"));
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("user", "secret"))
      .body(Body::empty())
      .unwrap();
    assert!(extract(req, &state).await.is_ok());
  }

  #[tokio::test]
  async fn wrong_password() {
    let state = make_state(Some("secret"));
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("user", "wrong"))
      .body(Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn wrong_username() {
    let state = make_state(Some("secret"));
    let req = Request::builder()
      .header(header::AUTHORIZATION, basic("admin", "secret"))
      .body(Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn missing_header() {
    let state = make_state(Some("secret"));
    let req = Request::builder().body(Body::empty()).unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn invalid_base64() {
    let state = make_state(Some("secret"));
    let req = Request::builder()
      .header(header::AUTHORIZATION, "Basic !!!not-base64!!!")
      .body(Body::empty())
      .unwrap();
    assert!(matches!(extract(req, &state).await, Err(Error::Unauthorized)));
  }

  #[tokio::test]
  async fn no_configured_credentials_means_open() {
    let state = make_state(None);
    let req = Request::builder().body(Body::empty()).unwrap();
    assert!(extract(req, &state).await.is_ok());
  }
}
