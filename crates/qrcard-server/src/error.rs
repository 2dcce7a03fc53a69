//! Error types and axum `IntoResponse` implementation.
//!
//! Browser-facing failures render the HTML error page; the rest are plain
//! text.

use askama::Template as _;
use axum::{
  http::{HeaderValue, StatusCode, header},
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::pages::ErrorPage;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("Error: Contact with ID \"{0}\" not found in the database.")]
  ContactNotFound(String),
  #[error("Error: Invalid template selected.")]
  UnknownTemplate(String),
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error("vcard error: {0}")]
  Vcard(#[from] qrcard_vcard::Error),
  #[error("qr error: {0}")]
  Qr(#[from] qrcode::types::QrError),
  #[error("render error: {0}")]
  Render(#[from] askama::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Store(Box::new(e))
  }

  fn status(&self) -> StatusCode {
    match self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::ContactNotFound(_) => StatusCode::NOT_FOUND,
      Error::UnknownTemplate(_) | Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Vcard(_) | Error::Qr(_) | Error::Render(_) | Error::Store(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl From<qrcard_core::Error> for Error {
  fn from(e: qrcard_core::Error) -> Self {
    match e {
      qrcard_core::Error::UnknownTemplate(tag) => Error::UnknownTemplate(tag),
      other => Error::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    match self {
      Error::Unauthorized => {
        let mut res =
          (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        res.headers_mut().insert(
          header::WWW_AUTHENTICATE,
          HeaderValue::from_static("Basic realm=\"qrcard\""),
        );
        res
      }
      Error::ContactNotFound(_) | Error::UnknownTemplate(_) => {
        let message = self.to_string();
        match (ErrorPage { message: &message }).render() {
          Ok(html) => (status, Html(html)).into_response(),
          Err(_) => (status, message).into_response(),
        }
      }
      other => {
        if status.is_server_error() {
          tracing::error!(error = %other, "request failed");
        }
        (status, other.to_string()).into_response()
      }
    }
  }
}
