//! Route handlers.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Profile page with `?id=`, upload form without |
//! | `GET`  | `/demo` | Profile page for the sample contact, `?t=` picks the layout |
//! | `GET`  | `/demo/download` | vCard of the sample contact |
//! | `POST` | `/generate` | Multipart upload; auth |
//! | `GET`  | `/cards/:id/download` | vCard attachment with ETag |
//! | `GET`  | `/cards/:id/qr.svg` | QR code linking to the profile page |

pub mod cards;
pub mod generate;
pub mod viewer;

use qrcard_core::store::{ContactStore, StoredContact};

use crate::{AppState, error::Error};

/// Fetch a stored contact or fail with [`Error::ContactNotFound`].
async fn load<S>(state: &AppState<S>, id: &str) -> Result<StoredContact, Error>
where
  S: ContactStore,
{
  state
    .store
    .get(id)
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::ContactNotFound(id.to_owned()))
}

/// Where the profile page for `id` links its download button.
pub fn download_path(id: &str) -> String {
  format!("/cards/{}/download", urlencoding::encode(id))
}
