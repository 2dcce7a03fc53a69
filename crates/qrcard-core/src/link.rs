//! Card URLs: the links encoded into QR codes.

use serde::{Deserialize, Serialize};

use crate::template::TemplateKind;

/// Where the profile page is served from: `<origin><path>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardLinks {
  origin: String,
  path:   String,
}

impl CardLinks {
  /// `origin` is scheme + authority (`https://cards.example.com`); a trailing
  /// slash is dropped. `path` gets a leading slash if it lacks one.
  pub fn new(origin: impl Into<String>, path: impl Into<String>) -> Self {
    let origin = origin.into().trim_end_matches('/').to_owned();
    let path = path.into();
    let path = if path.starts_with('/') { path } else { format!("/{path}") };
    Self { origin, path }
  }

  pub fn origin(&self) -> &str { &self.origin }

  pub fn path(&self) -> &str { &self.path }

  /// The viewer URL for contact `id` rendered with `template`, or `None`
  /// when `id` is blank.
  pub fn card_url(&self, id: &str, template: TemplateKind) -> Option<String> {
    if id.trim().is_empty() {
      return None;
    }
    Some(format!(
      "{}{}?id={}&t={}",
      self.origin,
      self.path,
      urlencoding::encode(id),
      template
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn builds_viewer_url() {
    let links = CardLinks::new("https://cards.example.com/", "/");
    assert_eq!(
      links.card_url("local-3", TemplateKind::B).as_deref(),
      Some("https://cards.example.com/?id=local-3&t=B")
    );
  }

  #[test]
  fn id_is_url_encoded() {
    let links = CardLinks::new("http://localhost:8080", "view");
    assert_eq!(
      links.card_url("a b&c", TemplateKind::A).as_deref(),
      Some("http://localhost:8080/view?id=a%20b%26c&t=A")
    );
  }

  #[test]
  fn blank_id_has_no_url() {
    let links = CardLinks::new("http://localhost", "/");
    assert_eq!(links.card_url("", TemplateKind::A), None);
    assert_eq!(links.card_url("  ", TemplateKind::A), None);
  }
}
