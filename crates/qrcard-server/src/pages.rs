//! HTML pages, rendered with askama.
//!
//! Every interpolated value is HTML-escaped by the template engine.

use askama::Template;
use qrcard_api::{BatchReport, BatchStatus, batch::FailedWrite};
use qrcard_core::{ContactRecord, TemplateKind};
use strum::IntoEnumIterator as _;

use crate::{Error, qr};

const NA: &str = "N/A";

// ─── Generator ───────────────────────────────────────────────────────────────

pub struct TemplateOption {
  pub tag:      &'static str,
  pub label:    &'static str,
  pub selected: bool,
}

/// One QR code in the results grid.
pub struct QrTile {
  /// Name, or `Contact <n>` for nameless contacts.
  pub label: String,
  pub id:    String,
  pub url:   String,
  /// `data:` URL of the SVG image.
  pub qr:    String,
}

pub struct Outcome {
  pub message:      String,
  /// Tailwind text colour for `message`.
  pub status_class: &'static str,
  pub tiles:        Vec<QrTile>,
  pub failed:       Vec<FailedWrite>,
  pub skipped:      usize,
}

impl Outcome {
  pub fn from_report(report: BatchReport) -> Result<Self, Error> {
    let status_class = match report.status {
      BatchStatus::Imported => "text-green-600",
      BatchStatus::NoValidContacts | BatchStatus::NothingSaved => "text-red-500",
    };
    let message = report.message();

    let tiles = report
      .saved
      .into_iter()
      .enumerate()
      .map(|(i, saved)| {
        Ok(QrTile {
          label: saved
            .record
            .name()
            .map_or_else(|| format!("Contact {}", i + 1), str::to_owned),
          qr:    qr::data_url(&saved.url)?,
          id:    saved.id,
          url:   saved.url,
        })
      })
      .collect::<Result<Vec<_>, Error>>()?;

    Ok(Self {
      message,
      status_class,
      tiles,
      failed: report.failed,
      skipped: report.skipped.len(),
    })
  }
}

/// The upload form, optionally followed by the outcome of an upload.
#[derive(Template)]
#[template(path = "generator.html")]
pub struct GeneratorPage {
  pub options:       Vec<TemplateOption>,
  pub auth_required: bool,
  pub outcome:       Option<Outcome>,
}

impl GeneratorPage {
  pub fn new(selected: TemplateKind, auth_required: bool) -> Self {
    let options = TemplateKind::iter()
      .map(|kind| TemplateOption {
        tag:      kind.as_str(),
        label:    kind.label(),
        selected: kind == selected,
      })
      .collect();
    Self { options, auth_required, outcome: None }
  }

  pub fn with_outcome(mut self, outcome: Outcome) -> Self {
    self.outcome = Some(outcome);
    self
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// What a profile page shows about one contact.
#[derive(Debug, Clone)]
pub struct ProfileView {
  pub id:                String,
  pub record:            ContactRecord,
  pub download_url:      String,
  pub download_filename: String,
}

impl ProfileView {
  pub fn new(id: &str, record: ContactRecord, download_url: String) -> Self {
    let download_filename = qrcard_vcard::download_filename(&record);
    Self { id: id.to_owned(), record, download_url, download_filename }
  }

  pub fn name(&self) -> &str { self.record.name().unwrap_or(NA) }

  pub fn phone(&self) -> &str { self.record.phone().unwrap_or(NA) }

  pub fn email(&self) -> &str { self.record.email().unwrap_or(NA) }

  pub fn title_or<'a>(&'a self, fallback: &'a str) -> &'a str {
    self.record.title().unwrap_or(fallback)
  }

  pub fn organization_or<'a>(&'a self, fallback: &'a str) -> &'a str {
    self.record.organization().unwrap_or(fallback)
  }

  pub fn banner(&self) -> &str { self.organization_or("Business Contact") }

  /// First character of the name, `C` without one.
  pub fn avatar(&self) -> String { initial(self.record.name(), 'C') }

  /// First character of the organization, `O` without one.
  pub fn organization_avatar(&self) -> String {
    initial(self.record.organization(), 'O')
  }
}

fn initial(value: Option<&str>, fallback: char) -> String {
  value
    .and_then(|v| v.chars().next())
    .unwrap_or(fallback)
    .to_string()
}

#[derive(Template)]
#[template(path = "profile_a.html")]
struct ProfileA<'a> {
  view: &'a ProfileView,
}

#[derive(Template)]
#[template(path = "profile_b.html")]
struct ProfileB<'a> {
  view: &'a ProfileView,
}

#[derive(Template)]
#[template(path = "profile_c.html")]
struct ProfileC<'a> {
  view: &'a ProfileView,
}

/// Render `view` with the layout for `kind`.
pub fn render_profile(
  kind: TemplateKind,
  view: &ProfileView,
) -> askama::Result<String> {
  match kind {
    TemplateKind::A => ProfileA { view }.render(),
    TemplateKind::B => ProfileB { view }.render(),
    TemplateKind::C => ProfileC { view }.render(),
  }
}

// ─── Error ───────────────────────────────────────────────────────────────────

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
  pub message: &'a str,
}

// ─── Sample contact ──────────────────────────────────────────────────────────

/// The contact shown by `/demo`.
pub fn sample_contact(id: &str) -> Result<ContactRecord, Error> {
  use qrcard_core::CanonicalField::*;
  Ok(ContactRecord::from_fields([
    (Id, id),
    (Name, "Alex R. Henderson"),
    (Title, "Lead Software Architect"),
    (Organization, "Acme Tech Solutions"),
    (Phone, "+1 (555) 123-4567"),
    (Email, "alex.henderson@acmetech.com"),
  ])?)
}
