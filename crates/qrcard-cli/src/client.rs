//! Async HTTP client for a qrcard server's JSON API.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use qrcard_api::BatchStatus;
use qrcard_core::TemplateKind;
use reqwest::Client;
use serde::Deserialize;

/// Connection settings for the qrcard API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// The parts of the server's import report the CLI prints.
#[derive(Debug, Deserialize)]
pub struct UploadReport {
  pub status:  BatchStatus,
  pub found:   usize,
  #[serde(default)]
  pub skipped: Vec<serde_json::Value>,
  pub saved:   Vec<UploadedCard>,
  pub failed:  Vec<FailedUpload>,
  pub durable: bool,
}

#[derive(Debug, Deserialize)]
pub struct UploadedCard {
  pub id:   String,
  pub name: String,
  pub line: usize,
  pub url:  String,
}

#[derive(Debug, Deserialize)]
pub struct FailedUpload {
  pub id:    String,
  pub line:  usize,
  pub error: String,
}

/// Cheap to clone: the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// `POST /api/import?t=<template>` with `csv` as the body.
  pub async fn import(
    &self,
    csv: String,
    template: TemplateKind,
  ) -> Result<UploadReport> {
    let resp = self
      .auth(self.client.post(self.url("/import")))
      .query(&[("t", template.as_str())])
      .header(reqwest::header::CONTENT_TYPE, "text/csv; charset=utf-8")
      .body(csv)
      .send()
      .await
      .context("POST /import failed")?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(anyhow!("POST /import → {status}: {body}"));
    }
    resp.json().await.context("deserialising import report")
  }
}
