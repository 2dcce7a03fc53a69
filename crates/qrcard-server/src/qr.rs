//! QR images for card URLs.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use qrcode::{EcLevel, QrCode, render::svg, types::QrError};

/// Foreground colour of every generated code.
pub const DARK: &str = "#1f2937";
pub const LIGHT: &str = "#ffffff";
/// Minimum rendered edge length in pixels.
pub const MIN_SIZE: u32 = 120;

/// Render `url` as an SVG QR code with high error correction.
pub fn render_svg(url: &str) -> Result<String, QrError> {
  let code = QrCode::with_error_correction_level(url.as_bytes(), EcLevel::H)?;

  Ok(
    code
      .render()
      .min_dimensions(MIN_SIZE, MIN_SIZE)
      .dark_color(svg::Color(DARK))
      .light_color(svg::Color(LIGHT))
      .build(),
  )
}

/// Render `url` as a `data:image/svg+xml;base64,…` URL for inline `<img>`s.
pub fn data_url(url: &str) -> Result<String, QrError> {
  let svg = render_svg(url)?;
  Ok(format!("data:image/svg+xml;base64,{}", BASE64.encode(svg.as_bytes())))
}
