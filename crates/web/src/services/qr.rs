//! QR code generation for public card URLs.
//!
//! Thin wrapper around the `qrcode` encoder: the payload is rendered as an
//! SVG and returned as a base64 data URL suitable for an `<img src=...>`
//! attribute. Encoding internals stay inside the library.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use qrcode::render::svg;
use qrcode::{EcLevel, QrCode};
use thiserror::Error;

/// Errors from QR generation.
#[derive(Debug, Error)]
pub enum QrError {
    /// The payload could not be encoded (too long for the EC level).
    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
}

/// Rendering options for a QR data URL.
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Minimum rendered width/height in pixels.
    pub width: u32,
    /// Quiet-zone margin; 0 disables the quiet zone entirely.
    pub margin: u32,
    /// Foreground (module) color.
    pub dark_color: String,
    /// Background color.
    pub light_color: String,
    /// Error correction level.
    pub ec_level: EcLevel,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            width: 256,
            margin: 2,
            dark_color: "#000000".to_owned(),
            light_color: "#FFFFFF".to_owned(),
            ec_level: EcLevel::M,
        }
    }
}

/// Encode `payload` as a QR code and return it as an SVG data URL.
///
/// # Errors
///
/// Returns `QrError::Encode` if the payload doesn't fit a QR code at the
/// requested error correction level.
pub fn to_data_url(payload: &str, options: &QrOptions) -> Result<String, QrError> {
    let code = QrCode::with_error_correction_level(payload, options.ec_level)?;

    let image = code
        .render::<svg::Color<'_>>()
        .min_dimensions(options.width, options.width)
        .quiet_zone(options.margin > 0)
        .dark_color(svg::Color(&options.dark_color))
        .light_color(svg::Color(&options.light_color))
        .build();

    Ok(format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(image)
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url_shape() {
        let url = to_data_url("https://tapryt.example/cards/alice-smith", &QrOptions::default())
            .unwrap();
        assert!(url.starts_with("data:image/svg+xml;base64,"));

        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let decoded = STANDARD.decode(encoded).unwrap();
        let svg = String::from_utf8(decoded).unwrap();
        assert!(svg.contains("<svg"));
    }

    #[test]
    fn test_colors_appear_in_svg() {
        let options = QrOptions {
            dark_color: "#112233".to_owned(),
            light_color: "#FFEEDD".to_owned(),
            ..QrOptions::default()
        };
        let url = to_data_url("hello", &options).unwrap();
        let encoded = url.trim_start_matches("data:image/svg+xml;base64,");
        let svg = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert!(svg.contains("#112233"));
        assert!(svg.contains("#FFEEDD"));
    }

    #[test]
    fn test_oversized_payload_fails() {
        // QR version 40 tops out under 3000 bytes at EC level H
        let payload = "x".repeat(8000);
        let options = QrOptions {
            ec_level: EcLevel::H,
            ..QrOptions::default()
        };
        assert!(to_data_url(&payload, &options).is_err());
    }
}
