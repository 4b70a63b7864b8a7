// SPDX-FileCopyrightText: 2026 Civiq Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base64 image decoding with data-URL stripping and raster validation.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::GenericImageView;

use civiq_core::{CiviqError, TransportImage};

/// A successfully decoded and validated raster image.
///
/// Holds the decoded container bytes verbatim alongside the metadata
/// extracted during validation.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    bytes: Vec<u8>,
    mime_type: &'static str,
    width: u32,
    height: u32,
}

impl DecodedImage {
    /// MIME type detected from the image container.
    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    /// Pixel width.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Pixel height.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw container bytes, exactly as decoded from the payload.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Re-package for the classification call, consuming the image.
    pub fn into_transport(self) -> TransportImage {
        TransportImage {
            data: self.bytes,
            mime_type: self.mime_type.to_string(),
        }
    }
}

/// Decode a base64 image payload into a validated raster image.
///
/// When the input contains a comma, everything up to and including the
/// first comma is treated as data-URL framing and discarded; the prefix
/// itself is not validated. Malformed base64, or bytes that do not parse as
/// a supported raster image, fail with [`CiviqError::InvalidImage`] carrying
/// the underlying cause.
pub fn decode(encoded: &str) -> Result<DecodedImage, CiviqError> {
    let payload = strip_data_url(encoded);

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| CiviqError::InvalidImage {
            source: Box::new(e),
        })?;

    let format = image::guess_format(&bytes).map_err(|e| CiviqError::InvalidImage {
        source: Box::new(e),
    })?;

    let parsed =
        image::load_from_memory_with_format(&bytes, format).map_err(|e| {
            CiviqError::InvalidImage {
                source: Box::new(e),
            }
        })?;

    let (width, height) = parsed.dimensions();
    tracing::debug!(
        mime = format.to_mime_type(),
        width,
        height,
        "image payload decoded"
    );

    Ok(DecodedImage {
        bytes,
        mime_type: format.to_mime_type(),
        width,
        height,
    })
}

/// Strip data-URL framing: keep only the suffix after the first comma.
fn strip_data_url(encoded: &str) -> &str {
    match encoded.find(',') {
        Some(idx) => &encoded[idx + 1..],
        None => encoded,
    }
}
