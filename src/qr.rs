//! QR code generation for the public menu URL.
//!
//! Pure function, no persistent state: the URL goes in, a self-contained
//! `data:` URI comes out, ready for inline embedding without a separate
//! fetch. Output is deterministic for a given URL and encoder version.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Luma};
use qrcode::QrCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum QrError {
    /// The symbol encoder rejected the input (pathologically long URLs).
    #[error("QR encoding failed: {0}")]
    Symbol(#[from] qrcode::types::QrError),
    #[error("PNG encode failed: {0}")]
    Png(String),
}

/// Pixels per QR module in the rendered raster.
const MODULE_SIZE: u32 = 10;

/// Encode `url` as a black-on-white QR PNG and return it as a base64 data URI.
///
/// The symbol version is the minimal one that fits the payload; the
/// renderer keeps the standard quiet-zone border.
pub fn data_uri(url: &str) -> Result<String, QrError> {
    let code = QrCode::new(url.as_bytes())?;
    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_SIZE, MODULE_SIZE)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ExtendedColorType::L8,
        )
        .map_err(|e| QrError::Png(e.to_string()))?;

    Ok(format!("data:image/png;base64,{}", BASE64.encode(&png)))
}
