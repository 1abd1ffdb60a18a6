//! Pure Rust image processing backend.
//!
//! Decoding and encoding go through the `image` crate's pure-Rust codecs;
//! only JPEG and PNG are compiled in, matching what the admin form accepts.
//! The downsample re-encodes with Lanczos3 resampling, JPEG quality as
//! requested, and best-compression PNG — the "size optimization" the menu
//! photos want.

use super::backend::{Dimensions, DownsampleParams, ImageBackend, ImagingError};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Extensions with a compiled-in decoder and encoder.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// True if the path carries an extension this backend can process.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

/// Pure Rust backend using the `image` crate.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn load_image(path: &Path) -> Result<DynamicImage, ImagingError> {
    ImageReader::open(path)
        .map_err(ImagingError::Io)?
        .decode()
        .map_err(|e| {
            ImagingError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
        })
}

/// Re-encode over the original path, format chosen by extension.
fn save_image(img: &DynamicImage, path: &Path, quality: u8) -> Result<(), ImagingError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let file = std::fs::File::create(path).map_err(ImagingError::Io)?;
    let writer = std::io::BufWriter::new(file);

    match ext.as_str() {
        "jpg" | "jpeg" => {
            let encoder = JpegEncoder::new_with_quality(writer, quality);
            img.write_with_encoder(encoder).map_err(|e| {
                ImagingError::ProcessingFailed(format!("JPEG encode failed: {}", e))
            })
        }
        "png" => {
            let encoder =
                PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
            img.write_with_encoder(encoder)
                .map_err(|e| ImagingError::ProcessingFailed(format!("PNG encode failed: {}", e)))
        }
        other => Err(ImagingError::ProcessingFailed(format!(
            "Unsupported image format: {}",
            other
        ))),
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            ImagingError::ProcessingFailed(format!("Failed to read dimensions: {}", e))
        })?;
        Ok(Dimensions { width, height })
    }

    fn downsample(&self, params: &DownsampleParams) -> Result<(), ImagingError> {
        // The image is fully decoded before the file is reopened for
        // writing, so overwriting in place is safe.
        let img = load_image(&params.path)?;
        let resized = img.resize(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.path, params.quality)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::create_test_jpeg;

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dish.jpg");
        create_test_jpeg(&path, 200, 150);

        let backend = RustBackend::new();
        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 200);
        assert_eq!(dims.height, 150);
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let backend = RustBackend::new();
        assert!(backend.identify(Path::new("/nonexistent/dish.jpg")).is_err());
    }

    #[test]
    fn downsample_overwrites_in_place() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dish.jpg");
        create_test_jpeg(&path, 800, 600);

        let backend = RustBackend::new();
        backend
            .downsample(&DownsampleParams {
                path: path.clone(),
                width: 400,
                height: 300,
                quality: 85,
            })
            .unwrap();

        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 400);
        assert_eq!(dims.height, 300);
    }

    #[test]
    fn downsample_png_input() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("dish.png");
        let img = image::RgbImage::from_fn(600, 500, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        img.save(&path).unwrap();

        let backend = RustBackend::new();
        backend
            .downsample(&DownsampleParams {
                path: path.clone(),
                width: 300,
                height: 250,
                quality: 85,
            })
            .unwrap();

        let dims = backend.identify(&path).unwrap();
        assert_eq!(dims.width, 300);
        assert_eq!(dims.height, 250);
    }

    #[test]
    fn unsupported_extension_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let source = tmp.path().join("dish.jpg");
        create_test_jpeg(&source, 100, 100);
        let bmp = tmp.path().join("dish.bmp");
        std::fs::copy(&source, &bmp).unwrap();

        let backend = RustBackend::new();
        let result = backend.downsample(&DownsampleParams {
            path: bmp,
            width: 50,
            height: 50,
            quality: 85,
        });
        assert!(result.is_err());
    }

    #[test]
    fn supported_extension_check() {
        assert!(is_supported(Path::new("a.jpg")));
        assert!(is_supported(Path::new("a.JPEG")));
        assert!(is_supported(Path::new("a.png")));
        assert!(!is_supported(Path::new("a.gif")));
        assert!(!is_supported(Path::new("noext")));
    }
}
