//! The after-save downsampling rule for menu item photos.
//!
//! Runs only once the owning record is durably persisted, so the asset
//! path is known. If either dimension exceeds the configured edge the
//! image is downsampled in place so the longer side fits; otherwise the
//! file is left byte-identical.

use super::backend::{DownsampleParams, ImageBackend, ImagingError};
use super::calculations::fit_within;
use std::path::Path;

/// Limits applied to stored menu photos.
#[derive(Debug, Clone, Copy)]
pub struct DownsampleConfig {
    /// Longest allowed edge in pixels.
    pub max_edge: u32,
    /// Re-encode quality for lossy formats.
    pub quality: u8,
}

impl Default for DownsampleConfig {
    fn default() -> Self {
        Self {
            max_edge: 400,
            quality: 85,
        }
    }
}

/// What the post-processor did to the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Both edges were already within bounds; the file was not touched.
    Unchanged,
    /// Downsampled in place to the given dimensions.
    Resized { width: u32, height: u32 },
}

/// Apply the downsampling rule to the asset at `path`.
pub fn shrink_to_fit(
    backend: &impl ImageBackend,
    path: &Path,
    config: &DownsampleConfig,
) -> Result<Outcome, ImagingError> {
    let dims = backend.identify(path)?;
    match fit_within((dims.width, dims.height), config.max_edge) {
        None => Ok(Outcome::Unchanged),
        Some((width, height)) => {
            backend.downsample(&DownsampleParams {
                path: path.to_path_buf(),
                width,
                height,
                quality: config.quality,
            })?;
            Ok(Outcome::Resized { width, height })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Dimensions;
    use crate::imaging::backend::tests::{MockBackend, RecordedOp};

    #[test]
    fn oversized_image_is_downsampled() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 1000,
            height: 500,
        }]);

        let outcome = shrink_to_fit(
            &backend,
            Path::new("/media/menu_items/1.jpg"),
            &DownsampleConfig::default(),
        )
        .unwrap();
        assert_eq!(
            outcome,
            Outcome::Resized {
                width: 400,
                height: 200
            }
        );

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(
            &ops[1],
            RecordedOp::Downsample {
                width: 400,
                height: 200,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn within_bounds_image_is_untouched() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 300,
            height: 200,
        }]);

        let outcome = shrink_to_fit(
            &backend,
            Path::new("/media/menu_items/2.jpg"),
            &DownsampleConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);

        // Identify only — no write operation recorded.
        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(_)));
    }

    #[test]
    fn backend_failure_surfaces() {
        let mut backend = MockBackend::failing("decode exploded");
        backend.identify_results = std::sync::Mutex::new(vec![Dimensions {
            width: 900,
            height: 900,
        }]);

        let err = shrink_to_fit(
            &backend,
            Path::new("/media/menu_items/3.jpg"),
            &DownsampleConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ImagingError::ProcessingFailed(_)));
    }

    #[test]
    fn custom_edge_is_respected() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 500,
            height: 300,
        }]);
        let config = DownsampleConfig {
            max_edge: 200,
            quality: 70,
        };

        let outcome = shrink_to_fit(&backend, Path::new("/p.jpg"), &config).unwrap();
        assert_eq!(
            outcome,
            Outcome::Resized {
                width: 200,
                height: 120
            }
        );
    }
}
