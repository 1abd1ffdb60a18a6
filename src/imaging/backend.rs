//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the post-processor
//! needs: identify and downsample-in-place. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend) — pure Rust, statically
//! linked. Tests use a recording mock so workflow logic can be exercised
//! without decoding a single pixel.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImagingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// An in-place downsample: decode `path`, resize to exactly
/// `width`×`height`, re-encode over the same file.
#[derive(Debug, Clone)]
pub struct DownsampleParams {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// JPEG quality (ignored for lossless formats).
    pub quality: u8,
}

/// Trait for image processing backends.
pub trait ImageBackend: Send + Sync {
    /// Get image dimensions without a full decode where possible.
    fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError>;

    /// Execute an in-place downsample.
    fn downsample(&self, params: &DownsampleParams) -> Result<(), ImagingError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    #[derive(Default)]
    pub struct MockBackend {
        pub identify_results: Mutex<Vec<Dimensions>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// When set, every downsample call fails with this message.
        pub fail_downsample: Option<String>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Downsample {
            path: String,
            width: u32,
            height: u32,
            quality: u8,
        },
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: Vec<Dimensions>) -> Self {
            Self {
                identify_results: Mutex::new(dims),
                ..Self::default()
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                fail_downsample: Some(message.to_string()),
                ..Self::default()
            }
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, ImagingError> {
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(path.to_string_lossy().to_string()));

            self.identify_results
                .lock()
                .unwrap()
                .pop()
                .ok_or_else(|| ImagingError::ProcessingFailed("No mock dimensions".to_string()))
        }

        fn downsample(&self, params: &DownsampleParams) -> Result<(), ImagingError> {
            self.operations.lock().unwrap().push(RecordedOp::Downsample {
                path: params.path.to_string_lossy().to_string(),
                width: params.width,
                height: params.height,
                quality: params.quality,
            });
            if let Some(message) = &self.fail_downsample {
                return Err(ImagingError::ProcessingFailed(message.clone()));
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(vec![Dimensions {
            width: 800,
            height: 600,
        }]);

        let dims = backend.identify(Path::new("/media/menu_items/1.jpg")).unwrap();
        assert_eq!(dims.width, 800);
        assert_eq!(dims.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "/media/menu_items/1.jpg"));
    }

    #[test]
    fn mock_records_downsample() {
        let backend = MockBackend::new();
        backend
            .downsample(&DownsampleParams {
                path: "/media/menu_items/1.jpg".into(),
                width: 400,
                height: 200,
                quality: 85,
            })
            .unwrap();

        let ops = backend.get_operations();
        assert!(matches!(
            &ops[0],
            RecordedOp::Downsample {
                width: 400,
                height: 200,
                quality: 85,
                ..
            }
        ));
    }

    #[test]
    fn failing_mock_surfaces_processing_error() {
        let backend = MockBackend::failing("boom");
        let err = backend
            .downsample(&DownsampleParams {
                path: "/x.jpg".into(),
                width: 1,
                height: 1,
                quality: 85,
            })
            .unwrap_err();
        assert!(matches!(err, ImagingError::ProcessingFailed(m) if m == "boom"));
    }
}
