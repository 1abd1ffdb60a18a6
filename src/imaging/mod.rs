//! Image post-processing — pure Rust, zero external dependencies.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | `image::DynamicImage::resize` (Lanczos3) |
//! | **Re-encode JPEG** | `JpegEncoder::new_with_quality` |
//! | **Re-encode PNG** | `PngEncoder` with best compression |
//!
//! The module is split into:
//! - **Calculations**: pure dimension math (unit testable)
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Postprocess**: the after-save downsampling rule applied to menu
//!   item photos

pub mod backend;
mod calculations;
pub mod postprocess;
pub mod rust_backend;

pub use backend::{Dimensions, DownsampleParams, ImageBackend, ImagingError};
pub use postprocess::{DownsampleConfig, Outcome, shrink_to_fit};
pub use rust_backend::RustBackend;
