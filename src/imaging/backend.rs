//! Image codec backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers the four operations that touch the
//! filesystem: loading an icon source's best frame, loading a photo with its
//! EXIF orientation applied, and writing PNG or WebP output. Everything
//! between load and write is pure buffer work in
//! [`compose`](super::compose), so pipelines can be exercised against a mock
//! backend that records what it was asked to do.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::params::WebpParams;
use image::{RgbImage, RgbaImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No readable frame in {}", .0.display())]
    NoReadableFrame(PathBuf),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Trait for image codec backends.
pub trait ImageBackend {
    /// Decode every frame of `path` and return the best one as RGBA.
    fn load_best_frame(&self, path: &Path) -> Result<RgbaImage, BackendError>;

    /// Decode a photo, apply its EXIF orientation, and convert to RGB.
    fn load_photo(&self, path: &Path) -> Result<RgbImage, BackendError>;

    /// Write a lossless, maximally compressed PNG.
    fn write_png(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError>;

    /// Write a lossy WebP.
    fn write_webp(
        &self,
        image: &RgbaImage,
        path: &Path,
        params: &WebpParams,
    ) -> Result<(), BackendError>;
}
