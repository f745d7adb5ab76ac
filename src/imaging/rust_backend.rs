//! Pure Rust decoding with libwebp for lossy output.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, WebP) | `image` crate (pure Rust decoders) |
//! | Decode (ICO, every entry) | `ico` crate, via [`frames`](super::frames) |
//! | EXIF orientation | `ImageDecoder::orientation` + `DynamicImage::apply_orientation` |
//! | Encode → PNG | `image::codecs::png::PngEncoder` (best compression, adaptive filter) |
//! | Encode → WebP | `webp::Encoder::encode_advanced` (lossy, method 6, exact) |

use super::backend::{BackendError, ImageBackend};
use super::frames::read_best_frame;
use super::params::WebpParams;
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ImageDecoder, ImageReader, RgbImage, RgbaImage};
use std::path::Path;

/// Photo extensions accepted by the carousel pipeline (matched case-insensitively).
pub const PHOTO_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Whether `path` carries one of the [`PHOTO_EXTENSIONS`].
pub fn is_supported_photo(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            PHOTO_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Production backend.
///
/// See the [module docs](self) for the crate-to-operation mapping.
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

fn decode_failed(path: &Path, e: image::ImageError) -> BackendError {
    BackendError::ProcessingFailed(format!("Failed to decode {}: {}", path.display(), e))
}

/// Decode a photo and rotate/flip it upright according to its EXIF tag.
fn load_oriented(path: &Path) -> Result<DynamicImage, BackendError> {
    let reader = ImageReader::open(path)
        .map_err(BackendError::Io)?
        .with_guessed_format()
        .map_err(BackendError::Io)?;
    let mut decoder = reader.into_decoder().map_err(|e| decode_failed(path, e))?;
    let orientation = decoder.orientation().map_err(|e| decode_failed(path, e))?;
    let mut img = DynamicImage::from_decoder(decoder).map_err(|e| decode_failed(path, e))?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Encode and save as PNG with the slowest, smallest settings.
fn save_png(img: &RgbaImage, path: &Path) -> Result<(), BackendError> {
    let file = std::fs::File::create(path).map_err(BackendError::Io)?;
    let writer = std::io::BufWriter::new(file);
    let encoder = PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    img.write_with_encoder(encoder)
        .map_err(|e| BackendError::ProcessingFailed(format!("PNG encode failed: {}", e)))
}

/// Encode and save as lossy WebP.
///
/// `exact` keeps RGB values under fully transparent pixels instead of letting
/// libwebp rewrite them, so masked corners hold the canvas color.
fn save_webp(img: &RgbaImage, path: &Path, params: &WebpParams) -> Result<(), BackendError> {
    let encoder = webp::Encoder::from_rgba(img.as_raw(), img.width(), img.height());
    let mut config = webp::WebPConfig::new().map_err(|_| {
        BackendError::ProcessingFailed("Failed to initialise WebP encoder config".into())
    })?;
    config.lossless = 0;
    config.quality = params.quality.value() as f32;
    config.method = params.method as i32;
    config.exact = 1;

    let encoded = encoder
        .encode_advanced(&config)
        .map_err(|e| BackendError::ProcessingFailed(format!("WebP encode failed: {:?}", e)))?;
    std::fs::write(path, &*encoded).map_err(BackendError::Io)
}

impl ImageBackend for RustBackend {
    fn load_best_frame(&self, path: &Path) -> Result<RgbaImage, BackendError> {
        read_best_frame(path)
    }

    fn load_photo(&self, path: &Path) -> Result<RgbImage, BackendError> {
        Ok(load_oriented(path)?.to_rgb8())
    }

    fn write_png(&self, image: &RgbaImage, path: &Path) -> Result<(), BackendError> {
        save_png(image, path)
    }

    fn write_webp(
        &self,
        image: &RgbaImage,
        path: &Path,
        params: &WebpParams,
    ) -> Result<(), BackendError> {
        save_webp(image, path, params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::test_helpers::{create_test_jpeg, create_test_jpeg_with_orientation, create_test_png};
    use image::Rgba;

    #[test]
    fn supported_photo_extensions_are_case_insensitive() {
        for name in ["a.jpg", "a.JPG", "a.jpeg", "a.Jpeg", "a.png", "a.PNG", "a.webp", "a.WebP"] {
            assert!(is_supported_photo(Path::new(name)), "{name}");
        }
        for name in ["a.gif", "a.tiff", "a.txt", "a", "jpg"] {
            assert!(!is_supported_photo(Path::new(name)), "{name}");
        }
    }

    #[test]
    fn load_photo_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        create_test_jpeg(&path, 200, 150);

        let photo = RustBackend::new().load_photo(&path).unwrap();
        assert_eq!(photo.dimensions(), (200, 150));
    }

    #[test]
    fn load_photo_applies_exif_rotation() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("sideways.jpg");
        // 6 = rotate 90° clockwise to display upright
        create_test_jpeg_with_orientation(&path, 40, 20, 6);

        let photo = RustBackend::new().load_photo(&path).unwrap();
        assert_eq!(photo.dimensions(), (20, 40));
    }

    #[test]
    fn load_photo_upright_exif_keeps_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("upright.jpg");
        create_test_jpeg_with_orientation(&path, 40, 20, 1);

        let photo = RustBackend::new().load_photo(&path).unwrap();
        assert_eq!(photo.dimensions(), (40, 20));
    }

    #[test]
    fn load_photo_drops_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.png");
        create_test_png(&path, 40, 30);

        let photo = RustBackend::new().load_photo(&path).unwrap();
        assert_eq!(photo.dimensions(), (40, 30));
    }

    #[test]
    fn load_photo_nonexistent_errors() {
        let result = RustBackend::new().load_photo(Path::new("/nonexistent/photo.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn load_photo_garbage_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("photo.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        assert!(RustBackend::new().load_photo(&path).is_err());
    }

    #[test]
    fn write_png_roundtrips_dimensions_and_alpha() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("icon.png");
        let mut img = RgbaImage::from_pixel(48, 48, Rgba([10, 20, 30, 255]));
        img.put_pixel(0, 0, Rgba([0, 0, 0, 0]));

        RustBackend::new().write_png(&img, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded, img);
    }

    #[test]
    fn write_webp_produces_decodable_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("preview.webp");
        let img = RgbaImage::from_pixel(120, 80, Rgba([26, 12, 12, 255]));

        RustBackend::new()
            .write_webp(&img, &path, &WebpParams::max_effort(Quality::new(88)))
            .unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (120, 80));
    }

    #[test]
    fn write_webp_into_missing_directory_errors() {
        let img = RgbaImage::new(64, 43);
        let result = RustBackend::new().write_webp(
            &img,
            Path::new("/nonexistent/dir/preview.webp"),
            &WebpParams::max_effort(Quality::default()),
        );
        assert!(matches!(result, Err(BackendError::Io(_))));
    }
}
