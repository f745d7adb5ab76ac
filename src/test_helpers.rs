//! Shared test utilities: synthetic source images written to disk.
//!
//! Fixtures are generated per test inside a `TempDir` rather than checked in,
//! so each test states the exact dimensions it depends on.

use image::{ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Gradient RGBA pattern; alpha is opaque everywhere.
fn gradient_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 255])
    })
}

/// Write a PNG with the given dimensions.
pub fn create_test_png(path: &Path, width: u32, height: u32) {
    gradient_rgba(width, height)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

/// Write a small valid JPEG with the given dimensions.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new(writer)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
}

/// Write a JPEG carrying an EXIF Orientation tag (1-8).
///
/// The APP1 segment is a minimal little-endian TIFF with a single IFD0 entry,
/// spliced in right after SOI.
pub fn create_test_jpeg_with_orientation(path: &Path, width: u32, height: u32, orientation: u16) {
    create_test_jpeg(path, width, height);
    let jpeg = std::fs::read(path).unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "missing SOI");

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II\x2A\x00");
    tiff.extend_from_slice(&8u32.to_le_bytes()); // IFD0 offset
    tiff.extend_from_slice(&1u16.to_le_bytes()); // entry count
    tiff.extend_from_slice(&0x0112u16.to_le_bytes()); // Orientation
    tiff.extend_from_slice(&3u16.to_le_bytes()); // SHORT
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&orientation.to_le_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_le_bytes()); // no IFD1

    let mut app1 = vec![0xFF, 0xE1];
    let len = (2 + 6 + tiff.len()) as u16;
    app1.extend_from_slice(&len.to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    std::fs::write(path, out).unwrap();
}

/// Write a multi-entry ICO, one entry per `(width, height)`.
///
/// Entries must be 1-256 px on each side.
pub fn create_test_ico(path: &Path, sizes: &[(u32, u32)]) {
    let mut dir = ico::IconDir::new(ico::ResourceType::Icon);
    for &(width, height) in sizes {
        let rgba = gradient_rgba(width, height).into_raw();
        let image = ico::IconImage::from_rgba_data(width, height, rgba);
        dir.add_entry(ico::IconDirEntry::encode(&image).unwrap());
    }
    let file = std::fs::File::create(path).unwrap();
    dir.write(file).unwrap();
}
