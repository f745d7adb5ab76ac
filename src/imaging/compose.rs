//! In-memory raster composition: fit-and-center onto a canvas, and the
//! squircle alpha mask used by carousel previews.
//!
//! Everything here works on decoded buffers; no I/O.

use super::calculations::{center_offset, corner_radius, fit_dimensions};
use image::imageops::{self, FilterType};
use image::{GrayImage, ImageBuffer, Luma, Pixel, RgbImage, Rgba, RgbaImage};

/// Fully transparent RGBA, the icon canvas fill.
pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Fit `source` inside a `width`×`height` canvas filled with `fill`, centered.
///
/// The source is downscaled with Lanczos3 when it does not fit and is never
/// enlarged. Pixel types with an alpha channel are blended over the canvas
/// using the source alpha; opaque types are copied.
pub fn fit_and_center<P>(
    source: &ImageBuffer<P, Vec<P::Subpixel>>,
    width: u32,
    height: u32,
    fill: P,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    let (fit_w, fit_h) = fit_dimensions(source.dimensions(), (width, height));
    let mut canvas = ImageBuffer::from_pixel(width, height, fill);
    let (left, top) = center_offset((width, height), (fit_w, fit_h));

    if (fit_w, fit_h) == source.dimensions() {
        imageops::overlay(&mut canvas, source, left as i64, top as i64);
    } else {
        let resized = imageops::resize(source, fit_w, fit_h, FilterType::Lanczos3);
        imageops::overlay(&mut canvas, &resized, left as i64, top as i64);
    }

    canvas
}

/// Build a rounded-rectangle opacity mask covering the whole canvas.
///
/// The corner radius is `corner_fraction` of the shorter edge. A pixel is
/// opaque (255) when its center lies inside the rounded rectangle
/// `[0, width] × [0, height]`, transparent (0) otherwise.
pub fn squircle_mask(width: u32, height: u32, corner_fraction: f32) -> GrayImage {
    let r = corner_radius(width, height, corner_fraction) as f64;
    let (w, h) = (width as f64, height as f64);

    GrayImage::from_fn(width, height, |x, y| {
        let cx = x as f64 + 0.5;
        let cy = y as f64 + 0.5;
        let dx = distance_outside(cx, r, w - r);
        let dy = distance_outside(cy, r, h - r);
        if dx * dx + dy * dy <= r * r {
            Luma([255])
        } else {
            Luma([0])
        }
    })
}

/// How far `v` lies outside `[lo, hi]`, or 0 inside it.
fn distance_outside(v: f64, lo: f64, hi: f64) -> f64 {
    if v < lo {
        lo - v
    } else if v > hi {
        v - hi
    } else {
        0.0
    }
}

/// Use `mask` as the alpha channel of `rgb`.
pub fn apply_mask(rgb: &RgbImage, mask: &GrayImage) -> RgbaImage {
    debug_assert_eq!(rgb.dimensions(), mask.dimensions());
    RgbaImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        let [a] = mask.get_pixel(x, y).0;
        Rgba([r, g, b, a])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid_rgba(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]))
    }

    // =========================================================================
    // fit_and_center tests
    // =========================================================================

    #[test]
    fn output_matches_requested_size_for_any_aspect() {
        for (src_w, src_h) in [(1024, 768), (768, 1024), (512, 512), (10, 300), (7, 3)] {
            let source = solid_rgba(src_w, src_h);
            for size in [16, 32, 48, 180, 512] {
                let out = fit_and_center(&source, size, size, TRANSPARENT);
                assert_eq!(out.dimensions(), (size, size), "{src_w}x{src_h} → {size}");
            }
        }
    }

    #[test]
    fn landscape_icon_gets_transparent_rows_top_and_bottom() {
        // 1024x768 → 48x36 content, 6px transparent bands
        let out = fit_and_center(&solid_rgba(1024, 768), 48, 48, TRANSPARENT);

        assert_eq!(out.get_pixel(24, 0)[3], 0);
        assert_eq!(out.get_pixel(24, 5)[3], 0);
        assert_eq!(out.get_pixel(24, 24)[3], 255);
        assert_eq!(out.get_pixel(24, 42)[3], 0);
        assert_eq!(out.get_pixel(24, 47)[3], 0);
        // Full width is covered
        assert_eq!(out.get_pixel(0, 24)[3], 255);
        assert_eq!(out.get_pixel(47, 24)[3], 255);
    }

    #[test]
    fn small_source_is_centered_not_enlarged() {
        let out = fit_and_center(&solid_rgba(16, 16), 64, 64, TRANSPARENT);

        // Content occupies [24, 40) on both axes
        assert_eq!(out.get_pixel(23, 32)[3], 0);
        assert_eq!(out.get_pixel(24, 32)[3], 255);
        assert_eq!(out.get_pixel(39, 32)[3], 255);
        assert_eq!(out.get_pixel(40, 32)[3], 0);
    }

    #[test]
    fn transparent_source_pixels_stay_transparent() {
        let mut source = solid_rgba(8, 8);
        source.put_pixel(0, 0, Rgba([255, 255, 255, 0]));

        let out = fit_and_center(&source, 8, 8, TRANSPARENT);
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(*out.get_pixel(4, 4), Rgba([200, 40, 40, 255]));
    }

    #[test]
    fn rgb_canvas_is_padded_with_fill_color() {
        let fill = Rgb([26, 12, 12]);
        let source = RgbImage::from_pixel(400, 400, Rgb([250, 250, 250]));

        let out = fit_and_center(&source, 360, 240, fill);
        assert_eq!(out.dimensions(), (360, 240));
        // 240x240 content centered → 60px side bands
        assert_eq!(*out.get_pixel(0, 120), fill);
        assert_eq!(*out.get_pixel(59, 120), fill);
        assert_eq!(*out.get_pixel(180, 120), Rgb([250, 250, 250]));
        assert_eq!(*out.get_pixel(359, 120), fill);
    }

    // =========================================================================
    // squircle_mask tests
    // =========================================================================

    #[test]
    fn mask_matches_canvas_dimensions() {
        for (w, h) in [(360, 240), (600, 400), (64, 43)] {
            assert_eq!(squircle_mask(w, h, 0.30).dimensions(), (w, h));
        }
    }

    #[test]
    fn mask_corners_are_cut_and_center_is_opaque() {
        let mask = squircle_mask(360, 240, 0.30);

        for (x, y) in [(0, 0), (359, 0), (0, 239), (359, 239), (10, 10)] {
            assert_eq!(mask.get_pixel(x, y)[0], 0, "corner pixel ({x}, {y})");
        }
        assert_eq!(mask.get_pixel(180, 120)[0], 255);
        // Edge midpoints sit on the straight sides
        assert_eq!(mask.get_pixel(180, 0)[0], 255);
        assert_eq!(mask.get_pixel(0, 120)[0], 255);
        assert_eq!(mask.get_pixel(359, 120)[0], 255);
        assert_eq!(mask.get_pixel(180, 239)[0], 255);
    }

    #[test]
    fn mask_only_contains_binary_opacity() {
        let mask = squircle_mask(200, 133, 0.30);
        assert!(mask.pixels().all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn mask_is_symmetric() {
        let mask = squircle_mask(120, 80, 0.30);
        for y in 0..80 {
            for x in 0..120 {
                assert_eq!(mask.get_pixel(x, y), mask.get_pixel(119 - x, y));
                assert_eq!(mask.get_pixel(x, y), mask.get_pixel(x, 79 - y));
            }
        }
    }

    #[test]
    fn mask_without_rounding_is_fully_opaque() {
        let mask = squircle_mask(50, 30, 0.0);
        assert!(mask.pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn apply_mask_sets_alpha_and_keeps_color() {
        let rgb = RgbImage::from_pixel(360, 240, Rgb([1, 2, 3]));
        let mask = squircle_mask(360, 240, 0.30);

        let out = apply_mask(&rgb, &mask);
        assert_eq!(*out.get_pixel(0, 0), Rgba([1, 2, 3, 0]));
        assert_eq!(*out.get_pixel(180, 120), Rgba([1, 2, 3, 255]));
    }
}
