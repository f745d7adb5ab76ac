//! Pure calculation functions for image dimensions.
//!
//! All functions here are pure and testable without any I/O or images.

/// Calculate the size of an image fitted inside a bounding box.
///
/// Preserves the source aspect ratio and never upscales: a source that
/// already fits is returned unchanged. Each edge is rounded to the nearest
/// pixel and kept within `[1, bound]`.
///
/// # Arguments
/// * `source` - Original image dimensions (width, height)
/// * `bounds` - Box the result must fit in (width, height)
///
/// # Examples
/// ```
/// # use site_assets::imaging::calculations::fit_dimensions;
/// // 1024x768 icon into a 48px square → 48x36
/// assert_eq!(fit_dimensions((1024, 768), (48, 48)), (48, 36));
///
/// // Small sources are never enlarged
/// assert_eq!(fit_dimensions((16, 16), (48, 48)), (16, 16));
/// ```
pub fn fit_dimensions(source: (u32, u32), bounds: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (max_w, max_h) = bounds;

    if src_w <= max_w && src_h <= max_h {
        return source;
    }

    let scale = (max_w as f64 / src_w as f64).min(max_h as f64 / src_h as f64);
    let w = ((src_w as f64 * scale).round() as u32).clamp(1, max_w.max(1));
    let h = ((src_h as f64 * scale).round() as u32).clamp(1, max_h.max(1));
    (w, h)
}

/// Top-left offset that centers `inner` within `outer`.
///
/// Odd margins put the extra pixel on the right/bottom.
pub fn center_offset(outer: (u32, u32), inner: (u32, u32)) -> (u32, u32) {
    (
        outer.0.saturating_sub(inner.0) / 2,
        outer.1.saturating_sub(inner.1) / 2,
    )
}

/// Height of a canvas with the given width and `[width, height]` aspect ratio.
///
/// # Examples
/// ```
/// # use site_assets::imaging::calculations::height_for_width;
/// assert_eq!(height_for_width(360, (3, 2)), 240);
/// assert_eq!(height_for_width(600, (3, 2)), 400);
/// ```
pub fn height_for_width(width: u32, aspect: (u32, u32)) -> u32 {
    let (aspect_w, aspect_h) = aspect;
    (width as f64 * aspect_h as f64 / aspect_w as f64).round() as u32
}

/// Corner radius for a rounded rectangle: `fraction` of the shorter edge,
/// truncated to whole pixels.
pub fn corner_radius(width: u32, height: u32, fraction: f32) -> u32 {
    (width.min(height) as f64 * fraction as f64).floor() as u32
}

/// Ranking key for picking the best frame out of a multi-frame source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameRank {
    pub area: u64,
    pub max_edge: u32,
}

impl FrameRank {
    pub fn of(width: u32, height: u32) -> Self {
        Self {
            area: width as u64 * height as u64,
            max_edge: width.max(height),
        }
    }

    /// Strictly larger area wins; equal area falls back to the strictly
    /// longer edge. Anything else keeps the incumbent.
    pub fn outranks(&self, incumbent: &FrameRank) -> bool {
        self.area > incumbent.area
            || (self.area == incumbent.area && self.max_edge > incumbent.max_edge)
    }
}
