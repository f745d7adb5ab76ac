//! Output filename conventions.
//!
//! Carousel previews are named after their source file so the front end can
//! reference them by a stable, URL-safe key:
//!
//! - `Summer Salad.jpg` → slug `summer-salad`
//! - 360px wide 3:2 variant → `summer-salad-360x240.webp`

/// Slug used when a filename has no ASCII letters or digits at all.
pub const FALLBACK_SLUG: &str = "image";

/// Derive a filesystem- and URL-safe slug from a filename stem.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single hyphen, and trims hyphens from both ends:
/// - `"Summer Salad"` → `"summer-salad"`
/// - `"  Grilled -- Fish (2) "` → `"grilled-fish-2"`
/// - `"Crème Brûlée"` → `"cr-me-br-l-e"`
/// - `"!!!"` → `"image"`
pub fn slugify(stem: &str) -> String {
    let mut slug = String::with_capacity(stem.len());
    let mut pending_hyphen = false;

    for c in stem.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Filename of one carousel variant: `{slug}-{width}x{height}.webp`.
pub fn variant_filename(slug: &str, width: u32, height: u32) -> String {
    format!("{}-{}x{}.webp", slug, width, height)
}
