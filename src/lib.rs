//! # Site Assets
//!
//! Build-time image preparation for a web front end. Two independent
//! pipelines turn hand-maintained source artwork into the files the site
//! actually serves:
//!
//! ```text
//! icons      assets/Icons/favicon.ico  →  client/public/icons/*.png
//! carousel   assets/Meal Carousel/     →  client/public/images/carousel/*.webp
//! ```
//!
//! Both are one-shot and single-threaded. Re-running with the same inputs
//! yields the same file set; the carousel purges its previous `.webp` outputs
//! before writing.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`icons`] | Best-frame selection and the fixed PNG icon set |
//! | [`carousel`] | Width parsing, source discovery, purge, 3:2 squircle WebP previews |
//! | [`config`] | `site-assets.toml` loading over stock defaults, validation |
//! | [`naming`] | Filename stem → URL slug, variant filenames |
//! | [`imaging`] | Geometry, compositing, masks, decode/encode backend |
//! | [`output`] | CLI output formatting for pipeline events |
//!
//! # Design Decisions
//!
//! ## Fit, Never Stretch
//!
//! Every output is the source scaled to fit inside a fixed canvas, preserving
//! aspect ratio, then centered. Sources smaller than the canvas are padded,
//! never enlarged. Icons pad with transparency; carousel previews pad with the
//! dark background color and are then clipped to a rounded-rectangle
//! silhouette.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 resampling, and PNG encoding use the `image` crate; ICO
//! containers are read with `ico`; WebP is encoded with `webp`. Pixel work goes
//! through the [`imaging::ImageBackend`] trait so orchestration is testable
//! without touching real codecs.
//!
//! ## Deterministic Names
//!
//! Carousel outputs are named `{slug}-{width}x{height}.webp` from the source
//! filename alone, so the front end can reference them without a manifest.

pub mod carousel;
pub mod config;
pub mod icons;
pub mod imaging;
pub mod naming;
pub mod output;

#[cfg(test)]
pub(crate) mod test_helpers;
