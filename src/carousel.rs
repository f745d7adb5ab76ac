//! Carousel preview preparation.
//!
//! Turns a directory of food photos into fixed-aspect WebP previews with
//! softened ("squircle") corners, at one or more widths.
//!
//! ## Pipeline
//!
//! ```text
//! widths "600,360,360" → [360, 600]           (parse, dedupe, sort, ≥ 64)
//! assets/Meal Carousel/*.{jpg,jpeg,png,webp}  (sorted by filename)
//!   → purge output_dir/*.webp
//!   → for each photo: EXIF-orient → RGB
//!       → for each width: fit-and-center on a 3:2 canvas → squircle alpha → WebP
//! ```
//!
//! ## Output Structure
//!
//! ```text
//! client/public/images/carousel/
//! ├── summer-salad-360x240.webp
//! ├── summer-salad-600x400.webp
//! ├── tacos-360x240.webp
//! └── tacos-600x400.webp
//! ```
//!
//! Purging before regenerating makes re-runs idempotent: previews of photos
//! that were removed from the input directory do not linger.

use crate::config::{CarouselConfig, ConfigError};
use crate::imaging::calculations::height_for_width;
use crate::imaging::{
    BackendError, ImageBackend, Quality, RustBackend, WebpParams, apply_mask, fit_and_center,
    is_supported_photo, squircle_mask,
};
use crate::naming::{slugify, variant_filename};
use image::Rgb;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

/// Narrowest preview width accepted.
pub const MIN_WIDTH: u32 = 64;

#[derive(Error, Debug)]
pub enum WidthError {
    #[error("At least one output width is required")]
    Empty,
    #[error("Width must be at least 64px, got {0}")]
    TooSmall(u32),
    #[error("Width is not a positive integer: {0:?}")]
    NotANumber(String),
}

#[derive(Error, Debug)]
pub enum CarouselError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Invalid widths: {0}")]
    InvalidWidth(#[from] WidthError),
    #[error("Input directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    #[error("No supported image files found in {}", .0.display())]
    EmptyInputDirectory(PathBuf),
    #[error("Output directory must differ from the input directory: {}", .0.display())]
    OutputIsInput(PathBuf),
    #[error("{0}")]
    Config(#[from] ConfigError),
}

/// Progress events, one per visible step.
#[derive(Debug, Clone, PartialEq)]
pub enum CarouselEvent {
    Started {
        source_count: usize,
        output_dir: PathBuf,
        widths: Vec<u32>,
        aspect_ratio: [u32; 2],
        quality: u32,
    },
    Wrote {
        path: PathBuf,
    },
    Finished {
        generated: usize,
    },
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CarouselReport {
    /// Source photos processed.
    pub sources: usize,
    /// Stale `.webp` files deleted before regenerating.
    pub purged: usize,
    /// Every preview written, in write order.
    pub written: Vec<PathBuf>,
}

/// Parse a comma-separated width list such as `"360,600"`.
///
/// Blank pieces are ignored. The result is deduplicated and ascending.
pub fn parse_widths(raw: &str) -> Result<Vec<u32>, WidthError> {
    let mut widths = Vec::new();
    for piece in raw.split(',') {
        let value = piece.trim();
        if value.is_empty() {
            continue;
        }
        let parsed = value
            .parse::<u32>()
            .map_err(|_| WidthError::NotANumber(value.to_string()))?;
        widths.push(parsed);
    }
    normalize_widths(&widths)
}

/// Check every width is at least [`MIN_WIDTH`], then dedupe and sort.
pub fn normalize_widths(widths: &[u32]) -> Result<Vec<u32>, WidthError> {
    if let Some(&small) = widths.iter().find(|&&w| w < MIN_WIDTH) {
        return Err(WidthError::TooSmall(small));
    }
    let mut widths = widths.to_vec();
    widths.sort_unstable();
    widths.dedup();
    if widths.is_empty() {
        return Err(WidthError::Empty);
    }
    Ok(widths)
}

/// List supported photos directly inside `input_dir`, sorted by filename.
pub fn discover_sources(input_dir: &Path) -> Result<Vec<PathBuf>, CarouselError> {
    if !input_dir.is_dir() {
        return Err(CarouselError::SourceNotFound(input_dir.to_path_buf()));
    }

    let mut sources = Vec::new();
    for entry in std::fs::read_dir(input_dir)? {
        let path = entry?.path();
        if path.is_file() && is_supported_photo(&path) {
            sources.push(path);
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Err(CarouselError::EmptyInputDirectory(input_dir.to_path_buf()));
    }
    Ok(sources)
}

fn is_webp(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("webp"))
}

/// Delete every `.webp` file directly inside `output_dir`. Returns the count.
///
/// Other files and subdirectories are left alone.
pub fn purge_outputs(output_dir: &Path) -> Result<usize, CarouselError> {
    let mut purged = 0;
    for entry in std::fs::read_dir(output_dir)? {
        let path = entry?.path();
        if path.is_file() && is_webp(&path) {
            std::fs::remove_file(&path)?;
            purged += 1;
        }
    }
    Ok(purged)
}

fn same_directory(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn emit(progress: &Option<Sender<CarouselEvent>>, event: CarouselEvent) {
    if let Some(tx) = progress {
        tx.send(event).ok();
    }
}

/// Prepare carousel previews with the production backend.
pub fn prepare(
    config: &CarouselConfig,
    progress: Option<Sender<CarouselEvent>>,
) -> Result<CarouselReport, CarouselError> {
    prepare_with_backend(&RustBackend::new(), config, progress)
}

/// Prepare carousel previews using a specific backend (allows testing with mock).
pub fn prepare_with_backend(
    backend: &impl ImageBackend,
    config: &CarouselConfig,
    progress: Option<Sender<CarouselEvent>>,
) -> Result<CarouselReport, CarouselError> {
    let widths = normalize_widths(&config.widths)?;
    config.validate()?;
    let quality = Quality::from_signed(config.quality);
    let aspect = (config.aspect_ratio[0], config.aspect_ratio[1]);

    let sources = discover_sources(&config.input_dir)?;

    std::fs::create_dir_all(&config.output_dir)?;
    if same_directory(&config.input_dir, &config.output_dir) {
        return Err(CarouselError::OutputIsInput(config.output_dir.clone()));
    }
    let purged = purge_outputs(&config.output_dir)?;

    emit(
        &progress,
        CarouselEvent::Started {
            source_count: sources.len(),
            output_dir: config.output_dir.clone(),
            widths: widths.clone(),
            aspect_ratio: config.aspect_ratio,
            quality: quality.value(),
        },
    );

    let params = WebpParams::max_effort(quality);
    let fill = Rgb(config.background);
    let mut written = Vec::new();

    for source in &sources {
        let photo = backend.load_photo(source)?;
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        let slug = slugify(&stem);

        for &width in &widths {
            let height = height_for_width(width, aspect);
            let canvas = fit_and_center(&photo, width, height, fill);
            let mask = squircle_mask(width, height, config.corner_radius);
            let preview = apply_mask(&canvas, &mask);

            let output_path = config
                .output_dir
                .join(variant_filename(&slug, width, height));
            backend.write_webp(&preview, &output_path, &params)?;
            emit(
                &progress,
                CarouselEvent::Wrote {
                    path: output_path.clone(),
                },
            );
            written.push(output_path);
        }
    }

    emit(
        &progress,
        CarouselEvent::Finished {
            generated: written.len(),
        },
    );

    Ok(CarouselReport {
        sources: sources.len(),
        purged,
        written,
    })
}
