//! Web and app icon generation.
//!
//! Reads one icon source, picks its best frame, and writes the PNG set a web
//! front end links from its `<head>` and web manifest.
//!
//! ## Output Structure
//!
//! ```text
//! client/public/icons/
//! ├── icon-16x16.png
//! ├── icon-32x32.png
//! ├── icon-48x48.png
//! ├── icon-64x64.png
//! ├── android-chrome-192x192.png
//! ├── android-chrome-512x512.png
//! └── apple-touch-icon.png          # 180x180, optionally from its own source
//! ```
//!
//! Every icon is the source fitted into a transparent square, centered. A
//! non-square source gets transparent padding on its short axis.

use crate::imaging::{BackendError, ImageBackend, RustBackend, TRANSPARENT, fit_and_center};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IconError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Input icon not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

/// One square PNG to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconTarget {
    pub filename: &'static str,
    pub size: u32,
}

/// The fixed icon set, all drawn from the primary source.
pub const ICON_SIZES: &[IconTarget] = &[
    IconTarget {
        filename: "icon-16x16.png",
        size: 16,
    },
    IconTarget {
        filename: "icon-32x32.png",
        size: 32,
    },
    IconTarget {
        filename: "icon-48x48.png",
        size: 48,
    },
    IconTarget {
        filename: "icon-64x64.png",
        size: 64,
    },
    IconTarget {
        filename: "android-chrome-192x192.png",
        size: 192,
    },
    IconTarget {
        filename: "android-chrome-512x512.png",
        size: 512,
    },
];

/// Home-screen icon; may come from a separate source.
pub const TOUCH_ICON: IconTarget = IconTarget {
    filename: "apple-touch-icon.png",
    size: 180,
};

/// Progress events, one per visible step.
#[derive(Debug, Clone, PartialEq)]
pub enum IconEvent {
    Wrote { path: PathBuf, size: u32 },
    /// The alternate touch-icon source was given but does not exist.
    TouchSourceMissing { path: PathBuf },
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IconReport {
    /// Every icon written, in write order.
    pub written: Vec<PathBuf>,
    /// Whether the touch icon came from the alternate source.
    pub touch_from_alternate: bool,
}

fn emit(progress: &Option<Sender<IconEvent>>, event: IconEvent) {
    if let Some(tx) = progress {
        tx.send(event).ok();
    }
}

/// Generate the icon set with the production backend.
pub fn generate(
    source: &Path,
    output_dir: &Path,
    apple_source: Option<&Path>,
    progress: Option<Sender<IconEvent>>,
) -> Result<IconReport, IconError> {
    generate_with_backend(
        &RustBackend::new(),
        source,
        output_dir,
        apple_source,
        progress,
    )
}

/// Generate the icon set using a specific backend (allows testing with mock).
pub fn generate_with_backend(
    backend: &impl ImageBackend,
    source: &Path,
    output_dir: &Path,
    apple_source: Option<&Path>,
    progress: Option<Sender<IconEvent>>,
) -> Result<IconReport, IconError> {
    if !source.exists() {
        return Err(IconError::SourceNotFound(source.to_path_buf()));
    }

    let base = backend.load_best_frame(source)?;
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for target in ICON_SIZES {
        written.push(write_icon(backend, &base, target, output_dir, &progress)?);
    }

    let alternate = match apple_source {
        Some(path) if path.exists() => Some(backend.load_best_frame(path)?),
        Some(path) => {
            emit(
                &progress,
                IconEvent::TouchSourceMissing {
                    path: path.to_path_buf(),
                },
            );
            None
        }
        None => None,
    };
    let touch_from_alternate = alternate.is_some();
    let touch_base = alternate.as_ref().unwrap_or(&base);
    written.push(write_icon(
        backend,
        touch_base,
        &TOUCH_ICON,
        output_dir,
        &progress,
    )?);

    Ok(IconReport {
        written,
        touch_from_alternate,
    })
}

fn write_icon(
    backend: &impl ImageBackend,
    base: &RgbaImage,
    target: &IconTarget,
    output_dir: &Path,
    progress: &Option<Sender<IconEvent>>,
) -> Result<PathBuf, IconError> {
    let icon = fit_and_center(base, target.size, target.size, TRANSPARENT);
    let path = output_dir.join(target.filename);
    backend.write_png(&icon, &path)?;
    emit(
        progress,
        IconEvent::Wrote {
            path: path.clone(),
            size: target.size,
        },
    );
    Ok(path)
}
