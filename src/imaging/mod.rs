//! Image processing: decode, fit, mask, encode.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Best frame** | `ico` entries / `image::load_from_memory`, ranked by area then edge |
//! | **Fit-and-center** | Lanczos3 `imageops::resize` + `imageops::overlay` |
//! | **Squircle mask** | rounded-rectangle coverage test per pixel |
//! | **Encode** | `PngEncoder` (icons), `webp` lossy (carousel) |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing encode settings
//! - **Frames**: Best-frame selection for multi-resolution sources
//! - **Compose**: Canvas, fit-and-center, and mask operations on buffers
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
pub mod calculations;
pub mod compose;
pub mod frames;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, ImageBackend};
pub use compose::{TRANSPARENT, apply_mask, fit_and_center, squircle_mask};
pub use frames::select_best_frame;
pub use params::{Quality, WEBP_MAX_METHOD, WebpParams};
pub use rust_backend::{PHOTO_EXTENSIONS, RustBackend, is_supported_photo};
