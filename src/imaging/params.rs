//! Parameter types for image operations.
//!
//! These structs describe *what* to encode, not *how*. They sit between the
//! pipelines (which decide which files to produce) and the
//! [`backend`](super::backend) (which does the codec work), so a mock backend
//! can record exactly what a pipeline asked for.
//!
//! ## Types
//!
//! - [`Quality`]: lossy encoding quality (1–100, default 88). Clamped on construction.
//! - [`WebpParams`]: quality plus encoder effort for a lossy WebP write.

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    /// Clamp a signed value as typed on the command line (`--quality -5` → 1).
    pub fn from_signed(value: i64) -> Self {
        Self(value.clamp(1, 100) as u32)
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(88)
    }
}

/// Slowest, best-compressing libwebp method.
pub const WEBP_MAX_METHOD: u8 = 6;

/// Parameters for a lossy WebP encode.
///
/// `method` is libwebp's effort knob (0 = fast, 6 = smallest output).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WebpParams {
    pub quality: Quality,
    pub method: u8,
}

impl WebpParams {
    /// Maximum encoder effort at the given quality.
    pub fn max_effort(quality: Quality) -> Self {
        Self {
            quality,
            method: WEBP_MAX_METHOD,
        }
    }
}
