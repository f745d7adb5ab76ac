//! Best-frame selection for multi-resolution sources.
//!
//! An `.ico` holds several renditions of the same artwork (16px, 32px,
//! 256px, ...). Downscaling from the largest one gives the cleanest result at
//! every target size, so the icon pipeline always starts from the best frame:
//! largest area, then longest edge, then first in file order.
//!
//! ICO containers are read entry by entry with the `ico` crate. Every other
//! format goes through the `image` crate and counts as a single frame.

use super::backend::BackendError;
use super::calculations::FrameRank;
use image::RgbaImage;
use std::path::Path;

/// Magic bytes of an ICO directory header (reserved = 0, type = 1).
const ICO_MAGIC: &[u8] = &[0x00, 0x00, 0x01, 0x00];

/// Pick the best frame out of `frames`, consuming them one at a time.
///
/// Returns `None` for an empty iterator. Frames that lose are dropped as soon
/// as they are outranked.
pub fn select_best_frame<I>(frames: I) -> Option<RgbaImage>
where
    I: IntoIterator<Item = RgbaImage>,
{
    let mut best: Option<(FrameRank, RgbaImage)> = None;

    for frame in frames {
        let rank = FrameRank::of(frame.width(), frame.height());
        let replace = match &best {
            Some((incumbent, _)) => rank.outranks(incumbent),
            None => true,
        };
        if replace {
            best = Some((rank, frame));
        }
    }

    best.map(|(_, frame)| frame)
}

/// Sniff the container by content. The extension is ignored: a PNG saved as
/// `favicon.ico` is common and decodes as a single frame.
fn is_ico(data: &[u8]) -> bool {
    data.starts_with(ICO_MAGIC)
}

/// Decode every readable entry of an ICO container, lazily.
///
/// Entries that fail to decode (corrupt bitmap, unsupported bit depth) are
/// skipped.
fn ico_frames(dir: &ico::IconDir) -> impl Iterator<Item = RgbaImage> + '_ {
    dir.entries()
        .iter()
        .filter_map(|entry| entry.decode().ok())
        .filter_map(|icon| {
            RgbaImage::from_raw(icon.width(), icon.height(), icon.rgba_data().to_vec())
        })
}

/// Load `path` and return its best frame as RGBA.
///
/// A missing file surfaces as [`BackendError::Io`] (`NotFound`); a file with
/// no decodable frame as [`BackendError::NoReadableFrame`].
pub fn read_best_frame(path: &Path) -> Result<RgbaImage, BackendError> {
    let data = std::fs::read(path).map_err(BackendError::Io)?;

    let best = if is_ico(&data) {
        let dir = ico::IconDir::read(std::io::Cursor::new(&data))
            .map_err(|_| BackendError::NoReadableFrame(path.to_path_buf()))?;
        select_best_frame(ico_frames(&dir))
    } else {
        image::load_from_memory(&data)
            .ok()
            .map(|img| img.to_rgba8())
    };

    best.ok_or_else(|| BackendError::NoReadableFrame(path.to_path_buf()))
}
