//! CLI output formatting for both pipelines.
//!
//! Output is one line per file written, plus a short header and summary for
//! the carousel run:
//!
//! ```text
//! Preparing 2 image(s) -> client/public/images/carousel
//! Output widths: 360, 600 | ratio=3:2 | quality=88
//! Wrote client/public/images/carousel/summer-salad-360x240.webp
//! Wrote client/public/images/carousel/summer-salad-600x400.webp
//! ...
//! Done. Generated 4 optimized carousel preview(s).
//! ```
//!
//! Each pipeline has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O.

use crate::carousel::CarouselEvent;
use crate::icons::IconEvent;

/// Format a single icon pipeline event.
pub fn format_icon_event(event: &IconEvent) -> Vec<String> {
    match event {
        IconEvent::Wrote { path, .. } => vec![format!("Wrote {}", path.display())],
        IconEvent::TouchSourceMissing { path } => vec![format!(
            "Apple icon source not found, using default source: {}",
            path.display()
        )],
    }
}

/// Format a single carousel pipeline event.
pub fn format_carousel_event(event: &CarouselEvent) -> Vec<String> {
    match event {
        CarouselEvent::Started {
            source_count,
            output_dir,
            widths,
            aspect_ratio,
            quality,
        } => {
            let widths = widths
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            vec![
                format!(
                    "Preparing {} image(s) -> {}",
                    source_count,
                    output_dir.display()
                ),
                format!(
                    "Output widths: {} | ratio={}:{} | quality={}",
                    widths, aspect_ratio[0], aspect_ratio[1], quality
                ),
            ]
        }
        CarouselEvent::Wrote { path } => vec![format!("Wrote {}", path.display())],
        CarouselEvent::Finished { generated } => vec![format!(
            "Done. Generated {} optimized carousel preview(s).",
            generated
        )],
    }
}

/// Print an icon event to stdout.
pub fn print_icon_event(event: &IconEvent) {
    for line in format_icon_event(event) {
        println!("{}", line);
    }
}

/// Print a carousel event to stdout.
pub fn print_carousel_event(event: &CarouselEvent) {
    for line in format_carousel_event(event) {
        println!("{}", line);
    }
}
