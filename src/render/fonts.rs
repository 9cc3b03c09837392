use std::path::Path;
use std::sync::OnceLock;

use plotters::style::{register_font, FontStyle};

/// Family name plotters asks for by default.
pub const FAMILY: &str = "sans-serif";

/// Common locations of a plain sans-serif TTF, most specific first.
const CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<&'static Path>> = OnceLock::new();

/// Register the first readable candidate as `sans-serif`, once per process.
///
/// Returns the path that was registered, or `None` when no candidate could
/// be loaded; text is then left out of the figure.
pub fn ensure_registered() -> Option<&'static Path> {
    *REGISTERED.get_or_init(|| {
        for candidate in CANDIDATES {
            let path = Path::new(candidate);
            let Ok(bytes) = std::fs::read(path) else {
                continue;
            };
            // plotters keeps a 'static reference; the font lives for the process.
            let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
            match register_font(FAMILY, FontStyle::Normal, bytes) {
                Ok(()) => {
                    log::debug!("Registered font {}", path.display());
                    return Some(path);
                }
                Err(_) => log::debug!("Skipping font {}: not a parseable TTF", path.display()),
            }
        }
        log::debug!("No system font found among {} candidates", CANDIDATES.len());
        None
    })
}
