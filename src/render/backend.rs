use std::cell::Cell;

use plotters_backend::{
    BackendColor, BackendCoord, BackendStyle, BackendTextStyle, DrawingBackend, DrawingErrorKind,
};

/// Average glyph advance as a fraction of the font size, used to size text
/// when no font could be loaded.
const FALLBACK_ADVANCE: f64 = 0.55;

/// Wraps a backend so a missing font degrades to text-less output instead
/// of aborting the whole figure.
///
/// Text drawing that fails with a font error is skipped, and text extents
/// are estimated from the character count so layout still reserves room.
pub struct FontTolerantBackend<DB> {
    inner: DB,
    warned: Cell<bool>,
}

impl<DB> FontTolerantBackend<DB> {
    pub fn new(inner: DB) -> Self {
        Self {
            inner,
            warned: Cell::new(false),
        }
    }

    fn warn_once(&self, err: &dyn std::fmt::Display) {
        if !self.warned.replace(true) {
            log::warn!("No usable font, axis and legend text will be omitted: {err}");
        }
    }
}

impl<DB: DrawingBackend> DrawingBackend for FontTolerantBackend<DB> {
    type ErrorType = DB::ErrorType;

    fn get_size(&self) -> (u32, u32) {
        self.inner.get_size()
    }

    fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.ensure_prepared()
    }

    fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.present()
    }

    fn draw_pixel(
        &mut self,
        point: BackendCoord,
        color: BackendColor,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_pixel(point, color)
    }

    fn draw_line<S: BackendStyle>(
        &mut self,
        from: BackendCoord,
        to: BackendCoord,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_line(from, to, style)
    }

    fn draw_rect<S: BackendStyle>(
        &mut self,
        upper_left: BackendCoord,
        bottom_right: BackendCoord,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_rect(upper_left, bottom_right, style, fill)
    }

    fn draw_path<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        path: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_path(path, style)
    }

    fn draw_circle<S: BackendStyle>(
        &mut self,
        center: BackendCoord,
        radius: u32,
        style: &S,
        fill: bool,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.draw_circle(center, radius, style, fill)
    }

    fn fill_polygon<S: BackendStyle, I: IntoIterator<Item = BackendCoord>>(
        &mut self,
        vert: I,
        style: &S,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.fill_polygon(vert, style)
    }

    fn blit_bitmap(
        &mut self,
        pos: BackendCoord,
        (iw, ih): (u32, u32),
        src: &[u8],
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        self.inner.blit_bitmap(pos, (iw, ih), src)
    }

    fn draw_text<TStyle: BackendTextStyle>(
        &mut self,
        text: &str,
        style: &TStyle,
        pos: BackendCoord,
    ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.draw_text(text, style, pos) {
            Err(DrawingErrorKind::FontError(e)) => {
                self.warn_once(&e);
                Ok(())
            }
            other => other,
        }
    }

    fn estimate_text_size<TStyle: BackendTextStyle>(
        &self,
        text: &str,
        style: &TStyle,
    ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
        match self.inner.estimate_text_size(text, style) {
            Err(DrawingErrorKind::FontError(e)) => {
                self.warn_once(&e);
                Ok(fallback_text_size(text, style.size()))
            }
            other => other,
        }
    }
}

fn fallback_text_size(text: &str, size: f64) -> (u32, u32) {
    let width = text.chars().count() as f64 * size * FALLBACK_ADVANCE;
    (width.ceil() as u32, size.ceil() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use plotters::style::{IntoFont, TextStyle};

    /// A backend with no fonts at all: every text call fails.
    struct FontlessBackend {
        pixels: usize,
    }

    impl DrawingBackend for FontlessBackend {
        type ErrorType = std::fmt::Error;

        fn get_size(&self) -> (u32, u32) {
            (100, 50)
        }

        fn ensure_prepared(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
            Ok(())
        }

        fn present(&mut self) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
            Ok(())
        }

        fn draw_pixel(
            &mut self,
            _point: BackendCoord,
            _color: BackendColor,
        ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
            self.pixels += 1;
            Ok(())
        }

        fn draw_text<TStyle: BackendTextStyle>(
            &mut self,
            _text: &str,
            _style: &TStyle,
            _pos: BackendCoord,
        ) -> Result<(), DrawingErrorKind<Self::ErrorType>> {
            Err(DrawingErrorKind::FontError(Box::new(std::fmt::Error)))
        }

        fn estimate_text_size<TStyle: BackendTextStyle>(
            &self,
            _text: &str,
            _style: &TStyle,
        ) -> Result<(u32, u32), DrawingErrorKind<Self::ErrorType>> {
            Err(DrawingErrorKind::FontError(Box::new(std::fmt::Error)))
        }
    }

    fn style() -> TextStyle<'static> {
        TextStyle::from(("sans-serif", 12.0).into_font())
    }

    #[test]
    fn test_missing_font_skips_text() {
        let mut backend = FontTolerantBackend::new(FontlessBackend { pixels: 0 });

        assert!(backend.draw_text("Intensity", &style(), (10, 10)).is_ok());
        assert!(backend.draw_text("Intensity", &style(), (10, 30)).is_ok());
        assert!(backend.warned.get());
        assert_eq!(backend.inner.pixels, 0);
    }

    #[test]
    fn test_missing_font_estimates_from_length() {
        let backend = FontTolerantBackend::new(FontlessBackend { pixels: 0 });

        let size = backend.estimate_text_size("Intensity", &style()).unwrap();
        assert_eq!(size, fallback_text_size("Intensity", 12.0));
    }

    #[test]
    fn test_other_calls_pass_through() {
        let mut backend = FontTolerantBackend::new(FontlessBackend { pixels: 0 });

        backend.draw_pixel((1, 1), BackendColor { alpha: 1.0, rgb: (0, 0, 0) }).unwrap();
        assert_eq!(backend.get_size(), (100, 50));
        assert_eq!(backend.inner.pixels, 1);
        assert!(!backend.warned.get());
    }

    #[test]
    fn test_fallback_text_size_scales_with_length() {
        let (w1, h1) = fallback_text_size("Intensity", 12.0);
        let (w2, h2) = fallback_text_size("Retention Time (min)", 12.0);
        assert!(w2 > w1);
        assert_eq!(h1, 12);
        assert_eq!(h2, 12);
        assert_eq!(fallback_text_size("", 12.0), (0, 12));
    }
}
