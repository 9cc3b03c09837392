use std::ops::Range;

use anyhow::Result;

use crate::data::filter::Segment;
use crate::settings::PlotSettings;

/// Fraction of the data span added on each side of both axes.
const DATA_MARGIN: f64 = 0.05;
/// Length of the tick marks plotters draws outside the plot area.
const TICK_MARK: u32 = 5;

// ---------------------------------------------------------------------------
// Axis bounds
// ---------------------------------------------------------------------------

/// Coordinate ranges of the plot area.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    pub x: Range<f64>,
    pub y: Range<f64>,
}

impl AxisBounds {
    /// Bounds covering every drawable point with a small margin.
    /// Without any points both axes fall back to `0..1`.
    pub fn from_segments<'a>(segments: impl IntoIterator<Item = &'a Segment>) -> Self {
        let mut extent: Option<((f64, f64), (f64, f64))> = None;
        for &(x, y) in segments.into_iter().flatten() {
            extent = Some(match extent {
                None => ((x, x), (y, y)),
                Some(((x0, x1), (y0, y1))) => ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y))),
            });
        }

        match extent {
            Some(((x0, x1), (y0, y1))) => AxisBounds {
                x: padded(x0, x1),
                y: padded(y0, y1),
            },
            None => AxisBounds {
                x: 0.0..1.0,
                y: 0.0..1.0,
            },
        }
    }
}

/// Widen `lo..hi` by the data margin; a zero-width span is opened to ±0.5
/// (or ±5% of the value when that is larger).
///
/// The result is always finite and its width is representable, even when
/// the data covers most of the `f64` range.
fn padded(lo: f64, hi: f64) -> Range<f64> {
    // Halves first: `hi - lo` itself can overflow.
    let half_span = hi / 2.0 - lo / 2.0;
    let pad = if half_span <= f64::EPSILON * lo.abs().max(1.0) / 2.0 {
        0.5f64.max(lo.abs() * DATA_MARGIN)
    } else {
        half_span * 2.0 * DATA_MARGIN
    };

    let start = (lo - pad).max(f64::MIN);
    let end = (hi + pad).min(f64::MAX);
    if (end - start).is_finite() {
        start..end
    } else {
        start.max(f64::MIN / 2.0)..end.min(f64::MAX / 2.0)
    }
}

// ---------------------------------------------------------------------------
// Tick labels
// ---------------------------------------------------------------------------

/// Compact tick text: scientific notation for very large or very small
/// magnitudes, otherwise at most three decimals with trailing zeros removed.
pub fn format_tick(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    let magnitude = v.abs();
    if !(1e-3..1e5).contains(&magnitude) {
        return format!("{v:.1e}");
    }
    let text = format!("{v:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

// ---------------------------------------------------------------------------
// Tight label areas
// ---------------------------------------------------------------------------

/// Pixel sizes of the areas reserved left of and below the plot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelAreas {
    pub left: u32,
    pub bottom: u32,
}

/// Size the label areas to fit the widest tick label plus the axis title,
/// so no margin is wider than its contents.
///
/// `measure(text, font_size)` returns the rendered `(width, height)`.
pub fn tight_label_areas<F>(settings: &PlotSettings, bounds: &AxisBounds, measure: F) -> Result<LabelAreas>
where
    F: Fn(&str, f64) -> Result<(u32, u32)>,
{
    let y_mid = (bounds.y.start + bounds.y.end) / 2.0;
    let mut tick_width = 0;
    for v in [bounds.y.start, y_mid, bounds.y.end] {
        let (w, _) = measure(&format_tick(v), settings.tick_font_size)?;
        tick_width = tick_width.max(w);
    }

    let (_, tick_height) = measure(&format_tick(bounds.x.end), settings.tick_font_size)?;
    let (_, y_title_height) = measure(&settings.y_label, settings.axis_font_size)?;
    let (_, x_title_height) = measure(&settings.x_label, settings.axis_font_size)?;

    let pad = settings.label_pad;
    Ok(LabelAreas {
        left: TICK_MARK + pad + tick_width + pad + y_title_height + pad,
        bottom: TICK_MARK + pad + tick_height + pad + x_title_height + pad,
    })
}
