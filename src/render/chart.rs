use std::path::Path;

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use plotters::prelude::*;

use super::backend::FontTolerantBackend;
use super::fonts;
use super::layout::{format_tick, tight_label_areas, AxisBounds};
use crate::color::line_colors;
use crate::data::filter::{finite_segments, Segment};
use crate::data::model::{Chromatogram, PolymerTrace};
use crate::settings::PlotSettings;

/// Length of the line sample drawn next to each legend entry.
const LEGEND_SAMPLE: i32 = 20;

// ---------------------------------------------------------------------------
// Chromatogram figure
// ---------------------------------------------------------------------------

/// Draw the record into an in-memory RGB image.
///
/// One line per polymer (gaps where intensities are missing), a shared
/// legend when there is at least one polymer, and label areas sized to
/// their contents.
pub fn render(record: &Chromatogram, settings: &PlotSettings) -> Result<RgbImage> {
    fonts::ensure_registered();

    let traces: Vec<(&PolymerTrace, Vec<Segment>)> = record
        .polymers
        .iter()
        .map(|poly| (poly, finite_segments(&record.ret_times, poly)))
        .collect();
    let bounds = AxisBounds::from_segments(traces.iter().flat_map(|(_, segs)| segs.iter()));
    log::debug!("Axis bounds: x {:?}, y {:?}", bounds.x, bounds.y);

    let (width, height) = settings.pixel_size();
    let mut buffer = vec![0u8; width as usize * height as usize * 3];
    {
        let backend = BitMapBackend::with_buffer(&mut buffer, (width, height));
        let root = FontTolerantBackend::new(backend).into_drawing_area();
        root.fill(&WHITE)?;

        let tick_font: FontDesc = (fonts::FAMILY, settings.tick_font_size).into_font();
        let axis_font: FontDesc = (fonts::FAMILY, settings.axis_font_size).into_font();
        let legend_font: FontDesc = (fonts::FAMILY, settings.legend_font_size).into_font();

        let areas = tight_label_areas(settings, &bounds, |text, size| {
            let style = TextStyle::from((fonts::FAMILY, size).into_font());
            Ok(root.estimate_text_size(text, &style)?)
        })?;

        let mut chart = ChartBuilder::on(&root)
            .margin(settings.outer_margin)
            .x_label_area_size(areas.bottom)
            .y_label_area_size(areas.left)
            .build_cartesian_2d(bounds.x.clone(), bounds.y.clone())?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_desc(settings.x_label.as_str())
            .y_desc(settings.y_label.as_str())
            .x_label_formatter(&|v: &f64| format_tick(*v))
            .y_label_formatter(&|v: &f64| format_tick(*v))
            .label_style(tick_font)
            .axis_desc_style(axis_font)
            .draw()?;

        // Close the frame on the top and right edges as well.
        chart.draw_series(std::iter::once(Rectangle::new(
            [(bounds.x.start, bounds.y.start), (bounds.x.end, bounds.y.end)],
            BLACK.stroke_width(1),
        )))?;

        for ((trace, segments), color) in traces.iter().zip(line_colors(traces.len())) {
            let style = color.stroke_width(settings.line_width);
            chart
                .draw_series(
                    segments
                        .iter()
                        .map(move |seg| PathElement::new(seg.clone(), style)),
                )?
                .label(trace.name.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + LEGEND_SAMPLE, y)], style));
        }

        if !record.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.3))
                .label_font(legend_font)
                .draw()?;
        }

        root.present()?;
    }

    RgbImage::from_raw(width, height, buffer).context("rendered buffer does not match figure size")
}

/// Encode as PNG, replacing any existing file at `path`.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("writing {}", path.display()))
}
