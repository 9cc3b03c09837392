use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Figure settings
// ---------------------------------------------------------------------------

/// Everything about the figure that is fixed rather than read from input.
#[derive(Debug, Clone)]
pub struct PlotSettings {
    /// Figure width in inches.
    pub width_in: f64,
    /// Figure height in inches.
    pub height_in: f64,
    /// Pixels per inch of the rendered bitmap.
    pub dpi: f64,

    /// Directory the image is written into (created if missing).
    pub output_dir: PathBuf,
    /// File name of the image inside `output_dir`.
    pub file_name: String,

    pub x_label: String,
    pub y_label: String,

    /// Point sizes for tick labels, axis titles and legend entries.
    pub tick_font_size: f64,
    pub axis_font_size: f64,
    pub legend_font_size: f64,

    /// Stroke width of every trace, in pixels.
    pub line_width: u32,
    /// Blank border around the whole figure, in pixels.
    pub outer_margin: u32,
    /// Gap between tick labels and axis titles, in pixels.
    pub label_pad: u32,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            width_in: 8.0,
            height_in: 4.0,
            dpi: 100.0,
            output_dir: PathBuf::from("img"),
            file_name: "example.png".to_string(),
            x_label: "Retention Time (min)".to_string(),
            y_label: "Intensity".to_string(),
            tick_font_size: 12.0,
            axis_font_size: 14.0,
            legend_font_size: 12.0,
            line_width: 2,
            outer_margin: 10,
            label_pad: 6,
        }
    }
}

impl PlotSettings {
    /// Bitmap dimensions in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Full path of the output image.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }
}
