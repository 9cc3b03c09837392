use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::data::loader::{first_record, read_document};
use crate::data::model::Chromatogram;
use crate::render::chart::{render, save_png};
use crate::settings::PlotSettings;

// ---------------------------------------------------------------------------
// One run: input stream → PNG file
// ---------------------------------------------------------------------------

/// Read a document from `input`, plot its first record and write the image.
///
/// Returns the path written. Nothing is written unless every stage before
/// encoding succeeded.
pub fn run<R: Read>(input: R, settings: &PlotSettings) -> Result<PathBuf> {
    let document = read_document(input)?;

    std::fs::create_dir_all(&settings.output_dir)
        .with_context(|| format!("creating {}", settings.output_dir.display()))?;

    let record = first_record(document)?;
    log_tic_report(&record);

    let image = render(&record, settings)?;
    let path = settings.output_path();
    save_png(&image, &path)?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

/// Print each polymer's share of the total ion current.
fn log_tic_report(record: &Chromatogram) {
    match tic_report(record) {
        Some(lines) => lines.iter().for_each(|line| log::info!("{line}")),
        None => log::debug!("No total ion current in record, skipping %TIC report"),
    }
}

/// The %TIC table as text lines, or `None` without a positive TIC total.
fn tic_report(record: &Chromatogram) -> Option<Vec<String>> {
    let shares = record.tic_shares()?;
    let rule = "+".repeat(36);

    let mut lines = Vec::with_capacity(shares.len() + 5);
    if let Some(name) = &record.filename {
        lines.push(name.clone());
    }
    lines.push(rule.clone());
    lines.push("Polymer                         %TIC".to_string());
    lines.push(rule.clone());
    lines.extend(shares.into_iter().map(|(name, pct)| format!("{name:26}  {pct:>8.4}")));
    lines.push(rule);
    Some(lines)
}
