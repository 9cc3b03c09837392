use serde::Deserialize;
use thiserror::Error;

// ---------------------------------------------------------------------------
// RecordError – shape violations worth matching on
// ---------------------------------------------------------------------------

/// Structural problems with an input document that JSON parsing alone does
/// not catch.
#[derive(Debug, Error, PartialEq)]
pub enum RecordError {
    #[error("expected a top-level JSON array of records")]
    NotAnArray,

    #[error("input document contains no records")]
    EmptyDocument,

    #[error("polymer '{name}': xic has {found} values but ret_times has {expected}")]
    LengthMismatch {
        name: String,
        expected: usize,
        found: usize,
    },
}

// ---------------------------------------------------------------------------
// PolymerTrace – one labelled intensity curve
// ---------------------------------------------------------------------------

/// Extracted ion chromatogram of one polymer species.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PolymerTrace {
    /// Legend label.
    pub name: String,
    /// Intensity per scan, aligned with `Chromatogram::ret_times`.
    /// `null` marks a missing value (NaN upstream) and becomes a line gap.
    pub xic: Vec<Option<f64>>,
    /// Summed intensity, when the producer already computed it.
    #[serde(default)]
    pub total: Option<f64>,
}

impl PolymerTrace {
    /// The trace's summed intensity: `total` if present, otherwise the sum
    /// of its finite XIC values.
    pub fn summed_intensity(&self) -> f64 {
        self.total.unwrap_or_else(|| {
            self.xic
                .iter()
                .flatten()
                .copied()
                .filter(|v| v.is_finite())
                .sum()
        })
    }
}

// ---------------------------------------------------------------------------
// Chromatogram – record 0 of the input document
// ---------------------------------------------------------------------------

/// A single run: shared retention-time axis plus one trace per polymer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Chromatogram {
    /// Source file name, if the producer recorded one.
    #[serde(default)]
    pub filename: Option<String>,
    /// Retention times in minutes (x axis for every trace).
    pub ret_times: Vec<f64>,
    /// Per-polymer intensity curves.
    pub polymers: Vec<PolymerTrace>,
    /// Total ion current per scan.
    #[serde(default)]
    pub tic: Option<Vec<Option<f64>>>,
    /// Summed total ion current.
    #[serde(default)]
    pub total: Option<f64>,
}

impl Chromatogram {
    /// Every trace must have exactly one intensity per retention time.
    pub fn check_lengths(&self) -> Result<(), RecordError> {
        let expected = self.ret_times.len();
        match self.polymers.iter().find(|p| p.xic.len() != expected) {
            Some(poly) => Err(RecordError::LengthMismatch {
                name: poly.name.clone(),
                expected,
                found: poly.xic.len(),
            }),
            None => Ok(()),
        }
    }

    /// Summed TIC for the run, if one is known and positive.
    pub fn tic_total(&self) -> Option<f64> {
        let total = self.total.or_else(|| {
            self.tic
                .as_ref()
                .map(|tic| tic.iter().flatten().copied().filter(|v| v.is_finite()).sum())
        })?;
        (total.is_finite() && total > 0.0).then_some(total)
    }

    /// Each polymer's share of the run's TIC, in percent.
    pub fn tic_shares(&self) -> Option<Vec<(&str, f64)>> {
        let total = self.tic_total()?;
        Some(
            self.polymers
                .iter()
                .map(|p| (p.name.as_str(), 100.0 * p.summed_intensity() / total))
                .collect(),
        )
    }

    /// Number of polymer traces.
    pub fn len(&self) -> usize {
        self.polymers.len()
    }

    /// Whether the record has no traces.
    pub fn is_empty(&self) -> bool {
        self.polymers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trace(name: &str, xic: Vec<Option<f64>>) -> PolymerTrace {
        PolymerTrace {
            name: name.to_string(),
            xic,
            total: None,
        }
    }

    #[test]
    fn test_check_lengths_reports_first_mismatch() {
        let record = Chromatogram {
            filename: None,
            ret_times: vec![1.0, 2.0, 3.0],
            polymers: vec![
                trace("PEG+1H", vec![Some(1.0), Some(2.0), Some(3.0)]),
                trace("PPG", vec![Some(1.0)]),
            ],
            tic: None,
            total: None,
        };

        assert_eq!(
            record.check_lengths(),
            Err(RecordError::LengthMismatch {
                name: "PPG".to_string(),
                expected: 3,
                found: 1,
            })
        );
    }

    #[test]
    fn test_summed_intensity_skips_gaps() {
        let t = trace("PEG+2H", vec![Some(1.5), None, Some(2.5)]);
        assert_eq!(t.summed_intensity(), 4.0);

        let with_total = PolymerTrace {
            total: Some(10.0),
            ..t
        };
        assert_eq!(with_total.summed_intensity(), 10.0);
    }

    #[test]
    fn test_tic_shares() {
        let record = Chromatogram {
            filename: Some("run.mzML".to_string()),
            ret_times: vec![0.0, 1.0],
            polymers: vec![trace("PEG+1H", vec![Some(5.0), Some(20.0)])],
            tic: Some(vec![Some(50.0), Some(50.0)]),
            total: None,
        };

        let shares = record.tic_shares().unwrap();
        assert_eq!(shares, vec![("PEG+1H", 25.0)]);
    }

    #[test]
    fn test_tic_shares_requires_positive_total() {
        let record = Chromatogram {
            filename: None,
            ret_times: vec![],
            polymers: vec![],
            tic: None,
            total: Some(0.0),
        };
        assert!(record.tic_shares().is_none());
    }
}
