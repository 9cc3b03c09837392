//! Write a synthetic one-record polymer search result to stdout.
//!
//! ```sh
//! cargo run --bin generate_sample | cargo run --bin xic-plot
//! ```

use std::io::{BufWriter, Write};

use serde_json::json;

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic noise source (64-bit LCG, upper bits).
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform noise in `[-scale, scale)`.
    fn jitter(&mut self, scale: f64) -> f64 {
        (self.next_f64() * 2.0 - 1.0) * scale
    }
}

/// A train of evenly spaced peaks whose heights rise then fall, the shape a
/// polymer series leaves across a gradient.
fn peak_train(
    ret_times: &[f64],
    first: f64,
    spacing: f64,
    count: usize,
    height: f64,
    rng: &mut Lcg,
) -> Vec<f64> {
    ret_times
        .iter()
        .map(|&t| {
            let signal: f64 = (0..count)
                .map(|k| {
                    let envelope = gaussian(k as f64, count as f64 / 2.0, count as f64 / 4.0, 1.0);
                    gaussian(t, first + k as f64 * spacing, 0.15, height * envelope)
                })
                .sum();
            (signal + rng.jitter(height * 0.01)).max(0.0)
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    let mut rng = Lcg(42);

    // 0 → 60 min, step 0.05
    let ret_times: Vec<f64> = (0..1200).map(|i| i as f64 * 0.05).collect();

    let series = [
        ("PEG+1H", 18.0, 0.9, 24, 4.0e6),
        ("PEG+2H", 20.0, 0.9, 20, 1.5e6),
        ("PPG", 30.0, 1.1, 12, 8.0e5),
        ("Triton X-100", 38.0, 0.7, 14, 1.2e6),
        ("Polysiloxane", 45.0, 1.5, 8, 5.0e5),
    ];

    let polymers: Vec<_> = series
        .iter()
        .map(|&(name, first, spacing, count, height)| {
            let xic = peak_train(&ret_times, first, spacing, count, height, &mut rng);
            let total: f64 = xic.iter().sum();
            json!({ "name": name, "total": total, "xic": xic })
        })
        .collect();

    let tic: Vec<f64> = ret_times
        .iter()
        .map(|&t| gaussian(t, 30.0, 15.0, 5.0e7) + 1.0e6 + rng.jitter(1.0e5))
        .collect();
    let total: f64 = tic.iter().sum();

    let document = json!([{
        "filename": "synthetic.mzML",
        "ret_times": ret_times,
        "polymers": polymers,
        "tic": tic,
        "total": total,
    }]);

    let mut out = BufWriter::new(std::io::stdout().lock());
    serde_json::to_writer(&mut out, &document)?;
    writeln!(out)?;
    out.flush()?;

    eprintln!(
        "Wrote 1 record ({} polymers, {} scans)",
        series.len(),
        ret_times.len()
    );
    Ok(())
}
