use super::model::PolymerTrace;

// ---------------------------------------------------------------------------
// Gap splitting: which points of a trace can be joined by a line
// ---------------------------------------------------------------------------

/// A run of consecutive drawable `(retention time, intensity)` points.
pub type Segment = Vec<(f64, f64)>;

/// Split a trace into maximal runs of finite points.
///
/// A point is dropped (and breaks the line) when:
/// * its intensity is `null`
/// * its intensity or retention time is NaN or infinite
pub fn finite_segments(ret_times: &[f64], trace: &PolymerTrace) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current: Segment = Vec::new();

    for (&x, y) in ret_times.iter().zip(trace.xic.iter()) {
        match y {
            Some(y) if x.is_finite() && y.is_finite() => current.push((x, *y)),
            _ => {
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        segments.push(current);
    }
    segments
}
