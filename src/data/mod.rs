/// Data layer: record types, loading, and gap splitting.
///
/// Architecture:
/// ```text
///   JSON on stdin
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse text → record 0 → Chromatogram
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  Chromatogram │  ret_times, Vec<PolymerTrace>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  split each trace into finite (x, y) segments
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
