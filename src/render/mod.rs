/// Rendering: turn a `Chromatogram` into PNG bytes on disk.
///
/// ```text
///   Chromatogram + PlotSettings
///        │
///        ▼
///   ┌──────────┐
///   │  layout   │  axis bounds, tick text, label-area sizes
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  chart    │ ──▶ │ backend   │  RGB buffer (text skipped if no font)
///   └──────────┘     └──────────┘
///        │
///        ▼
///     PNG file
/// ```

pub mod backend;
pub mod chart;
pub mod fonts;
pub mod layout;
