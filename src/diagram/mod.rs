/// Diagram model: from rows to positioned, coloured vectors.
///
/// ```text
///   ModalityDataset + PlotConfig
///        │
///        ▼
///   vector    resultant per row  (Σ m_i · e^{iθ_i}, None if all zero)
///   region    flags → Classification, subplot membership
///        │
///        ▼
///   plot      ModalityPlot → Subplot { traces, counts, r_max } × 7
///   layout    Region → GridSpan → PolarFrame (pixel geometry)
/// ```

pub mod layout;
pub mod plot;
pub mod region;
pub mod vector;
