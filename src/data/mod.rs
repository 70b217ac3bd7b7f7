/// Data layer: row types and CSV loading.
///
/// Architecture:
/// ```text
///   rows.csv  (m1,m2,m3,f1,f2,f3)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse cells → Vec<DataPoint>, Vec<BinarizationFlags>
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ ModalityDataset  │  validated parallel sequences
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
