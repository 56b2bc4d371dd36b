/// Data layer: core types, parsing, filtering, and normalization.
///
/// Architecture:
/// ```text
///  .mgf text
///      │
///      ▼
///  ┌──────────┐
///  │  parser   │  line state machine → ScanCollection
///  └──────────┘
///      │
///      ▼
///  ┌────────────────┐
///  │ ScanCollection  │  Vec<Scan>, scan-number index
///  └────────────────┘
///      │  (one selected Scan)
///      ▼
///  ┌──────────┐
///  │  filter   │  windowed top-k + precursor exclusion → FilteredPeaks
///  └──────────┘
///      │
///      ▼
///  ┌────────────┐
///  │ normalize   │  L2 + sqrt representations → FilteredSpectrum
///  └────────────┘
/// ```

pub mod filter;
pub mod model;
pub mod normalize;
pub mod parser;
