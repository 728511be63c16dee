/// Data layer: export loading, cleaning, and filtering.
///
/// Architecture:
/// ```text
///  export dir/*.csv
///        │
///        ▼
///   ┌──────────┐
///   │  table    │  CSV → RawTable (clean headers, skip preamble)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  RawTable + dates → typed records → ExportBundle
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  interaction kind / date range → selected interactions
///   └──────────┘
/// ```

pub mod dates;
pub mod filter;
pub mod loader;
pub mod model;
pub mod table;
