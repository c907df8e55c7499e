/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse + clean → CarDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ CarDataset │  Vec<CarRecord>, distinct values per column
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  budget filter → match score → ranked candidates
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
