/// Data layer: facility records, loading, aggregation and filtering.
///
/// Architecture:
/// ```text
///  .csv (;) / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → FacilityTable (coordinates may be missing)
///   └──────────┘
///        │  FacilityDataset::clean
///        ▼
///   ┌─────────────────┐
///   │ FacilityDataset │  Vec<Facility>, every row located
///   └─────────────────┘
///        │
///        ├──────────────► aggregate  value counts per state / municipality
///        │                    │
///        ▼                    ▼
///   ┌──────────┐        at_least(threshold), histogram
///   │  filter   │  selected states → StateFilter
///   └──────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
