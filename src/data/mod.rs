/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  raw cells → typed records, drop unparseable rates
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<CountryInflationRecord> + load report
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  filter   │ ───▶ │  stats    │  continent aggregates, top-N, summary
///   └──────────┘      └──────────┘
///        │                 │
///        ▼                 ▼
///   ┌──────────────────────────────┐
///   │  export                       │  views and aggregates as JSON
///   └──────────────────────────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
