//! Inflation Pulse: dataset service behind the global inflation dashboard.
//!
//! The library owns everything that is not drawing: loading the country
//! table, cleaning it into typed records, and the pure queries the dashboard
//! renders (filter views, continent aggregates, rankings, headline summary and
//! purchasing power).

pub mod config;
pub mod data;
pub mod error;
pub mod service;

pub use config::DashboardConfig;
pub use data::export::{export_continent_stats, export_records};
pub use data::filter::{filter_by_continent_and_range, RecordFilter};
pub use data::loader::HeaderPolicy;
pub use data::model::{CountryInflationRecord, Dataset, LoadNotice, LoadReport, Rank};
pub use data::stats::{
    continent_stats, summary, top_n, ContinentStats, DatasetSummary, PurchasingPower, SortOrder,
    Verdict, DEFAULT_TOP_N,
};
pub use error::{DatasetError, ErrorKind};
pub use service::DatasetService;
