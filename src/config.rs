//! Dashboard configuration: where the data lives and how to read it.

use std::path::PathBuf;

use crate::data::loader::HeaderPolicy;
use crate::data::stats::DEFAULT_TOP_N;

/// Relative path of the bundled inflation table.
pub const DEFAULT_DATA_PATH: &str = "inflation_rates.xlsx";

pub const ENV_DATA_PATH: &str = "INFLATION_DATA_PATH";
pub const ENV_STRICT_HEADERS: &str = "INFLATION_STRICT_HEADERS";
pub const ENV_TOP_N: &str = "INFLATION_TOP_N";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub header_policy: HeaderPolicy,
    /// Length of the highest/lowest rankings.
    pub top_n: usize,
    /// Starting amount in the purchasing-power calculator.
    pub default_amount: f64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            header_policy: HeaderPolicy::Positional,
            top_n: DEFAULT_TOP_N,
            default_amount: 1000.0,
        }
    }
}

impl DashboardConfig {
    /// Defaults overlaid with `INFLATION_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = lookup(ENV_DATA_PATH).filter(|p| !p.trim().is_empty()) {
            config.data_path = PathBuf::from(path);
        }

        if let Some(flag) = lookup(ENV_STRICT_HEADERS) {
            if matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes") {
                config.header_policy = HeaderPolicy::Strict;
            }
        }

        if let Some(raw) = lookup(ENV_TOP_N) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.top_n = n,
                _ => log::warn!(
                    "ignoring {ENV_TOP_N}={raw:?}: expected a positive integer, using {}",
                    config.top_n
                ),
            }
        }

        config
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_environment() {
        let config = DashboardConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.data_path, PathBuf::from("inflation_rates.xlsx"));
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn environment_overrides() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_DATA_PATH, "data/rates.parquet"),
            (ENV_STRICT_HEADERS, "TRUE"),
            (ENV_TOP_N, "5"),
        ]));
        assert_eq!(config.data_path, PathBuf::from("data/rates.parquet"));
        assert_eq!(config.header_policy, HeaderPolicy::Strict);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = DashboardConfig::from_lookup(lookup_from(&[
            (ENV_DATA_PATH, "  "),
            (ENV_STRICT_HEADERS, "nope"),
            (ENV_TOP_N, "0"),
        ]));
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn cli_path_wins() {
        let config = DashboardConfig::default().with_data_path("other.json");
        assert_eq!(config.data_path, PathBuf::from("other.json"));
    }
}
