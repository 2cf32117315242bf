//! Session-scoped provider of the loaded dataset.

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::config::DashboardConfig;
use crate::data::loader::{self, HeaderPolicy};
use crate::data::model::Dataset;

/// Loads the inflation table once and hands out the cached snapshot.
///
/// Built once at startup and passed to whoever needs the data. Loading never
/// fails from the caller's point of view: a missing or broken file yields an
/// empty [`Dataset`] carrying a [`LoadNotice`](crate::data::model::LoadNotice).
/// The cache is only dropped through [`invalidate`](Self::invalidate),
/// [`reload`](Self::reload) or [`set_source`](Self::set_source).
#[derive(Debug)]
pub struct DatasetService {
    source: PathBuf,
    header_policy: HeaderPolicy,
    cache: OnceLock<Arc<Dataset>>,
}

impl DatasetService {
    pub fn new(config: &DashboardConfig) -> Self {
        Self {
            source: config.data_path.clone(),
            header_policy: config.header_policy,
            cache: OnceLock::new(),
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// The dataset, loading it on first use.
    pub fn dataset(&self) -> Arc<Dataset> {
        self.cache
            .get_or_init(|| Arc::new(self.load()))
            .clone()
    }

    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Forget the cached dataset; the next [`dataset`](Self::dataset) call
    /// reads the source again.
    pub fn invalidate(&mut self) {
        if self.cache.take().is_some() {
            log::debug!("dropped cached dataset for {}", self.source.display());
        }
    }

    pub fn reload(&mut self) -> Arc<Dataset> {
        self.invalidate();
        self.dataset()
    }

    /// Point the service at another file. Takes effect on the next access.
    pub fn set_source(&mut self, path: impl Into<PathBuf>) {
        self.source = path.into();
        self.invalidate();
    }

    fn load(&self) -> Dataset {
        match loader::load_file(&self.source, self.header_policy) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("Failed to load inflation data: {e:#}");
                Dataset::unavailable(&self.source, &e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::error::ErrorKind;

    fn service_for(path: &Path) -> DatasetService {
        DatasetService::new(&DashboardConfig::default().with_data_path(path))
    }

    #[test]
    fn missing_file_gives_empty_dataset_with_notice() {
        let dir = tempfile::tempdir().unwrap();
        let service = service_for(&dir.path().join("inflation_rates.csv"));

        let ds = service.dataset();
        assert!(ds.is_empty());
        assert_eq!(ds.notice().map(|n| n.kind), Some(ErrorKind::Unavailable));
        assert!(service.is_loaded());
    }

    #[test]
    fn caches_until_invalidated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rates.csv");
        fs::write(&path, "rank,country,continent,rate\n1,A,X,5.0\n").unwrap();

        let mut service = service_for(&path);
        assert!(!service.is_loaded());
        let first = service.dataset();
        assert_eq!(first.len(), 1);

        fs::write(&path, "rank,country,continent,rate\n1,A,X,5.0\n2,B,Y,2.0\n").unwrap();
        let cached = service.dataset();
        assert!(Arc::ptr_eq(&first, &cached));
        assert_eq!(cached.len(), 1);

        service.invalidate();
        assert!(!service.is_loaded());
        assert_eq!(service.dataset().len(), 2);
    }

    #[test]
    fn reload_and_set_source_read_fresh_data() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("good.csv");
        let broken = dir.path().join("broken.csv");
        fs::write(&good, "rank,country,continent,rate\n1,A,X,5.0\n").unwrap();
        fs::write(&broken, "rank,country\n1,A\n").unwrap();

        let mut service = service_for(&good);
        assert_eq!(service.dataset().len(), 1);

        service.set_source(&broken);
        assert!(!service.is_loaded());
        let ds = service.dataset();
        assert!(ds.is_empty());
        assert_eq!(ds.notice().map(|n| n.kind), Some(ErrorKind::Malformed));

        fs::write(&broken, "rank,country,continent,rate\n1,A,X,5.0\n2,B,X,1.0\n").unwrap();
        assert_eq!(service.reload().len(), 2);
        assert_eq!(service.source(), broken.as_path());
    }
}
