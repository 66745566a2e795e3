//! Loaded datasets and the active category.
//!
//! A [`Dataset`] is immutable once built. Reloading swaps the whole dataset
//! for a category; records are never edited in place.

pub mod source;

pub use source::{DataSource, Loader, parse_document};

use crate::config::Config;
use crate::error::LoadError;
use debox_types::{Category, PointRecord};
use std::ops::Deref;
use std::sync::Arc;

/// An ordered, shared, read-only list of records.
///
/// Cloning is cheap: clones share the same storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Arc<Vec<PointRecord>>,
}

impl Dataset {
    pub fn new(records: Vec<PointRecord>) -> Self {
        Self {
            records: Arc::new(records),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[PointRecord] {
        &self.records
    }

    pub fn find(&self, id: &str) -> Option<&PointRecord> {
        self.records.iter().find(|record| record.id == id)
    }
}

impl Deref for Dataset {
    type Target = [PointRecord];

    fn deref(&self) -> &Self::Target {
        &self.records
    }
}

impl From<Vec<PointRecord>> for Dataset {
    fn from(records: Vec<PointRecord>) -> Self {
        Self::new(records)
    }
}

/// Outcome of loading every category.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Record count per category that loaded
    pub loaded: Vec<(Category, usize)>,
    /// Categories that failed, replaced by an empty dataset
    pub failures: Vec<(Category, LoadError)>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, category: Category) -> bool {
        self.failures.iter().any(|(c, _)| *c == category)
    }
}

/// The datasets of both categories plus which one is on screen.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    snow: Dataset,
    calcium: Dataset,
    active: Category,
}

impl DataStore {
    /// An empty store showing the default category.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_datasets(snow: Dataset, calcium: Dataset) -> Self {
        Self {
            snow,
            calcium,
            active: Category::default(),
        }
    }

    /// Load one dataset document.
    pub async fn load(loader: &Loader, source: &DataSource) -> Result<Dataset, LoadError> {
        loader.load(source).await
    }

    /// Fetch both categories concurrently without touching any store.
    ///
    /// Neither load waits on the other; both results are returned even if
    /// one fails.
    pub async fn fetch_all(
        loader: &Loader,
        config: &Config,
    ) -> [(Category, Result<Dataset, LoadError>); 2] {
        let fetch = |category: Category| async move {
            let source =
                DataSource::resolve(&config.data_base, config.sources.file_for(category))?;
            Self::load(loader, &source).await
        };

        let (snow, calcium) = tokio::join!(fetch(Category::Snow), fetch(Category::Calcium));
        [(Category::Snow, snow), (Category::Calcium, calcium)]
    }

    /// Load both categories, substituting an empty dataset for each failure.
    pub async fn load_all(&mut self, loader: &Loader, config: &Config) -> LoadReport {
        let mut report = LoadReport::default();

        for (category, result) in Self::fetch_all(loader, config).await {
            match result {
                Ok(dataset) => {
                    report.loaded.push((category, dataset.len()));
                    self.replace(category, dataset);
                }
                Err(e) => {
                    log::error!("{} ({}) load failed: {}", category.label(), category, e);
                    self.replace(category, Dataset::empty());
                    report.failures.push((category, e));
                }
            }
        }

        log::info!(
            "loaded {} snow boxes, {} calcium boxes",
            self.snow.len(),
            self.calcium.len()
        );
        report
    }

    pub fn active_category(&self) -> Category {
        self.active
    }

    /// Switch the active category. Returns `false` if it was already active.
    pub fn set_active_category(&mut self, category: Category) -> bool {
        if self.active == category {
            return false;
        }
        self.active = category;
        true
    }

    /// The dataset of the active category; empty if its load failed.
    pub fn current_dataset(&self) -> &Dataset {
        self.dataset(self.active)
    }

    pub fn dataset(&self, category: Category) -> &Dataset {
        match category {
            Category::Snow => &self.snow,
            Category::Calcium => &self.calcium,
        }
    }

    /// Swap the whole dataset of one category.
    pub fn replace(&mut self, category: Category, dataset: Dataset) {
        match category {
            Category::Snow => self.snow = dataset,
            Category::Calcium => self.calcium = dataset,
        }
    }

    /// True if at least one category has records.
    pub fn has_data(&self) -> bool {
        !self.snow.is_empty() || !self.calcium.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadCause;

    fn dataset(ids: &[&str]) -> Dataset {
        ids.iter()
            .map(|id| PointRecord::new(*id, *id, "d", 37.5, 126.9))
            .collect::<Vec<_>>()
            .into()
    }

    #[test]
    fn test_switch_is_idempotent() {
        let mut store = DataStore::from_datasets(dataset(&["s"]), dataset(&["c1", "c2"]));
        assert_eq!(store.active_category(), Category::Snow);
        assert!(!store.set_active_category(Category::Snow));
        assert!(store.set_active_category(Category::Calcium));
        assert!(!store.set_active_category(Category::Calcium));
        assert_eq!(store.current_dataset().len(), 2);
    }

    #[test]
    fn test_replace_is_wholesale() {
        let mut store = DataStore::from_datasets(dataset(&["a", "b"]), Dataset::empty());
        let before = store.current_dataset().clone();
        store.replace(Category::Snow, dataset(&["c"]));

        assert_eq!(before.len(), 2);
        assert_eq!(store.current_dataset().len(), 1);
        assert_eq!(store.current_dataset().find("c").map(|r| r.id.as_str()), Some("c"));
        assert!(store.current_dataset().find("a").is_none());
    }

    #[test]
    fn test_has_data() {
        assert!(!DataStore::new().has_data());
        assert!(DataStore::from_datasets(Dataset::empty(), dataset(&["c"])).has_data());
    }

    #[tokio::test]
    async fn test_load_all_with_one_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("snow_boxes_final.json"),
            r#"{"items":[{"id":"s1","title":"S","dept":"d","lat":37.5,"lng":126.9}]}"#,
        )
        .unwrap();

        let config = Config::default().with_data_base(dir.path().to_string_lossy());
        let loader = Loader::new(&config).unwrap();
        let mut store = DataStore::new();
        let report = store.load_all(&loader, &config).await;

        assert!(!report.is_complete());
        assert!(report.failed(Category::Calcium));
        assert!(!report.failed(Category::Snow));
        assert!(matches!(report.failures[0].1.cause, LoadCause::Io(_)));
        assert_eq!(store.dataset(Category::Snow).len(), 1);
        assert!(store.dataset(Category::Calcium).is_empty());
        assert!(store.has_data());
    }
}
