//! Shared server state: the loaded datasets and what is needed to reload them.

use debox::{
    Category, Config, DataStore, Dataset, KakaoGeocoder, LoadReport, Loader, ViewportRenderer,
};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    config: Config,
    loader: Loader,
    renderer: ViewportRenderer,
    store: RwLock<DataStore>,
    geocoder: Option<KakaoGeocoder>,
    base_path: String,
}

impl AppState {
    pub fn new(config: Config, loader: Loader, store: DataStore) -> Self {
        Self {
            renderer: ViewportRenderer::from_config(&config),
            config,
            loader,
            store: RwLock::new(store),
            geocoder: None,
            base_path: "/debox".to_string(),
        }
    }

    pub fn with_geocoder(mut self, geocoder: KakaoGeocoder) -> Self {
        self.geocoder = Some(geocoder);
        self
    }

    /// Mount point of every route. Normalized to a leading slash and no
    /// trailing slash; `/` mounts at the root.
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        let trimmed = base_path.trim().trim_matches('/');
        self.base_path = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{trimmed}")
        };
        self
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(self)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn renderer(&self) -> &ViewportRenderer {
        &self.renderer
    }

    pub fn geocoder(&self) -> Option<&KakaoGeocoder> {
        self.geocoder.as_ref()
    }

    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// A handle to one category's records. The read lock is released
    /// before the caller touches the data.
    pub fn dataset(&self, category: Category) -> Dataset {
        self.store.read().dataset(category).clone()
    }

    /// Fetch both datasets again and swap in the ones that loaded.
    ///
    /// A category whose fetch fails keeps serving its previous records.
    pub async fn reload(&self) -> LoadReport {
        let results = DataStore::fetch_all(&self.loader, &self.config).await;

        let mut report = LoadReport::default();
        {
            let mut store = self.store.write();
            for (category, result) in results {
                match result {
                    Ok(dataset) => {
                        report.loaded.push((category, dataset.len()));
                        store.replace(category, dataset);
                    }
                    Err(e) => {
                        warn!("reload of {} failed, keeping previous data: {}", category, e);
                        report.failures.push((category, e));
                    }
                }
            }
        }

        info!(
            "reload finished: {} loaded, {} failed",
            report.loaded.len(),
            report.failures.len()
        );
        report
    }
}
