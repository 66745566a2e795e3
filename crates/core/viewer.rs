//! Session controller tying the store, renderer and map surface together.

use crate::config::Config;
use crate::error::{Result, SearchError, ViewerError};
use crate::render::{MapSurface, RefreshSummary, StatusDisplay, ViewportRenderer, Viewport};
use crate::search::{Geocoder, Place, resolve_keyword};
use crate::store::{DataStore, LoadReport, Loader};
use debox_types::Category;

/// Synchronous events a map adapter forwards to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerEvent {
    /// The map settled after a pan or zoom; read the viewport from the surface.
    Idle,
    /// The map settled and reported its viewport directly.
    ViewportChanged(Viewport),
    /// The user picked a category tab.
    SwitchCategory(Category),
}

/// One map session.
///
/// Owns the datasets, the renderer and both output adapters. Every method
/// runs to completion before the next event is handled; nothing here is
/// shared between threads.
pub struct Viewer<M, D> {
    config: Config,
    store: DataStore,
    renderer: ViewportRenderer,
    map: M,
    display: D,
}

impl<M, D> Viewer<M, D>
where
    M: MapSurface,
    D: StatusDisplay,
{
    /// Load both datasets and draw the first frame.
    ///
    /// A category that fails to load is shown as empty. Fails with
    /// [`ViewerError::NoData`] only when every category is empty.
    pub async fn start(config: Config, map: M, display: D) -> Result<Self> {
        config.validate()?;
        let loader = Loader::new(&config)?;
        let mut store = DataStore::new();
        store.load_all(&loader, &config).await;
        Self::with_store(config, store, map, display)
    }

    /// Build a viewer over an already filled store and draw the first frame.
    pub fn with_store(config: Config, store: DataStore, map: M, display: D) -> Result<Self> {
        if !store.has_data() {
            log::error!("no dataset loaded, not showing the map");
            return Err(ViewerError::NoData);
        }

        let mut viewer = Self {
            renderer: ViewportRenderer::from_config(&config),
            config,
            store,
            map,
            display,
        };
        viewer.on_idle();
        Ok(viewer)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn active_category(&self) -> Category {
        self.store.active_category()
    }

    /// Re-render for the surface's current viewport.
    pub fn on_idle(&mut self) -> RefreshSummary {
        let viewport = self.map.viewport();
        self.on_viewport_change(viewport)
    }

    /// Re-render the active dataset for `viewport`.
    pub fn on_viewport_change(&mut self, viewport: Viewport) -> RefreshSummary {
        let category = self.store.active_category();
        self.renderer.refresh(
            &viewport,
            self.store.dataset(category),
            category,
            &mut self.map,
            &mut self.display,
        )
    }

    /// Show another category using the data already in memory.
    ///
    /// Returns `None` when `category` was already active.
    pub fn switch_category(&mut self, category: Category) -> Option<RefreshSummary> {
        if !self.store.set_active_category(category) {
            return None;
        }
        let summary = self.on_idle();
        log::info!("switched to {}", category.label());
        Some(summary)
    }

    pub fn handle(&mut self, event: ViewerEvent) -> Option<RefreshSummary> {
        match event {
            ViewerEvent::Idle => Some(self.on_idle()),
            ViewerEvent::ViewportChanged(viewport) => Some(self.on_viewport_change(viewport)),
            ViewerEvent::SwitchCategory(category) => self.switch_category(category),
        }
    }

    /// Recenter on the best match for `keyword` at the search zoom level.
    ///
    /// Does not refresh: the surface reports idle once it has moved, and
    /// that notification redraws. On error the map is left untouched.
    pub async fn search<G>(&mut self, geocoder: &G, keyword: &str) -> Result<Place, SearchError>
    where
        G: Geocoder,
    {
        let place = resolve_keyword(geocoder, keyword).await?;
        self.map.set_center(place.position);
        self.map.set_level(self.config.search_level);
        log::info!("search '{}' -> {} {}", keyword.trim(), place.name, place.position);
        Ok(place)
    }

    /// Fetch both datasets again, swap them in wholesale and redraw.
    pub async fn reload(&mut self, loader: &Loader) -> LoadReport {
        let report = self.store.load_all(loader, &self.config).await;
        self.on_idle();
        report
    }

    pub fn into_parts(self) -> (DataStore, M, D) {
        (self.store, self.map, self.display)
    }
}
