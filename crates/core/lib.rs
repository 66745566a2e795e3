//! Map viewer core for snow-removal and calcium-chloride box locations.
//!
//! ## Features
//! - **Datasets**: two categories fetched concurrently from files or HTTP, validated on load
//! - **Nearest selection**: at most `max_markers` markers, closest to the map center first
//! - **Visible count**: records inside the viewport bounds, edges included
//! - **Search**: keyword geocoding to recenter the map
//!
//! The map widget itself stays outside: it implements [`MapSurface`] and
//! [`StatusDisplay`] and calls [`Viewer::on_idle`] whenever it settles.
//!
//! ```rust
//! use debox::prelude::*;
//!
//! let snow = Dataset::new(vec![
//!     PointRecord::new("S-1", "세종로 제설함", "종로구청", 37.5760, 126.9770),
//!     PointRecord::new("S-2", "사직로 제설함", "종로구청", 37.5740, 126.9700),
//! ]);
//! let store = DataStore::from_datasets(snow, Dataset::empty());
//!
//! let config = Config::default();
//! let map = HeadlessMap::around(config.initial_center, 0.01, config.initial_level);
//! let mut viewer = Viewer::with_store(config, store, map, StatusLine::default())?;
//! assert_eq!(viewer.map().markers().len(), 2);
//!
//! // Calcium has no data: switching shows an empty map, not an error.
//! viewer.switch_category(Category::Calcium);
//! assert_eq!(viewer.display().visible_count, 0);
//! # Ok::<(), debox::ViewerError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod render;
pub mod search;
pub mod store;
pub mod viewer;

pub use config::{Config, SourceFiles};
pub use error::{ConfigError, LoadCause, LoadError, RecordError, Result, SearchError, ViewerError};
pub use render::{
    DetailPayload, HeadlessMap, InfoWindow, MapSurface, Marker, MarkerImage, RefreshSummary,
    StatusDisplay, StatusLine, Viewport, ViewportRenderer,
};
pub use search::{Geocoder, KakaoGeocoder, Place};
pub use store::{DataSource, DataStore, Dataset, LoadReport, Loader};
pub use viewer::{Viewer, ViewerEvent};

pub use debox_types::{Bounds, Category, LatLng, PointRecord};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {
    pub use crate::{Config, Result, ViewerError};

    pub use crate::{Bounds, Category, LatLng, PointRecord};

    pub use crate::{DataStore, Dataset, Loader};

    pub use crate::{HeadlessMap, MapSurface, StatusDisplay, StatusLine, Viewport, ViewportRenderer};

    pub use crate::{Geocoder, Place, Viewer, ViewerEvent};
}
