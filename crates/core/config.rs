//! Viewer configuration
//!
//! Everything the viewer needs besides the datasets themselves: where to
//! fetch them from, how many markers to draw and where the map starts.
use crate::error::ConfigError;
use debox_types::{Category, LatLng};
use std::time::Duration;

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Hard cap on markers placed at once
    #[serde(default = "Config::default_max_markers")]
    pub max_markers: usize,

    #[serde(default = "Config::default_initial_center")]
    pub initial_center: LatLng,

    /// Zoom level the map opens at
    #[serde(default = "Config::default_level")]
    pub initial_level: u8,

    /// Zoom level applied after a successful keyword search
    #[serde(default = "Config::default_level")]
    pub search_level: u8,

    /// Directory or `http(s)://` base URL the dataset files are resolved against
    #[serde(default = "Config::default_data_base")]
    pub data_base: String,

    #[serde(default)]
    pub sources: SourceFiles,

    /// Per-request timeout for HTTP dataset fetches; no timeout when unset
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,
}

/// Dataset file names, one per category
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFiles {
    #[serde(default = "SourceFiles::default_snow")]
    pub snow: String,
    #[serde(default = "SourceFiles::default_calcium")]
    pub calcium: String,
}

impl SourceFiles {
    fn default_snow() -> String {
        "snow_boxes_final.json".to_string()
    }

    fn default_calcium() -> String {
        "calcium_final.json".to_string()
    }

    pub fn file_for(&self, category: Category) -> &str {
        match category {
            Category::Snow => &self.snow,
            Category::Calcium => &self.calcium,
        }
    }

    /// Reverse lookup used when serving files by name.
    pub fn category_for(&self, file: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|category| self.file_for(*category) == file)
    }
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            snow: Self::default_snow(),
            calcium: Self::default_calcium(),
        }
    }
}

impl Config {
    pub const MAX_MARKERS: usize = 200;

    /// Zoom levels the map widget accepts, closest first.
    pub const LEVELS: std::ops::RangeInclusive<u8> = 1..=14;

    const fn default_max_markers() -> usize {
        Self::MAX_MARKERS
    }

    /// Gwanghwamun
    fn default_initial_center() -> LatLng {
        LatLng::new(37.5759, 126.9768)
    }

    const fn default_level() -> u8 {
        5
    }

    fn default_data_base() -> String {
        "public".to_string()
    }

    pub fn with_max_markers(mut self, max_markers: usize) -> Self {
        assert!(max_markers > 0, "Max markers must be greater than zero");
        self.max_markers = max_markers;
        self
    }

    pub fn with_initial_center(mut self, center: LatLng) -> Self {
        self.initial_center = center;
        self
    }

    pub fn with_data_base(mut self, base: impl Into<String>) -> Self {
        self.data_base = base.into();
        self
    }

    pub fn with_sources(mut self, sources: SourceFiles) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout_secs = Some(timeout.as_secs().max(1));
        self
    }

    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_markers == 0 {
            return Err(ConfigError::Invalid(
                "max_markers must be greater than zero".to_string(),
            ));
        }

        if !self.initial_center.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "initial_center out of range: {}",
                self.initial_center
            )));
        }

        for (name, level) in [
            ("initial_level", self.initial_level),
            ("search_level", self.search_level),
        ] {
            if !Self::LEVELS.contains(&level) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within {}..={}, got {level}",
                    Self::LEVELS.start(),
                    Self::LEVELS.end()
                )));
            }
        }

        if self.sources.snow.trim().is_empty() || self.sources.calcium.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "dataset file names must not be empty".to_string(),
            ));
        }

        if self.sources.snow == self.sources.calcium {
            return Err(ConfigError::Invalid(
                "snow and calcium datasets must use different files".to_string(),
            ));
        }

        if self.fetch_timeout_secs == Some(0) {
            return Err(ConfigError::Invalid(
                "fetch_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_markers: Self::default_max_markers(),
            initial_center: Self::default_initial_center(),
            initial_level: Self::default_level(),
            search_level: Self::default_level(),
            data_base: Self::default_data_base(),
            sources: SourceFiles::default(),
            fetch_timeout_secs: None,
        }
    }
}
