//! Error types for loading, searching and configuring the viewer.

use thiserror::Error;

/// Crate-wide result alias over [`ViewerError`].
pub type Result<T, E = ViewerError> = std::result::Result<T, E>;

/// A dataset could not be loaded.
///
/// Always carries the identifier of the source (URL or path) so the caller
/// can tell which category went missing.
#[derive(Debug, Error)]
#[error("failed to load {origin}: {cause}")]
pub struct LoadError {
    pub origin: String,
    #[source]
    pub cause: LoadCause,
}

impl LoadError {
    pub fn new(origin: impl Into<String>, cause: LoadCause) -> Self {
        Self {
            origin: origin.into(),
            cause,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadCause {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {0}")]
    Status(reqwest::StatusCode),
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected document shape: {0}")]
    Shape(String),
    #[error("invalid source: {0}")]
    InvalidSource(String),
}

/// Keyword search failures, surfaced to the user as-is.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search keyword is empty")]
    EmptyKeyword,
    #[error("no results for '{keyword}'")]
    NoResult { keyword: String },
    #[error("geocoder failed: {0}")]
    Geocoder(String),
}

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Invalid(String),
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
    #[cfg(feature = "toml")]
    #[error("invalid TOML configuration: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[cfg(feature = "toml")]
    #[error("failed to write TOML configuration: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no dataset could be loaded")]
    NoData,
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Search(#[from] SearchError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// A record rejected during load validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    #[error("record has an empty id")]
    EmptyId,
    #[error("record {id}: coordinates must be finite, got ({lat}, {lng})")]
    NonFinite { id: String, lat: f64, lng: f64 },
    #[error("record {id}: latitude out of range [-90.0, 90.0]: {lat}")]
    LatitudeOutOfRange { id: String, lat: f64 },
    #[error("record {id}: longitude out of range [-180.0, 180.0]: {lng}")]
    LongitudeOutOfRange { id: String, lng: f64 },
}
