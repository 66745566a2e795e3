//! Where datasets come from and how they are fetched.

use super::Dataset;
use crate::compute::validation::sanitize_records;
use crate::config::Config;
use crate::error::{LoadCause, LoadError};
use debox_types::PointRecord;
use reqwest::Url;
use serde_json::Value;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A dataset location: an HTTP(S) URL or a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(Url),
    File(PathBuf),
}

impl DataSource {
    /// Resolve a dataset file name against a base.
    ///
    /// A base starting with `http://` or `https://` is a URL and the file is
    /// joined onto it as a path segment; anything else is a directory.
    ///
    /// ```
    /// use debox::store::DataSource;
    ///
    /// let remote = DataSource::resolve("http://localhost:3000/debox", "snow.json").unwrap();
    /// assert_eq!(remote.to_string(), "http://localhost:3000/debox/snow.json");
    ///
    /// let local = DataSource::resolve("public", "snow.json").unwrap();
    /// assert_eq!(local, DataSource::File("public/snow.json".into()));
    /// ```
    pub fn resolve(base: &str, file: &str) -> Result<Self, LoadError> {
        let invalid =
            |reason: String| LoadError::new(format!("{base}/{file}"), LoadCause::InvalidSource(reason));

        if !(base.starts_with("http://") || base.starts_with("https://")) {
            // Absolute names and `..` segments must not leave the directory.
            let escapes = Path::new(file)
                .components()
                .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
            if escapes {
                return Err(invalid("file name resolves outside the data directory".to_string()));
            }
            return Ok(Self::File(PathBuf::from(base).join(file)));
        }

        let mut base_url = Url::parse(base).map_err(|e| invalid(e.to_string()))?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let url = base_url.join(file).map_err(|e| invalid(e.to_string()))?;
        // Absolute names and `..` segments must not leave the base.
        if !url.as_str().starts_with(base_url.as_str()) {
            return Err(invalid("file name resolves outside the base URL".to_string()));
        }
        Ok(Self::Url(url))
    }

    /// Identifier used in logs and errors.
    pub fn origin(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url.as_str()),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetches and parses dataset documents.
///
/// Holds one `reqwest::Client` so repeated loads share a connection pool.
#[derive(Debug, Clone)]
pub struct Loader {
    client: reqwest::Client,
}

impl Loader {
    /// Build a loader honouring the configured fetch timeout.
    pub fn new(config: &Config) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.fetch_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| LoadError::new("http client", LoadCause::Transport(e)))?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Fetch one dataset document.
    ///
    /// Succeeds only if the document is a JSON object whose `items` field is
    /// an array. Items that do not decode as records, or that fail
    /// validation, are dropped with a warning; the rest keep their order.
    pub async fn load(&self, source: &DataSource) -> Result<Dataset, LoadError> {
        let origin = source.origin();
        let bytes = self
            .fetch(source)
            .await
            .map_err(|cause| LoadError::new(origin.clone(), cause))?;
        let records =
            parse_document(&origin, &bytes).map_err(|cause| LoadError::new(origin.clone(), cause))?;
        log::debug!("{}: {} records", origin, records.len());
        Ok(Dataset::new(records))
    }

    async fn fetch(&self, source: &DataSource) -> Result<Vec<u8>, LoadCause> {
        match source {
            DataSource::Url(url) => {
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadCause::Status(status));
                }
                Ok(response.bytes().await?.to_vec())
            }
            DataSource::File(path) => Ok(tokio::fs::read(path).await?),
        }
    }
}

/// Parse a `{ "items": [...] }` document into validated records.
pub fn parse_document(origin: &str, bytes: &[u8]) -> Result<Vec<PointRecord>, LoadCause> {
    let document: Value = serde_json::from_slice(bytes)?;

    let items = match document {
        Value::Object(mut root) => match root.remove("items") {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(LoadCause::Shape("`items` is not an array".to_string())),
            None => return Err(LoadCause::Shape("missing `items` field".to_string())),
        },
        _ => return Err(LoadCause::Shape("document root is not an object".to_string())),
    };

    let total = items.len();
    let decoded: Vec<PointRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("{}: skipping item {}: {}", origin, index, e);
                None
            }
        })
        .collect();

    if decoded.len() < total {
        log::warn!(
            "{}: decoded {} of {} items",
            origin,
            decoded.len(),
            total
        );
    }

    Ok(sanitize_records(origin, decoded))
}
