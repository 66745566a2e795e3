//! Keyword search: turn free text into a place to recenter on.

pub mod kakao;

pub use kakao::KakaoGeocoder;

use crate::error::SearchError;
use debox_types::LatLng;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// A geocoding hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub name: String,
    pub position: LatLng,
}

impl Place {
    pub fn new(name: impl Into<String>, position: LatLng) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Resolves keywords to places, best match first.
pub trait Geocoder {
    /// Returns an empty list when nothing matched.
    fn geocode(&self, keyword: &str) -> impl Future<Output = Result<Vec<Place>, SearchError>> + Send;
}

/// Trim a raw keyword; blank input is an error.
pub fn normalize_keyword(raw: &str) -> Result<&str, SearchError> {
    let keyword = raw.trim();
    if keyword.is_empty() {
        return Err(SearchError::EmptyKeyword);
    }
    Ok(keyword)
}

/// The best match for `raw`, or [`SearchError::NoResult`].
///
/// Blank keywords are rejected before the geocoder is called.
pub async fn resolve_keyword<G>(geocoder: &G, raw: &str) -> Result<Place, SearchError>
where
    G: Geocoder,
{
    let keyword = normalize_keyword(raw)?;
    let places = geocoder.geocode(keyword).await?;
    places.into_iter().next().ok_or_else(|| {
        log::info!("no search results for '{}'", keyword);
        SearchError::NoResult {
            keyword: keyword.to_string(),
        }
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers from a fixed table and counts calls.
    #[derive(Default)]
    pub(crate) struct TableGeocoder {
        pub entries: Vec<(String, Place)>,
        pub calls: AtomicUsize,
    }

    impl TableGeocoder {
        pub fn with(keyword: &str, place: Place) -> Self {
            Self {
                entries: vec![(keyword.to_string(), place)],
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Geocoder for TableGeocoder {
        async fn geocode(&self, keyword: &str) -> Result<Vec<Place>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .entries
                .iter()
                .filter(|(k, _)| k == keyword)
                .map(|(_, place)| place.clone())
                .collect())
        }
    }

    #[test]
    fn test_normalize_keyword() {
        assert_eq!(normalize_keyword("  광화문 ").unwrap(), "광화문");
        assert!(matches!(normalize_keyword(" \t"), Err(SearchError::EmptyKeyword)));
    }

    #[tokio::test]
    async fn test_resolve_first_result() {
        let place = Place::new("광화문", LatLng::new(37.5759, 126.9768));
        let geocoder = TableGeocoder::with("광화문", place.clone());
        assert_eq!(resolve_keyword(&geocoder, " 광화문").await.unwrap(), place);
    }

    #[tokio::test]
    async fn test_blank_keyword_skips_geocoder() {
        let geocoder = TableGeocoder::default();
        let err = resolve_keyword(&geocoder, "   ").await.unwrap_err();
        assert!(matches!(err, SearchError::EmptyKeyword));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_no_result() {
        let geocoder = TableGeocoder::default();
        let err = resolve_keyword(&geocoder, "nowhere").await.unwrap_err();
        assert!(matches!(err, SearchError::NoResult { keyword } if keyword == "nowhere"));
        assert_eq!(geocoder.calls.load(Ordering::SeqCst), 1);
    }
}
