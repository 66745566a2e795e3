//! Geocoding through the Kakao Local keyword search REST API.

use super::{Geocoder, Place};
use crate::error::SearchError;
use debox_types::LatLng;
use reqwest::Url;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

pub const KAKAO_KEYWORD_ENDPOINT: &str = "https://dapi.kakao.com/v2/local/search/keyword.json";

/// Kakao Local keyword search client.
///
/// Sends `GET <endpoint>?query=<keyword>` with `Authorization: KakaoAK <key>`.
#[derive(Debug, Clone)]
pub struct KakaoGeocoder {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct KeywordResponse {
    documents: Vec<Document>,
}

/// Coordinates arrive as decimal strings, `x` = longitude and `y` = latitude.
#[derive(Debug, Deserialize)]
struct Document {
    place_name: String,
    x: String,
    y: String,
}

impl Document {
    fn into_place(self) -> Option<Place> {
        let lng = self.x.trim().parse::<f64>().ok()?;
        let lat = self.y.trim().parse::<f64>().ok()?;
        let position = LatLng::new(lat, lng);
        position.is_valid().then(|| Place::new(self.place_name, position))
    }
}

impl KakaoGeocoder {
    pub fn new(api_key: impl Into<String>) -> Result<Self, SearchError> {
        let endpoint = Url::parse(KAKAO_KEYWORD_ENDPOINT)
            .map_err(|e| SearchError::Geocoder(e.to_string()))?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key: api_key.into(),
        })
    }

    /// Point the client at another endpoint, e.g. a local stand-in.
    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    fn request_url(&self, keyword: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("query", keyword);
        url
    }
}

impl Geocoder for KakaoGeocoder {
    async fn geocode(&self, keyword: &str) -> Result<Vec<Place>, SearchError> {
        let response = self
            .client
            .get(self.request_url(keyword))
            .header(AUTHORIZATION, format!("KakaoAK {}", self.api_key))
            .send()
            .await
            .map_err(|e| SearchError::Geocoder(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Geocoder(format!("keyword search returned {status}")));
        }

        let body: KeywordResponse = response
            .json()
            .await
            .map_err(|e| SearchError::Geocoder(e.to_string()))?;

        Ok(body
            .documents
            .into_iter()
            .filter_map(|document| {
                let name = document.place_name.clone();
                let place = document.into_place();
                if place.is_none() {
                    log::warn!("skipping search result '{}' with bad coordinates", name);
                }
                place
            })
            .collect())
    }
}
