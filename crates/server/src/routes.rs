//! HTTP routes.
//!
//! Endpoints, all under the base path:
//! - GET  /{file}                          - dataset document `{items: [...]}`
//! - GET  /api/viewport                    - markers and visible count for a viewport
//! - GET  /api/markers/{category}/{id}     - popup for one marker
//! - GET  /api/search?keyword=             - recenter target for a keyword
//! - GET  /api/stats                       - record counts
//! - POST /api/reload                      - refetch both datasets

use crate::error::ApiError;
use crate::state::SharedState;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use debox::search::resolve_keyword;
use debox::{
    Bounds, Category, HeadlessMap, InfoWindow, LatLng, Marker, PointRecord, StatusLine, Viewport,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub fn router(state: SharedState) -> Router {
    let routes = Router::new()
        .route("/api/viewport", get(viewport))
        .route("/api/markers/:category/:id", get(marker_detail))
        .route("/api/search", get(search))
        .route("/api/stats", get(stats))
        .route("/api/reload", post(reload))
        .route("/:file", get(dataset_file));

    let routes = if state.base_path() == "/" {
        routes
    } else {
        Router::new().nest(state.base_path(), routes)
    };
    routes.with_state(state)
}

#[derive(Serialize)]
struct ItemsDocument<'a> {
    items: &'a [PointRecord],
}

async fn dataset_file(
    State(state): State<SharedState>,
    Path(file): Path<String>,
) -> Result<Response, ApiError> {
    let category = state
        .config()
        .sources
        .category_for(&file)
        .ok_or_else(|| ApiError::NotFound(format!("no dataset named {file}")))?;

    let dataset = state.dataset(category);
    Ok(Json(ItemsDocument {
        items: dataset.records(),
    })
    .into_response())
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ResponseFormat {
    #[default]
    Json,
    Geojson,
}

#[derive(Debug, Deserialize)]
struct ViewportQuery {
    #[serde(default)]
    category: Category,
    lat: f64,
    lng: f64,
    south: f64,
    west: f64,
    north: f64,
    east: f64,
    #[serde(default)]
    format: ResponseFormat,
}

#[derive(Serialize)]
struct ViewportResponse {
    category: Category,
    label: String,
    visible_count: usize,
    markers: Vec<Marker>,
}

async fn viewport(
    State(state): State<SharedState>,
    query: Result<Query<ViewportQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let center = LatLng::new(query.lat, query.lng);
    if !center.is_valid() {
        return Err(ApiError::BadRequest(format!("center out of range: {center}")));
    }
    let bounds = Bounds::try_new(query.south, query.west, query.north, query.east)
        .ok_or_else(|| ApiError::BadRequest("south/west must not exceed north/east".to_string()))?;

    let category = query.category;
    let dataset = state.dataset(category);
    let renderer = state.renderer();

    if let ResponseFormat::Geojson = query.format {
        let selection = renderer.select_nearest(&center, &dataset);
        let mut collection = debox_types::record::to_feature_collection(selection);
        let mut members = geojson::JsonObject::new();
        members.insert("category".to_string(), category.as_str().into());
        members.insert("label".to_string(), category.label().into());
        members.insert(
            "visible_count".to_string(),
            renderer.count_within(&bounds, &dataset).into(),
        );
        collection.foreign_members = Some(members);
        return Ok(Json(collection).into_response());
    }

    let viewport = Viewport::new(center, bounds);
    let mut map = HeadlessMap::new(viewport, state.config().initial_level);
    let mut status = StatusLine::default();
    let summary = renderer.refresh(&viewport, &dataset, category, &mut map, &mut status);
    debug!(
        "viewport {} {}: {} markers, {} visible",
        category, center, summary.placed, summary.visible
    );

    Ok(Json(ViewportResponse {
        category,
        label: status.label,
        visible_count: status.visible_count,
        markers: map.into_markers(),
    })
    .into_response())
}

#[derive(Serialize)]
struct MarkerDetail {
    marker: Marker,
    info_window: InfoWindow,
}

async fn marker_detail(
    State(state): State<SharedState>,
    Path((category, id)): Path<(String, String)>,
) -> Result<Json<MarkerDetail>, ApiError> {
    let category: Category = category
        .parse()
        .map_err(|_| ApiError::NotFound(format!("unknown category {category}")))?;

    let dataset = state.dataset(category);
    let record = dataset
        .find(&id)
        .ok_or_else(|| ApiError::NotFound(format!("no {} with id {id}", category.label())))?;

    let marker = Marker::for_record(record, category);
    let info_window = marker.open();
    Ok(Json(MarkerDetail { marker, info_window }))
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    keyword: String,
}

#[derive(Serialize)]
struct SearchResponse {
    place_name: String,
    center: LatLng,
    level: u8,
}

async fn search(
    State(state): State<SharedState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query?;
    let keyword = debox::search::normalize_keyword(&query.keyword)?;
    let geocoder = state.geocoder().ok_or(ApiError::SearchUnavailable)?;

    let place = resolve_keyword(geocoder, keyword).await?;
    debug!("search '{}' -> {}", keyword, place.position);
    Ok(Json(SearchResponse {
        place_name: place.name,
        center: place.position,
        level: state.config().search_level,
    }))
}

#[derive(Serialize)]
struct CategoryStats {
    category: Category,
    label: &'static str,
    file: String,
    count: usize,
}

#[derive(Serialize)]
struct StatsResponse {
    max_markers: usize,
    categories: Vec<CategoryStats>,
}

async fn stats(State(state): State<SharedState>) -> Json<StatsResponse> {
    let categories = Category::ALL
        .into_iter()
        .map(|category| CategoryStats {
            category,
            label: category.label(),
            file: state.config().sources.file_for(category).to_string(),
            count: state.dataset(category).len(),
        })
        .collect();

    Json(StatsResponse {
        max_markers: state.renderer().max_markers(),
        categories,
    })
}

#[derive(Serialize)]
struct LoadedCategory {
    category: Category,
    count: usize,
}

#[derive(Serialize)]
struct FailedCategory {
    category: Category,
    error: String,
}

#[derive(Serialize)]
struct ReloadResponse {
    loaded: Vec<LoadedCategory>,
    failures: Vec<FailedCategory>,
}

async fn reload(State(state): State<SharedState>) -> Json<ReloadResponse> {
    let report = state.reload().await;
    Json(ReloadResponse {
        loaded: report
            .loaded
            .into_iter()
            .map(|(category, count)| LoadedCategory { category, count })
            .collect(),
        failures: report
            .failures
            .into_iter()
            .map(|(category, e)| FailedCategory {
                category,
                error: e.to_string(),
            })
            .collect(),
    })
}
