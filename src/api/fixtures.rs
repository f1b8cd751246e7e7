use crate::fixtures::{FeatureCollection, FixtureStore};
use crate::palette::{ColorScale, LayerKind, Thresholds};
use axum::{extract::State, response::Json, routing::get, Router};
use serde::Serialize;
use std::sync::Arc;

/// Shared state for the map data endpoints
pub struct FixtureAppState {
    pub store: Arc<FixtureStore>,
}

/// Legend entry for one layer
#[derive(Serialize)]
pub struct LayerInfo {
    pub id: LayerKind,
    pub label: &'static str,
    pub description: &'static str,
    pub thresholds: Thresholds,
    pub colors: ColorScale,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    features: usize,
}

/// Create router for map data and health
pub fn create_fixture_router(state: Arc<FixtureAppState>) -> Router {
    Router::new()
        .route("/api/fixtures", get(get_fixtures))
        .route("/api/layers", get(list_layers))
        .route("/health", get(health))
        .with_state(state)
}

/// GET /api/fixtures - FeatureCollection rendered by the map view
async fn get_fixtures(State(state): State<Arc<FixtureAppState>>) -> Json<FeatureCollection> {
    Json(state.store.collection())
}

/// GET /api/layers - Layer legend in display order
async fn list_layers() -> Json<Vec<LayerInfo>> {
    let layers = LayerKind::ALL
        .into_iter()
        .map(|layer| LayerInfo {
            id: layer,
            label: layer.label(),
            description: layer.description(),
            thresholds: layer.thresholds(),
            colors: layer.colors(),
        })
        .collect();
    Json(layers)
}

/// GET /health
async fn health(State(state): State<Arc<FixtureAppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        features: state.store.len(),
    })
}
