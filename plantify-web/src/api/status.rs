//! Service status endpoint: build, catalog, and model statistics

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// GET /api/status response
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub module: String,
    pub version: String,
    pub git_hash: String,
    pub build_timestamp: String,
    pub catalog: CatalogStatus,
    pub model: ModelStatus,
}

#[derive(Debug, Serialize)]
pub struct CatalogStatus {
    pub schema_version: u32,
    pub rows: usize,
    pub distinct_tuples: usize,
    pub shadowed_rows: usize,
    pub species: usize,
    pub families: usize,
}

#[derive(Debug, Serialize)]
pub struct ModelStatus {
    pub feature_columns: usize,
    pub classes: usize,
    pub leaves: usize,
    /// Seeded k-fold number kept for continuity; not a quality measure
    pub display_accuracy_percent: f32,
}

/// GET /api/status
pub async fn get_status(State(state): State<AppState>) -> Json<StatusResponse> {
    let catalog = state.resolver.catalog();
    Json(StatusResponse {
        module: "plantify-web".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: env!("GIT_HASH").to_string(),
        build_timestamp: env!("BUILD_TIMESTAMP").to_string(),
        catalog: CatalogStatus {
            schema_version: catalog.version(),
            rows: catalog.entries().len(),
            distinct_tuples: catalog.resolved_len(),
            shadowed_rows: catalog.shadowed_rows(),
            species: catalog.distinct_species(),
            families: catalog.family_count(),
        },
        model: ModelStatus {
            feature_columns: state.resolver.feature_width(),
            classes: state.resolver.class_count(),
            leaves: state.resolver.leaf_count(),
            display_accuracy_percent: state.display_accuracy,
        },
    })
}
