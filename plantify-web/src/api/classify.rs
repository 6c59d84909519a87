//! Classification endpoint

use axum::{extract::State, Json};

use plantify_core::{Resolution, TraitSelection};

use crate::error::ApiResult;
use crate::AppState;

/// POST /api/classify
///
/// Body: the eight trait fields as a JSON object. Missing fields
/// deserialize as empty strings and are rejected by validation with the
/// field named. Returns the full resolution: species, family,
/// confidence, advisory flag, taxonomy, and family details.
pub async fn classify(
    State(state): State<AppState>,
    Json(selection): Json<TraitSelection>,
) -> ApiResult<Json<Resolution>> {
    let resolution = state.resolver.resolve(&selection)?;
    Ok(Json(resolution))
}
