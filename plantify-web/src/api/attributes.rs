//! Attribute registry endpoint: the dropdowns' single source of truth

use axum::Json;
use serde::Serialize;

use plantify_core::Attribute;

/// One attribute with its closed value set
#[derive(Debug, Serialize)]
pub struct AttributeInfo {
    pub name: &'static str,
    pub label: &'static str,
    pub values: &'static [&'static str],
}

/// GET /api/attributes response
#[derive(Debug, Serialize)]
pub struct AttributesResponse {
    pub attributes: Vec<AttributeInfo>,
}

/// GET /api/attributes
///
/// The eight attributes in canonical order with their legal values.
pub async fn get_attributes() -> Json<AttributesResponse> {
    let attributes = Attribute::ALL
        .iter()
        .map(|a| AttributeInfo {
            name: a.name(),
            label: a.label(),
            values: a.allowed_values(),
        })
        .collect();
    Json(AttributesResponse { attributes })
}
