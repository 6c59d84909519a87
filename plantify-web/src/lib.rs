//! plantify-web library - herb classifier web service
//!
//! Serves the classifier UI and JSON API over the immutable resolver
//! built at startup, plus the contact book and report collaborators.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use plantify_core::Resolver;

pub mod api;
pub mod config;
pub mod contacts;
pub mod error;
pub mod report;

use contacts::ContactStore;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Catalog-backed classifier, immutable after startup
    pub resolver: Arc<Resolver>,
    /// Append-only contact book
    pub contacts: Arc<ContactStore>,
    /// Non-diagnostic cross-validated accuracy computed at startup
    pub display_accuracy: f32,
}

impl AppState {
    /// Create new application state
    pub fn new(resolver: Arc<Resolver>, contacts: Arc<ContactStore>, display_accuracy: f32) -> Self {
        Self {
            resolver,
            contacts,
            display_accuracy,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/status", get(api::get_status))
        .route("/api/attributes", get(api::get_attributes))
        .route("/api/classify", post(api::classify))
        .route("/api/report", get(api::download_report))
        .route("/api/contacts", get(api::list_contacts).post(api::save_contact))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
