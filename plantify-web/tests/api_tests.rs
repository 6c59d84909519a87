//! Integration tests for plantify-web API endpoints
//!
//! Tests cover:
//! - Health endpoint
//! - Attribute registry listing
//! - Classification happy paths, validation failures, and determinism
//! - Report download
//! - Contact book save/list and validation
//! - Status endpoint catalog/model statistics
//! - Embedded UI serving

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot` method

use plantify_core::{crossval, Resolver};
use plantify_web::{build_router, contacts::ContactStore, AppState};

/// Test helper: create app over an isolated data folder
fn setup_app(data_folder: &std::path::Path) -> axum::Router {
    let resolver = Arc::new(Resolver::from_embedded().expect("embedded catalog should load"));
    let display_accuracy =
        crossval::display_accuracy(resolver.catalog()).expect("cross-validation should run");
    let contacts = Arc::new(ContactStore::new(data_folder));
    build_router(AppState::new(resolver, contacts, display_accuracy))
}

/// Test helper: GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: POST request with a JSON body
fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

fn holy_basil_selection() -> Value {
    json!({
        "leaf_arrangement": "opposite",
        "flower_symmetry": "actinomorphic",
        "petal_number": "5",
        "ovary_position": "superior",
        "habit": "herb",
        "fruit_type": "nutlet",
        "leaf_shape": "simple",
        "inflorescence_type": "spike"
    })
}

// =============================================================================
// Health Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "plantify-web");
    assert!(body["version"].is_string());
}

// =============================================================================
// Attribute Registry Tests
// =============================================================================

#[tokio::test]
async fn test_attributes_listing() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app.oneshot(get("/api/attributes")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    let attributes = body["attributes"].as_array().unwrap();
    assert_eq!(attributes.len(), 8);
    assert_eq!(attributes[0]["name"], "leaf_arrangement");
    assert_eq!(attributes[0]["label"], "Leaf Arrangement");
    assert_eq!(
        attributes[2]["values"],
        json!(["3", "4", "5", "6"])
    );
    assert_eq!(attributes[7]["name"], "inflorescence_type");
}

// =============================================================================
// Classification Tests
// =============================================================================

#[tokio::test]
async fn test_classify_holy_basil() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app
        .oneshot(post_json("/api/classify", &holy_basil_selection()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["species"], "Ocimum tenuiflorum");
    assert_eq!(body["family"], "Lamiaceae");
    assert_eq!(body["confidence"], 1.0);
    assert_eq!(body["low_confidence"], false);
    assert_eq!(body["taxonomy"]["order"], "Lamiales");
    assert_eq!(body["taxonomy"]["genus"], "Ocimum");
    assert!(body["family_info"]["description"].is_string());
}

#[tokio::test]
async fn test_classify_shared_tuple_uses_first_definition() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let selection = json!({
        "leaf_arrangement": "alternate",
        "flower_symmetry": "actinomorphic",
        "petal_number": "4",
        "ovary_position": "inferior",
        "habit": "herb",
        "fruit_type": "schizocarp",
        "leaf_shape": "pinnate",
        "inflorescence_type": "umbel"
    });
    let response = app
        .oneshot(post_json("/api/classify", &selection))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["species"], "Eryngium foetidum");
    assert_eq!(body["family"], "Apiaceae");
}

#[tokio::test]
async fn test_classify_rejects_out_of_set_value() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let mut selection = holy_basil_selection();
    selection["petal_number"] = json!("7");
    let response = app
        .oneshot(post_json("/api/classify", &selection))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_FIELD");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("petal_number"));
}

#[tokio::test]
async fn test_classify_names_missing_field() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let mut selection = holy_basil_selection();
    selection.as_object_mut().unwrap().remove("habit");
    let response = app
        .oneshot(post_json("/api/classify", &selection))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "MISSING_FIELD");
    assert!(body["error"]["message"].as_str().unwrap().contains("habit"));
}

#[tokio::test]
async fn test_classify_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let first = app
        .clone()
        .oneshot(post_json("/api/classify", &holy_basil_selection()))
        .await
        .unwrap();
    let second = app
        .oneshot(post_json("/api/classify", &holy_basil_selection()))
        .await
        .unwrap();

    let first = extract_json(first.into_body()).await;
    let second = extract_json(second.into_body()).await;
    assert_eq!(first, second);
}

// =============================================================================
// Report Tests
// =============================================================================

const HOLY_BASIL_QUERY: &str = "leaf_arrangement=opposite&flower_symmetry=actinomorphic\
&petal_number=5&ovary_position=superior&habit=herb&fruit_type=nutlet&leaf_shape=simple\
&inflorescence_type=spike";

#[tokio::test]
async fn test_report_download() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app
        .oneshot(get(&format!("/api/report?{HOLY_BASIL_QUERY}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/pdf"
    );
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("Ocimum_tenuiflorum_classification_report.pdf"));

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_report_rejects_invalid_query() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let uri = format!(
        "/api/report?{}",
        HOLY_BASIL_QUERY.replace("petal_number=5", "petal_number=7")
    );
    let response = app.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Contact Book Tests
// =============================================================================

#[tokio::test]
async fn test_contact_save_and_list() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let contact = json!({
        "name": "Dr. Rao",
        "phone": "",
        "email": "rao@example.com"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/contacts", &contact))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "saved");

    let response = app.oneshot(get("/api/contacts")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    let contacts = body["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["name"], "Dr. Rao");
    assert_eq!(contacts[0]["phone"], "");
    assert_eq!(contacts[0]["email"], "rao@example.com");
}

#[tokio::test]
async fn test_contact_requires_a_detail() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let contact = json!({ "name": "Dr. Rao", "phone": "", "email": "" });
    let response = app
        .clone()
        .oneshot(post_json("/api/contacts", &contact))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_CONTACT");

    // Nothing was persisted
    let response = app.oneshot(get("/api/contacts")).await.unwrap();
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["contacts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_contact_requires_name() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let contact = json!({ "phone": "044-2866", "email": "" });
    let response = app
        .oneshot(post_json("/api/contacts", &contact))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"]["code"], "INVALID_CONTACT");
}

// =============================================================================
// Status Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_status_reports_catalog_and_model() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app.oneshot(get("/api/status")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["module"], "plantify-web");
    assert!(body["git_hash"].is_string());
    assert_eq!(body["catalog"]["rows"], 93);
    assert_eq!(body["catalog"]["distinct_tuples"], 27);
    assert_eq!(body["catalog"]["shadowed_rows"], 66);
    assert_eq!(body["catalog"]["species"], 93);
    assert_eq!(body["catalog"]["families"], 9);
    assert_eq!(body["model"]["feature_columns"], 31);
    assert_eq!(body["model"]["classes"], 27);
    assert_eq!(body["model"]["display_accuracy_percent"], 0.0);
}

// =============================================================================
// UI Serving Tests
// =============================================================================

#[tokio::test]
async fn test_index_serves_ui() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("PLANTIFY!"));
    assert!(html.contains("/static/app.js"));
}

#[tokio::test]
async fn test_app_js_served_with_content_type() {
    let dir = tempfile::tempdir().unwrap();
    let app = setup_app(dir.path());

    let response = app.oneshot(get("/static/app.js")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/javascript"
    );
}
