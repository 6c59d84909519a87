//! Contact book endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::contacts::Contact;
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/contacts request body; absent fields become empty strings
/// so the store's own validation names what is missing
#[derive(Debug, Deserialize)]
pub struct SaveContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

/// GET /api/contacts response
#[derive(Debug, Serialize)]
pub struct ContactListResponse {
    pub contacts: Vec<Contact>,
}

/// POST /api/contacts
pub async fn save_contact(
    State(state): State<AppState>,
    Json(request): Json<SaveContactRequest>,
) -> ApiResult<Json<Value>> {
    let contact = Contact {
        name: request.name,
        phone: request.phone,
        email: request.email,
    };
    state.contacts.save(&contact).await?;
    Ok(Json(json!({ "status": "saved" })))
}

/// GET /api/contacts
pub async fn list_contacts(State(state): State<AppState>) -> ApiResult<Json<ContactListResponse>> {
    let contacts = state.contacts.list().await?;
    Ok(Json(ContactListResponse { contacts }))
}
