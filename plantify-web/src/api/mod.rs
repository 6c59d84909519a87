//! HTTP API handlers for plantify-web

pub mod attributes;
pub mod classify;
pub mod contacts;
pub mod health;
pub mod report;
pub mod status;
pub mod ui;

pub use attributes::get_attributes;
pub use classify::classify;
pub use contacts::{list_contacts, save_contact};
pub use health::health_routes;
pub use report::download_report;
pub use status::get_status;
pub use ui::{serve_app_js, serve_index};
