//! Classification report download endpoint

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use plantify_core::TraitSelection;

use crate::error::ApiResult;
use crate::report::{render_report, report_filename};
use crate::AppState;

/// GET /api/report
///
/// The eight trait fields as query parameters. Resolves the selection
/// and returns the rendered report as a PDF attachment named after the
/// species.
pub async fn download_report(
    State(state): State<AppState>,
    Query(selection): Query<TraitSelection>,
) -> ApiResult<Response> {
    let resolution = state.resolver.resolve(&selection)?;
    let bytes = render_report(&resolution, &selection)?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        report_filename(&resolution.species)
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
