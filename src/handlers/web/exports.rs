use axum::extract::{Extension, State};
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::Local;

use crate::chair::{authors_csv, export_filename, submissions_csv, ExportEntity};
use crate::state::{AppState, ChairContext};
use crate::utils::request_base_url;

/// Wrap CSV bytes into an attachment response
fn csv_response(entity: ExportEntity, body: Vec<u8>) -> Result<Response, StatusCode> {
    let filename = export_filename(entity, Local::now().naive_local());

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("text/csv"));
    let disposition = format!("attachment; filename=\"{}\"", filename);
    let content_disposition =
        HeaderValue::from_str(&disposition).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    headers.insert(header::CONTENT_DISPOSITION, content_disposition);

    tracing::info!("Exported {} ({} bytes)", filename, body.len());
    Ok((headers, body).into_response())
}

pub async fn get_submissions_csv(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let records = state
        .store
        .submissions(ctx.conference.id)
        .await
        .map_err(|e| {
            tracing::error!("Database error fetching submissions: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let base_url = request_base_url(state.config.public_base_url.as_deref(), &headers);
    let body = submissions_csv(&records, &base_url).map_err(|e| {
        tracing::error!("Failed to write submissions CSV: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    csv_response(ExportEntity::Submissions, body)
}

pub async fn get_authors_csv(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
) -> Result<Response, StatusCode> {
    let members = state.store.members().await.map_err(|e| {
        tracing::error!("Database error fetching users: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let counts = state
        .store
        .authorship_counts(ctx.conference.id)
        .await
        .map_err(|e| {
            tracing::error!("Database error counting authorships: {:?}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let body = authors_csv(&members, &counts).map_err(|e| {
        tracing::error!("Failed to write authors CSV: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    csv_response(ExportEntity::Authors, body)
}
