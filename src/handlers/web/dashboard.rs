use askama::Template;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::Response;

use super::render_html;
use crate::chair::{summarize, ConferenceSummary};
use crate::state::{AppState, ChairContext};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    conference_id: i64,
    conference_title: String,
    full_name: String,
    summary: ConferenceSummary,
}

pub async fn dashboard(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
) -> Result<Response, StatusCode> {
    let conference_id = ctx.conference.id;

    let records = state.store.submissions(conference_id).await.map_err(|e| {
        tracing::error!("Database error fetching submissions: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let stypes = state.store.submission_types(conference_id).await.map_err(|e| {
        tracing::error!("Database error fetching submission types: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let template = DashboardTemplate {
        conference_id,
        conference_title: ctx.conference.title(),
        full_name: ctx.conference.full_name.clone(),
        summary: summarize(&records, &stypes),
    };

    render_html(&template)
}
