use askama::Template;
use axum::extract::{Extension, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use super::{is_htmx, render_html, FilterOption};
use crate::chair::{list_submissions, SubmissionEntry};
use crate::extract::FilterParams;
use crate::models::SubmissionStatus;
use crate::state::{AppState, ChairContext};
use crate::utils::countries;

#[derive(Template)]
#[template(path = "submissions_list.html")]
struct SubmissionsListTemplate {
    conference_id: i64,
    conference_title: String,
    submissions: Vec<SubmissionEntry>,
    term: String,
    status_options: Vec<FilterOption>,
    type_options: Vec<FilterOption>,
    country_options: Vec<FilterOption>,
    filter_error: String,
}

#[derive(Template)]
#[template(path = "submissions_table.html")]
struct SubmissionsTableTemplate {
    conference_id: i64,
    submissions: Vec<SubmissionEntry>,
}

pub async fn submissions_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    FilterParams(params): FilterParams,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let conference_id = ctx.conference.id;

    let stypes = state.store.submission_types(conference_id).await.map_err(|e| {
        tracing::error!("Database error fetching submission types: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let records = state.store.submissions(conference_id).await.map_err(|e| {
        tracing::error!("Database error fetching submissions: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let listing = list_submissions(records, &params, &stypes);

    if is_htmx(&headers) {
        return render_html(&SubmissionsTableTemplate {
            conference_id,
            submissions: listing.submissions,
        });
    }

    let filter = &listing.filter;
    let status_options = SubmissionStatus::ALL
        .iter()
        .map(|s| FilterOption {
            value: s.as_str().to_string(),
            label: s.label().to_string(),
            selected: filter.statuses.contains(s),
        })
        .collect();
    let type_options = stypes
        .iter()
        .map(|t| FilterOption {
            value: t.id.to_string(),
            label: format!("{} ({})", t.name, t.language_display()),
            selected: filter.types.contains(&t.id),
        })
        .collect();
    let country_options = countries()
        .iter()
        .map(|(code, label)| FilterOption {
            value: code.to_string(),
            label: label.to_string(),
            selected: filter.countries.iter().any(|c| c == code),
        })
        .collect();

    let template = SubmissionsListTemplate {
        conference_id,
        conference_title: ctx.conference.title(),
        term: filter.term.clone(),
        status_options,
        type_options,
        country_options,
        filter_error: listing.status.error_message(),
        submissions: listing.submissions,
    };

    render_html(&template)
}
