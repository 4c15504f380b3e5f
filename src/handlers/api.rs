use axum::{
    extract::{Extension, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{IntoParams, Modify, OpenApi, ToSchema};

use crate::chair::{
    list_submissions, list_users, AuthorEntry, StatusCount, SubmissionEntry, UserEntry,
};
use crate::extract::FilterParams;
use crate::state::{AppState, ChairContext};

/// Query parameters understood by the submissions listing.
///
/// Invalid combinations are not an error: the listing is returned unfiltered
/// and `filter_error` explains what was ignored.
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct SubmissionListQuery {
    /// Case-insensitive search in titles and author names
    pub term: Option<String>,
    /// Repeatable: submitted, under_review, accepted, rejected
    pub status: Option<Vec<String>>,
    /// Repeatable submission type id
    #[serde(rename = "type")]
    pub stype: Option<Vec<i64>>,
    /// Repeatable ISO 3166-1 alpha-2 author country code
    pub country: Option<Vec<String>>,
}

/// Query parameters understood by the users listing
#[derive(Debug, Deserialize, IntoParams)]
#[allow(dead_code)]
pub struct UserListQuery {
    /// Case-insensitive search in names, email and affiliation
    pub term: Option<String>,
    /// Repeatable ISO 3166-1 alpha-2 country code
    pub country: Option<Vec<String>>,
    /// any, participants or non_participants
    pub participation: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubmissionListResponse {
    pub conference_id: i64,
    pub filter_applied: bool,
    pub filter_error: Option<String>,
    pub submissions: Vec<SubmissionEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub conference_id: i64,
    pub filter_applied: bool,
    pub filter_error: Option<String>,
    pub users: Vec<UserEntry>,
}

fn filter_error(message: String) -> Option<String> {
    Some(message).filter(|m| !m.is_empty())
}

#[utoipa::path(
    get,
    path = "/api/chair/{pk}/submissions",
    tag = "chair",
    params(("pk" = i64, Path, description = "Conference ID"), SubmissionListQuery),
    responses(
        (status = 200, description = "Submissions of the conference", body = SubmissionListResponse),
        (status = 401, description = "Missing or unknown token"),
        (status = 403, description = "Caller is not a chair of the conference"),
        (status = 404, description = "Conference not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer" = []))
)]
pub async fn api_list_submissions(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    FilterParams(params): FilterParams,
) -> Result<Json<SubmissionListResponse>, StatusCode> {
    let conference_id = ctx.conference.id;

    let stypes = state.store.submission_types(conference_id).await.map_err(|e| {
        tracing::error!("Failed to fetch submission types: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let records = state.store.submissions(conference_id).await.map_err(|e| {
        tracing::error!("Failed to fetch submissions: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let listing = list_submissions(records, &params, &stypes);
    let error = filter_error(listing.status.error_message());

    Ok(Json(SubmissionListResponse {
        conference_id,
        filter_applied: error.is_none(),
        filter_error: error,
        submissions: listing.submissions,
    }))
}

#[utoipa::path(
    get,
    path = "/api/chair/{pk}/users",
    tag = "chair",
    params(("pk" = i64, Path, description = "Conference ID"), UserListQuery),
    responses(
        (status = 200, description = "All users with their participation in the conference", body = UserListResponse),
        (status = 401, description = "Missing or unknown token"),
        (status = 403, description = "Caller is not a chair of the conference"),
        (status = 404, description = "Conference not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer" = []))
)]
pub async fn api_list_users(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    FilterParams(params): FilterParams,
) -> Result<Json<UserListResponse>, StatusCode> {
    let conference_id = ctx.conference.id;

    let members = state.store.members().await.map_err(|e| {
        tracing::error!("Failed to fetch users: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let counts = state.store.authorship_counts(conference_id).await.map_err(|e| {
        tracing::error!("Failed to count authorships: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let listing = list_users(members, &counts, &params);
    let error = filter_error(listing.status.error_message());

    Ok(Json(UserListResponse {
        conference_id,
        filter_applied: error.is_none(),
        filter_error: error,
        users: listing.users,
    }))
}

#[derive(OpenApi)]
#[openapi(
    paths(api_list_submissions, api_list_users),
    components(schemas(
        SubmissionListResponse,
        UserListResponse,
        SubmissionEntry,
        AuthorEntry,
        UserEntry,
        StatusCount
    )),
    modifiers(&BearerAuth),
    tags((name = "chair", description = "Conference chair listings"))
)]
pub struct ApiDoc;

struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Bearer).build()),
            );
        }
    }
}
