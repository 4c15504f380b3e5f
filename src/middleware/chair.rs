use std::collections::HashMap;

use axum::{
    extract::{Path, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::config::is_valid_token;
use crate::state::{AppState, ChairContext};

fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "error": error,
            "message": message
        })
        .to_string(),
    )
        .into_response()
}

fn unauthorized(message: &str) -> Response {
    error_response(StatusCode::UNAUTHORIZED, "Unauthorized", message)
}

/// Resolve the Bearer token of a request to a user id.
pub fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<i64, Response> {
    let auth_header = headers.get(header::AUTHORIZATION).ok_or_else(|| {
        unauthorized("Missing Authorization header. Please provide a Bearer token.")
    })?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| unauthorized("Invalid Authorization header format."))?;

    let provided_token = auth_str
        .strip_prefix("Bearer ")
        .ok_or_else(|| {
            unauthorized(
                "Authorization header must use Bearer scheme (e.g., 'Authorization: Bearer <token>').",
            )
        })?
        .trim();

    if !is_valid_token(provided_token) {
        return Err(unauthorized("Invalid token format."));
    }

    state
        .config
        .chair_tokens
        .get(provided_token)
        .copied()
        .ok_or_else(|| unauthorized("Invalid or expired token."))
}

/// Chair authorization middleware
///
/// Runs as a route layer on every `/chair/{pk}/...` and `/api/chair/{pk}/...`
/// route. The caller must present a known Bearer token whose user chairs
/// conference `pk`; on success a [`ChairContext`] is attached to the request.
pub async fn require_chair(
    State(state): State<AppState>,
    Path(params): Path<HashMap<String, String>>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Response {
    let user_id = match authenticate(&state, &headers) {
        Ok(user_id) => user_id,
        Err(response) => {
            tracing::warn!("Rejected chair request to {}", request.uri().path());
            return response;
        }
    };

    let conference_id = match params.get("pk").map(|pk| pk.parse::<i64>()) {
        Some(Ok(id)) => id,
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Bad Request",
                "Conference id must be a number.",
            )
        }
    };

    let conference = match state.store.conference(conference_id).await {
        Ok(Some(conference)) => conference,
        Ok(None) => {
            return error_response(StatusCode::NOT_FOUND, "Not Found", "Conference not found.")
        }
        Err(e) => {
            tracing::error!("Failed to fetch conference {}: {:?}", conference_id, e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match state.store.is_chair(conference_id, user_id).await {
        Ok(true) => {}
        Ok(false) => {
            tracing::warn!("User {} is not a chair of conference {}", user_id, conference_id);
            return error_response(
                StatusCode::FORBIDDEN,
                "Forbidden",
                "Only chairs of this conference may access this page.",
            );
        }
        Err(e) => {
            tracing::error!("Failed to check chair role: {:?}", e);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    request.extensions_mut().insert(ChairContext { user_id, conference });

    next.run(request).await
}
