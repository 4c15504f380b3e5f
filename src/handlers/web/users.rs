use askama::Template;
use axum::extract::{Extension, Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::Response;

use super::{is_htmx, render_html, FilterOption};
use crate::chair::{list_users, submissions_of, user_entry, SubmissionEntry, UserEntry};
use crate::extract::FilterParams;
use crate::filters::Participation;
use crate::models::MemberActivity;
use crate::state::{AppState, ChairContext};
use crate::utils::countries;

#[derive(Template)]
#[template(path = "users_list.html")]
struct UsersListTemplate {
    conference_id: i64,
    conference_title: String,
    users: Vec<UserEntry>,
    term: String,
    participation_options: Vec<FilterOption>,
    country_options: Vec<FilterOption>,
    filter_error: String,
}

#[derive(Template)]
#[template(path = "users_table.html")]
struct UsersTableTemplate {
    conference_id: i64,
    users: Vec<UserEntry>,
}

#[derive(Template)]
#[template(path = "user_details.html")]
struct UserDetailsTemplate {
    conference_id: i64,
    conference_title: String,
    member: UserEntry,
    email: String,
    submissions: Vec<SubmissionEntry>,
}

pub async fn users_list(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    FilterParams(params): FilterParams,
    headers: HeaderMap,
) -> Result<Response, StatusCode> {
    let conference_id = ctx.conference.id;

    let members = state.store.members().await.map_err(|e| {
        tracing::error!("Database error fetching users: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let counts = state.store.authorship_counts(conference_id).await.map_err(|e| {
        tracing::error!("Database error counting authorships: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let listing = list_users(members, &counts, &params);

    if is_htmx(&headers) {
        return render_html(&UsersTableTemplate {
            conference_id,
            users: listing.users,
        });
    }

    let filter = &listing.filter;
    let participation_options = [
        (Participation::Any, "Everyone"),
        (Participation::Participants, "Authors in this conference"),
        (Participation::NonParticipants, "Not authors in this conference"),
    ]
    .into_iter()
    .map(|(value, label)| FilterOption {
        value: value.as_str().to_string(),
        label: label.to_string(),
        selected: filter.participation == value,
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

    let template = UsersListTemplate {
        conference_id,
        conference_title: ctx.conference.title(),
        term: filter.term.clone(),
        participation_options,
        country_options,
        filter_error: listing.status.error_message(),
        users: listing.users,
    };

    render_html(&template)
}

pub async fn user_details(
    State(state): State<AppState>,
    Extension(ctx): Extension<ChairContext>,
    Path((_pk, user_pk)): Path<(i64, i64)>,
) -> Result<Response, StatusCode> {
    let conference_id = ctx.conference.id;

    let member = state
        .store
        .member(user_pk)
        .await
        .map_err(|e| {
            tracing::error!("Database error fetching user {}: {:?}", user_pk, e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or(StatusCode::NOT_FOUND)?;

    let records = state.store.submissions(conference_id).await.map_err(|e| {
        tracing::error!("Database error fetching submissions: {:?}", e);
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let submissions = submissions_of(&records, user_pk);

    let email = member.email().to_string();
    let activity = MemberActivity {
        member,
        num_submissions: submissions.len(),
    };

    let template = UserDetailsTemplate {
        conference_id,
        conference_title: ctx.conference.title(),
        member: user_entry(&activity),
        email,
        submissions,
    };

    render_html(&template)
}
