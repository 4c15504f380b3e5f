pub mod dashboard;
pub mod exports;
pub mod submissions;
pub mod users;

pub use dashboard::*;
pub use exports::*;
pub use submissions::*;
pub use users::*;

use askama::Template;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

/// One choice in a filter form control
pub(crate) struct FilterOption {
    value: String,
    label: String,
    selected: bool,
}

pub(crate) fn render_html<T: Template>(template: &T) -> Result<Response, StatusCode> {
    match template.render() {
        Ok(html) => Ok(Html(html).into_response()),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// HTMX requests only want the table, not the whole page
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}
