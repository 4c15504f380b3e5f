use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{self, ApiDoc};
use crate::middleware::require_chair;
use crate::state::AppState;

/// Build the application router.
///
/// Every `/chair/{pk}` and `/api/chair/{pk}` route sits behind
/// [`require_chair`], so handlers can rely on a `ChairContext` extension.
pub fn create_app(state: AppState) -> Router {
    let chair_routes = Router::new()
        // Web views
        .route("/chair/{pk}/", get(handlers::dashboard))
        .route("/chair/{pk}/submissions", get(handlers::submissions_list))
        .route("/chair/{pk}/users", get(handlers::users_list))
        .route("/chair/{pk}/users/{user_pk}", get(handlers::user_details))
        // CSV exports
        .route("/chair/{pk}/export/submissions", get(handlers::get_submissions_csv))
        .route("/chair/{pk}/export/authors", get(handlers::get_authors_csv))
        // JSON API
        .route("/api/chair/{pk}/submissions", get(handlers::api_list_submissions))
        .route("/api/chair/{pk}/users", get(handlers::api_list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_chair));

    Router::new()
        .route("/", get(root))
        .merge(chair_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "chairdesk"
}
