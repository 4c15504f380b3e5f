use axum::extract::{rejection::QueryRejection, FromRequestParts, Query};
use axum::http::request::Parts;

/// Raw query-string pairs in request order, keys may repeat.
///
/// Filters are parsed from these so that an invalid value can be ignored
/// instead of rejecting the whole request.
#[derive(Debug, Clone, Default)]
pub struct FilterParams(pub Vec<(String, String)>);

impl<S> FromRequestParts<S> for FilterParams
where
    S: Send + Sync,
{
    type Rejection = QueryRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::from_request_parts(parts, state).await?;
        Ok(FilterParams(pairs))
    }
}
