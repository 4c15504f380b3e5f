use axum::http::{header, HeaderMap};

/// Work out the public origin (`scheme://host`) of the current request.
///
/// A configured base URL always wins. Otherwise the `Host` header is used,
/// with the scheme taken from `X-Forwarded-Proto` when a proxy sets it.
/// Both headers come from the client, so production deployments should set
/// `PUBLIC_BASE_URL` rather than rely on them.
pub fn request_base_url(configured: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(base) = configured {
        return base.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.split(',').next().unwrap_or("http").trim())
        .filter(|s| *s == "http" || *s == "https")
        .unwrap_or("http");

    format!("{}://{}", scheme, host)
}

/// Absolute URL of the manuscript download endpoint for a submission
///
/// # Examples
/// ```
/// use chairdesk::utils::manuscript_download_url;
///
/// assert_eq!(
///     manuscript_download_url("https://dccn.example.org", 42),
///     "https://dccn.example.org/submissions/42/download/"
/// );
/// ```
pub fn manuscript_download_url(base_url: &str, submission_id: i64) -> String {
    format!(
        "{}/submissions/{}/download/",
        base_url.trim_end_matches('/'),
        submission_id
    )
}
