//! Request origin used for absolute URLs in descriptors.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::HOST;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use std::convert::Infallible;

use crate::server::AppState;

const X_FORWARDED_PROTO: &str = "x-forwarded-proto";
const X_FORWARDED_HOST: &str = "x-forwarded-host";

/// `scheme://host` of the current request, without a trailing slash.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestOrigin(pub String);

/// A configured public origin wins; otherwise the origin is rebuilt from
/// proxy headers (only when `trust_forwarded` is set), then `Host`.
pub fn resolve_origin(
    public_origin: Option<&str>,
    trust_forwarded: bool,
    headers: &HeaderMap,
) -> String {
    if let Some(origin) = public_origin {
        return origin.to_string();
    }
    let forwarded = |name: &str| trust_forwarded.then(|| first_value(headers, name)).flatten();
    let scheme = forwarded(X_FORWARDED_PROTO).unwrap_or("http");
    let host = forwarded(X_FORWARDED_HOST)
        .or_else(|| first_value(headers, HOST.as_str()))
        .unwrap_or("localhost");
    format!("{scheme}://{host}")
}

// Proxies may append comma-separated hops; the first is the client-facing one.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)?
        .to_str()
        .ok()?
        .split(',')
        .map(str::trim)
        .find(|v| !v.is_empty())
}

#[async_trait]
impl FromRequestParts<AppState> for RequestOrigin {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(RequestOrigin(resolve_origin(
            state.public_origin.as_deref(),
            state.trust_forwarded_headers,
            &parts.headers,
        )))
    }
}
