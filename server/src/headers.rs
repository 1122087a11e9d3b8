//! Headers every action response carries, errors and preflights included.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::ActionHeaders;

pub const X_ACTION_VERSION: HeaderName = HeaderName::from_static("x-action-version");
pub const X_BLOCKCHAIN_IDS: HeaderName = HeaderName::from_static("x-blockchain-ids");

pub const ALLOW_ORIGIN: &str = "*";
pub const ALLOW_METHODS: &str = "GET, POST, PUT, OPTIONS";
pub const ALLOW_HEADERS: &str = "Content-Type, Authorization, Content-Encoding, Accept-Encoding";

/// Attach the CORS and action-protocol headers to every response of `router`,
/// overriding anything a handler set.
pub fn with_action_headers<S>(router: Router<S>, headers: &ActionHeaders) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static(ALLOW_ORIGIN),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOW_METHODS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static(ALLOW_HEADERS),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                X_ACTION_VERSION,
                headers.action_version.clone(),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                X_BLOCKCHAIN_IDS,
                headers.blockchain_ids.clone(),
            )),
    )
}
