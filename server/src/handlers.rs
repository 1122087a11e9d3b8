//! Action route handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use blink_flow::PurchaseQuery;
use blink_types::{ActionError, PostRequest, ResultEnvelope, StepDescriptor};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing::debug;

use crate::error::ApiError;
use crate::origin::RequestOrigin;
use crate::server::AppState;

// ── Shared ───────────────────────────────────────────────────────────────

/// Liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Empty success; the shared-header layer supplies the CORS headers.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

fn read_body(body: Result<Json<PostRequest>, JsonRejection>) -> Result<PostRequest, ApiError> {
    body.map(|Json(request)| request)
        .map_err(|rejection| ActionError::InvalidBody(rejection.body_text()).into())
}

// ── Collection step ──────────────────────────────────────────────────────

pub async fn describe_collection(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
) -> Json<StepDescriptor> {
    debug!(%origin, "serving collection descriptor");
    Json(state.flow.describe_collection(&origin))
}

pub async fn submit_collection(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
    Query(query): Query<HashMap<String, String>>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    let request = read_body(body)?;
    let envelope = state.flow.collect(&origin, &request, &query).await?;
    Ok(Json(envelope))
}

// ── Purchase step ────────────────────────────────────────────────────────

pub async fn describe_purchase(
    State(state): State<AppState>,
    RequestOrigin(origin): RequestOrigin,
) -> Json<StepDescriptor> {
    debug!(%origin, "serving router-purchase descriptor");
    Json(state.flow.describe_purchase(&origin))
}

pub async fn submit_purchase(
    State(state): State<AppState>,
    Query(mut query): Query<HashMap<String, String>>,
    body: Result<Json<PostRequest>, JsonRejection>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    let request = read_body(body)?;
    let query = PurchaseQuery {
        routers: query.remove("routers"),
        account: query.remove("account"),
    };
    let envelope = state.flow.purchase(&query, &request).await?;
    Ok(Json(envelope))
}
