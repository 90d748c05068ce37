//! Callable HTTP surface for `distanceMatrix`.
//!
//! Requests arrive as `{"data": {...}}`. Results are wrapped as
//! `{"result": ...}` and faults as `{"error": {"status", "message", "details"}}`.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use bytes::Bytes;
use distance_matrix::{DistanceProxy, DistanceRequest, DistanceResponse, Error, Provider};
use serde::{Deserialize, Serialize};

const INTERNAL_MESSAGE: &str = "Server error";

/// Build the host router around a shared proxy.
pub fn router<P: Provider + 'static>(proxy: Arc<DistanceProxy<P>>) -> Router {
    Router::new()
        .route("/distanceMatrix", post(distance_matrix::<P>))
        .route("/health", get(health))
        .with_state(proxy)
}

#[derive(Debug, Default, Deserialize)]
struct CallableRequest {
    #[serde(default)]
    data: Option<DistanceRequest>,
}

#[derive(Debug, Serialize)]
struct CallableResult {
    result: DistanceResponse,
}

async fn distance_matrix<P: Provider + 'static>(
    State(proxy): State<Arc<DistanceProxy<P>>>, body: Bytes,
) -> Result<Json<CallableResult>, CallableError> {
    let request: CallableRequest = serde_json::from_slice(&body)
        .map_err(|e| Error::InvalidArgument(format!("invalid request body: {e}")))?;

    let result = proxy.invoke(request.data.unwrap_or_default()).await?;
    Ok(Json(CallableResult { result }))
}

async fn health() -> &'static str {
    "OK"
}

/// Callable error envelope.
#[derive(Debug)]
pub struct CallableError(Error);

impl From<Error> for CallableError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    status: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl IntoResponse for CallableError {
    fn into_response(self) -> Response {
        let error = match &self.0 {
            Error::InvalidArgument(message) => {
                ErrorBody { status: "INVALID_ARGUMENT", message: message.as_str(), details: None }
            }
            Error::FailedPrecondition(message) => {
                ErrorBody { status: "FAILED_PRECONDITION", message: message.as_str(), details: None }
            }
            Error::Internal(details) => {
                ErrorBody { status: "INTERNAL", message: INTERNAL_MESSAGE, details: Some(details.as_str()) }
            }
        };
        let body = serde_json::json!({ "error": error });

        (self.0.status(), Json(body)).into_response()
    }
}
