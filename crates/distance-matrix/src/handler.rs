//! Distance Matrix Handler
//!
//! Validate a caller's origin/destination pair, query the upstream distance
//! matrix API once and translate its reply into a [`DistanceResponse`].

use anyhow::Context;
use bytes::Bytes;
use http_body_util::Empty;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::config::ProxyConfig;
use crate::provider::Provider;
use crate::response::DistanceResponse;
use crate::upstream::{MatrixResponse, UpstreamQuery};
use crate::{Error, Result, failed_precondition, invalid_argument};

const SERVICE: &str = "distance-matrix";

/// Payload of a `distanceMatrix` invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistanceRequest {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl DistanceRequest {
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>) -> Self {
        Self { origin: Some(origin.into()), destination: Some(destination.into()) }
    }

    fn validate(&self) -> Result<(&str, &str)> {
        let origin = self.origin.as_deref().filter(|s| !s.is_empty());
        let destination = self.destination.as_deref().filter(|s| !s.is_empty());

        match (origin, destination) {
            (Some(origin), Some(destination)) => Ok((origin, destination)),
            _ => Err(invalid_argument!("origin and destination required")),
        }
    }
}

/// Stateless proxy in front of the upstream distance matrix API.
#[derive(Debug)]
pub struct DistanceProxy<P> {
    config: ProxyConfig,
    provider: P,
}

impl<P: Provider> DistanceProxy<P> {
    #[must_use]
    pub const fn new(config: ProxyConfig, provider: P) -> Self {
        Self { config, provider }
    }

    #[must_use]
    pub const fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// Handle one `distanceMatrix` invocation.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidArgument`] when origin or destination is missing.
    /// * [`Error::FailedPrecondition`] when no API key is configured.
    /// * [`Error::Internal`] when the upstream call fails, times out, or
    ///   returns a body that cannot be decoded.
    pub async fn invoke(&self, request: DistanceRequest) -> Result<DistanceResponse> {
        info!(monotonic_counter.distance_requests = 1, service = %SERVICE);

        let result = handle(&self.config, &request, &self.provider).await;

        match &result {
            Ok(DistanceResponse::Route(_)) => {}
            Ok(DistanceResponse::Unavailable { status }) => {
                warn!(monotonic_counter.distance_unavailable = 1, status = %status, service = %SERVICE);
            }
            Err(e @ Error::Internal(_)) => {
                error!(monotonic_counter.processing_errors = 1, error = %e, service = %SERVICE);
            }
            Err(e) => {
                warn!(monotonic_counter.rejected_requests = 1, error = %e, service = %SERVICE);
            }
        }

        result
    }
}

async fn handle(
    config: &ProxyConfig, request: &DistanceRequest, provider: &impl Provider,
) -> Result<DistanceResponse> {
    let (origins, destinations) = request.validate()?;
    let Some(key) = config.api_key.as_deref() else {
        return Err(failed_precondition!("API key missing on server"));
    };

    let query = UpstreamQuery {
        origins,
        destinations,
        departure_time: provider.now().timestamp(),
        key,
    };

    let matrix = fetch(config, &query, provider).await?;
    if let Some(message) = &matrix.error_message {
        warn!(status = ?matrix.status, error_message = %message, service = %SERVICE);
    }

    matrix.normalize()
}

async fn fetch(
    config: &ProxyConfig, query: &UpstreamQuery<'_>, provider: &impl Provider,
) -> Result<MatrixResponse> {
    let request = http::Request::builder()
        .uri(query.uri(&config.endpoint))
        .body(Empty::<Bytes>::new())
        .context("building distance matrix request")?;

    let response = tokio::time::timeout(config.timeout, provider.fetch(request))
        .await
        .with_context(|| format!("distance matrix request timed out after {:?}", config.timeout))?
        .context("fetching distance matrix")?;

    let status = response.status();
    let body = response.into_body();
    let matrix = serde_json::from_slice(&body)
        .with_context(|| format!("decoding distance matrix response (HTTP {status})"))?;

    Ok(matrix)
}
