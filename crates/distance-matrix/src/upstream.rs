//! Upstream distance matrix API
//!
//! Query construction and the decoded reply of the provider's distance
//! matrix endpoint.

use serde::Deserialize;
use tracing::debug;

use crate::response::{DistanceResponse, RouteDistance};
use crate::{Error, Result};

/// Status value reported by the provider on success.
pub const OK: &str = "OK";

/// Soft-failure status used when the provider reported nothing more specific.
pub const ERROR: &str = "ERROR";

const UNITS: &str = "metric";
const MODE: &str = "driving";
const TRAFFIC_MODEL: &str = "best_guess";

/// A single origin/destination query with the fixed travel policy applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamQuery<'a> {
    pub origins: &'a str,
    pub destinations: &'a str,
    /// Seconds since the Unix epoch.
    pub departure_time: i64,
    pub key: &'a str,
}

impl UpstreamQuery<'_> {
    /// Full request URI against `endpoint`, with every value percent-encoded.
    #[must_use]
    pub fn uri(&self, endpoint: &str) -> String {
        let departure_time = self.departure_time.to_string();
        let params = [
            ("origins", self.origins),
            ("destinations", self.destinations),
            ("units", UNITS),
            ("mode", MODE),
            ("departure_time", departure_time.as_str()),
            ("traffic_model", TRAFFIC_MODEL),
            ("key", self.key),
        ];

        let query = params
            .iter()
            .map(|(name, value)| format!("{name}={}", urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");

        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{endpoint}{separator}{query}")
    }
}

/// Decoded distance matrix reply.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatrixResponse {
    pub status: Option<String>,
    pub error_message: Option<String>,
    #[serde(default)]
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Row {
    #[serde(default)]
    pub elements: Vec<Element>,
}

/// Result for one origin/destination pair.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Element {
    pub status: Option<String>,
    pub distance: Option<Distance>,
    pub duration: Option<Duration>,
    pub duration_in_traffic: Option<Duration>,
}

/// Distance in meters with its localized display text.
#[derive(Debug, Clone, Deserialize)]
pub struct Distance {
    pub value: u64,
    pub text: String,
}

/// Travel time. Only the display text is returned to callers.
#[derive(Debug, Clone, Deserialize)]
pub struct Duration {
    pub value: Option<u64>,
    pub text: String,
}

impl MatrixResponse {
    /// The first origin/destination pair, the only one this proxy queries.
    #[must_use]
    pub fn first_element(&self) -> Option<&Element> {
        self.rows.first().and_then(|row| row.elements.first())
    }

    fn element_count(&self) -> usize {
        self.rows.iter().map(|row| row.elements.len()).sum()
    }

    /// Translate the provider reply into the caller-facing response.
    ///
    /// Provider-reported failures become [`DistanceResponse::Unavailable`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Internal`] when an `OK` element is missing its
    /// distance or duration.
    pub fn normalize(self) -> Result<DistanceResponse> {
        if self.element_count() > 1 {
            debug!(elements = self.element_count(), "ignoring all but the first matrix element");
        }

        let top_status = self.status.as_deref();
        let element = self.first_element();
        let element_status = element.and_then(|e| e.status.as_deref());

        if top_status != Some(OK) || element_status != Some(OK) {
            let status = element_status
                .filter(|s| *s != OK)
                .or_else(|| top_status.filter(|s| *s != OK))
                .unwrap_or(ERROR);
            return Ok(DistanceResponse::unavailable(status));
        }

        let Some(element) = element else {
            return Ok(DistanceResponse::unavailable(ERROR));
        };
        let Some(distance) = &element.distance else {
            return Err(Error::Internal("OK element has no distance".to_string()));
        };
        let Some(duration) = element.duration_in_traffic.as_ref().or(element.duration.as_ref())
        else {
            return Err(Error::Internal("OK element has no duration".to_string()));
        };

        Ok(DistanceResponse::Route(RouteDistance {
            distance_meters: distance.value,
            distance_text: distance.text.clone(),
            duration_text: duration.text.clone(),
        }))
    }
}
