use serde::{Serialize, Serializer};

use crate::upstream::OK;

/// Value returned to the caller of `distanceMatrix`.
///
/// Callers branch on [`DistanceResponse::status`]: a provider outcome such as
/// `ZERO_RESULTS` is a normal return, not a fault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DistanceResponse {
    /// The provider found a route.
    Route(RouteDistance),

    /// The provider answered with a non-OK status.
    Unavailable { status: String },
}

/// Distance and travel time for a routable pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDistance {
    pub distance_meters: u64,
    pub distance_text: String,
    /// Traffic-adjusted duration when the provider supplied one.
    pub duration_text: String,
}

impl DistanceResponse {
    #[must_use]
    pub fn unavailable(status: impl Into<String>) -> Self {
        Self::Unavailable { status: status.into() }
    }

    /// `"OK"` for a route, the provider's status otherwise.
    #[must_use]
    pub fn status(&self) -> &str {
        match self {
            Self::Route(_) => OK,
            Self::Unavailable { status } => status,
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Route(_))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Wire<'a> {
    status: &'a str,
    distance_meters: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    distance_text: Option<&'a str>,
    duration_text: Option<&'a str>,
}

impl Serialize for DistanceResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Route(route) => Wire {
                status: OK,
                distance_meters: Some(route.distance_meters),
                distance_text: Some(route.distance_text.as_str()),
                duration_text: Some(route.duration_text.as_str()),
            },
            Self::Unavailable { status } => Wire {
                status: status.as_str(),
                distance_meters: None,
                distance_text: None,
                duration_text: None,
            },
        };
        wire.serialize(serializer)
    }
}
