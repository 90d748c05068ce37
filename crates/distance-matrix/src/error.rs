//! Distance matrix errors
//!
//! Hard faults only. Provider-reported outcomes such as `ZERO_RESULTS` are
//! returned as [`crate::DistanceResponse::Unavailable`], never as an `Error`.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across the crate.
pub type Result<T> = anyhow::Result<T, Error>;

/// Fault raised by the distance proxy.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Error {
    /// The caller's payload is missing a required field.
    #[error("code: invalid-argument, description: {0}")]
    InvalidArgument(String),

    /// The server is not configured to serve the request.
    #[error("code: failed-precondition, description: {0}")]
    FailedPrecondition(String),

    /// The upstream call failed or its reply could not be decoded.
    #[error("code: internal, description: {0}")]
    Internal(String),
}

impl Error {
    /// Returns the stable error code associated with the variant.
    #[must_use]
    pub const fn code(&self) -> &str {
        match self {
            Self::InvalidArgument(_) => "invalid-argument",
            Self::FailedPrecondition(_) => "failed-precondition",
            Self::Internal(_) => "internal",
        }
    }

    /// Returns the HTTP status a callable transport should answer with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) | Self::FailedPrecondition(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns the error description without the code prefix.
    #[must_use]
    pub fn description(&self) -> &str {
        match self {
            Self::InvalidArgument(d) | Self::FailedPrecondition(d) | Self::Internal(d) => d,
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        let chain = err.chain().map(ToString::to_string).collect::<Vec<_>>().join(" -> ");

        // keep the variant of a domain error, with the added context
        if let Some(inner) = err.downcast_ref::<Self>() {
            tracing::debug!("Error: {err}, caused by: {inner}");

            return match inner {
                Self::InvalidArgument(_) => Self::InvalidArgument(chain),
                Self::FailedPrecondition(_) => Self::FailedPrecondition(chain),
                Self::Internal(_) => Self::Internal(chain),
            };
        }

        Self::Internal(chain)
    }
}

#[macro_export]
macro_rules! invalid_argument {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::InvalidArgument(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::InvalidArgument(format!($err))
    };
}

#[macro_export]
macro_rules! failed_precondition {
    ($fmt:expr, $($arg:tt)*) => {
        $crate::Error::FailedPrecondition(format!($fmt, $($arg)*))
    };
     ($err:expr $(,)?) => {
        $crate::Error::FailedPrecondition(format!($err))
    };
}
