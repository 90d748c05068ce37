//! # Provider
//!
//! Provider defines external data interfaces for the crate.

use anyhow::Result;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::{Request, Response};
use http_body_util::Empty;

/// Provider entry point implemented by the host application.
pub trait Provider: HttpRequest + Time {}

impl<T: HttpRequest + Time> Provider for T {}

/// The `HttpRequest` trait defines the behavior for fetching data from a source.
pub trait HttpRequest: Send + Sync {
    /// Make outbound HTTP request.
    ///
    /// Non-success HTTP status codes are returned as responses; only transport
    /// failures are errors.
    fn fetch(
        &self, request: Request<Empty<Bytes>>,
    ) -> impl Future<Output = Result<Response<Bytes>>> + Send;
}

/// The `Time` trait supplies the wall clock used for the departure time.
pub trait Time: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
