use anyhow::{Context, Result};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use distance_matrix::{HttpRequest, Time};
use http::{Request, Response};
use http_body_util::Empty;

/// Host implementation of the distance matrix provider traits.
///
/// Cloning is cheap: the underlying client is reference-counted and shares
/// its connection pool.
#[derive(Clone, Debug, Default)]
pub struct Provider {
    client: reqwest::Client,
}

impl Provider {
    /// # Errors
    ///
    /// Returns an error when the TLS backend cannot be initialised.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().build().context("building HTTP client")?;
        Ok(Self { client })
    }
}

impl HttpRequest for Provider {
    async fn fetch(&self, request: Request<Empty<Bytes>>) -> Result<Response<Bytes>> {
        let (parts, _body) = request.into_parts();
        tracing::debug!(method = %parts.method, path = parts.uri.path(), "outbound request");

        let response = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .send()
            .await
            .context("sending request")?;

        let status = response.status();
        let body = response.bytes().await.context("reading response body")?;

        Response::builder().status(status).body(body).context("building response")
    }
}

impl Time for Provider {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
