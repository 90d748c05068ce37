#![allow(missing_docs)]


use std::time::Duration;

use distance_matrix::{DistanceProxy, DistanceRequest, DistanceResponse, Error, ProxyConfig};
use pretty_assertions::assert_eq;
use serde_json::json;

use self::provider::{DEPARTURE_SECS, MockProvider};

const ENDPOINT: &str = "http://localhost:8080/maps/api/distancematrix/json";

fn proxy(provider: &MockProvider) -> DistanceProxy<MockProvider> {
    let config = ProxyConfig::new("test-key").with_endpoint(ENDPOINT);
    DistanceProxy::new(config, provider.clone())
}

fn request() -> DistanceRequest {
    DistanceRequest::new("Mount Eden, Auckland", "Britomart, Auckland")
}

// Should return distance and traffic-adjusted duration for a routable pair.
#[tokio::test]
async fn route_with_traffic() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));

    let response = proxy(&provider).invoke(request()).await.expect("should succeed");

    let value = serde_json::to_value(&response).expect("should serialize");
    assert_eq!(
        value,
        json!({
            "status": "OK",
            "distanceMeters": 4200,
            "distanceText": "4.2 km",
            "durationText": "12 mins"
        })
    );
    assert_eq!(provider.requests().len(), 1);
}

// Should fall back to the baseline duration without traffic data.
#[tokio::test]
async fn route_without_traffic() {
    let provider = MockProvider::replying(include_bytes!("../data/route-baseline.json"));

    let response = proxy(&provider).invoke(request()).await.expect("should succeed");

    let DistanceResponse::Route(route) = response else {
        panic!("expected a route, got {response:?}");
    };
    assert_eq!(route.distance_meters, 4200);
    assert_eq!(route.duration_text, "10 mins");
}

// Should send the fixed travel policy with the provider's clock.
#[tokio::test]
async fn upstream_query() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));

    proxy(&provider).invoke(request()).await.expect("should succeed");

    let requests = provider.requests();
    assert_eq!(
        requests[0],
        format!(
            "{ENDPOINT}?origins=Mount%20Eden%2C%20Auckland&destinations=Britomart%2C%20Auckland\
             &units=metric&mode=driving&departure_time={DEPARTURE_SECS}\
             &traffic_model=best_guess&key=test-key"
        )
    );
}

// Should reject a missing or empty origin/destination without calling upstream.
#[tokio::test]
async fn missing_locations() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));
    let proxy = proxy(&provider);

    let requests = [
        DistanceRequest::default(),
        DistanceRequest { origin: Some("Mount Eden".to_string()), destination: None },
        DistanceRequest { origin: None, destination: Some("Britomart".to_string()) },
        DistanceRequest::new("", "Britomart"),
        DistanceRequest::new("Mount Eden", ""),
    ];

    for request in requests {
        let err = proxy.invoke(request).await.expect_err("should be rejected");
        assert_eq!(err, Error::InvalidArgument("origin and destination required".to_string()));
    }
    assert!(provider.requests().is_empty());
}

// Should fail the precondition when no API key is configured.
#[tokio::test]
async fn missing_api_key() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));
    let proxy = DistanceProxy::new(ProxyConfig::unconfigured(), provider.clone());
    assert!(proxy.config().api_key.is_none());

    let err = proxy.invoke(request()).await.expect_err("should be rejected");

    assert_eq!(err, Error::FailedPrecondition("API key missing on server".to_string()));
    assert!(provider.requests().is_empty());
}

// Invalid input is reported before missing configuration.
#[tokio::test]
async fn input_checked_first() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));
    let proxy = DistanceProxy::new(ProxyConfig::unconfigured(), provider.clone());

    let err = proxy.invoke(DistanceRequest::default()).await.expect_err("should be rejected");
    assert_eq!(err.code(), "invalid-argument");
}

// Should return a provider status as a value, not an error.
#[tokio::test]
async fn over_query_limit() {
    let provider = MockProvider::replying(include_bytes!("../data/over-query-limit.json"));

    let response = proxy(&provider).invoke(request()).await.expect("should not fault");

    let value = serde_json::to_value(&response).expect("should serialize");
    assert_eq!(
        value,
        json!({"status": "OVER_QUERY_LIMIT", "distanceMeters": null, "durationText": null})
    );
}

// Should report the element status when no route exists.
#[tokio::test]
async fn zero_results() {
    let provider = MockProvider::replying(include_bytes!("../data/zero-results.json"));

    let response = proxy(&provider).invoke(request()).await.expect("should not fault");

    assert_eq!(response, DistanceResponse::unavailable("ZERO_RESULTS"));
    assert!(!response.is_ok());
}

// Should decode the body of a non-success HTTP reply.
#[tokio::test]
async fn request_denied() {
    let provider = MockProvider::replying_status(
        403,
        br#"{"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid.", "rows": []}"#,
    );

    let response = proxy(&provider).invoke(request()).await.expect("should not fault");
    assert_eq!(response.status(), "REQUEST_DENIED");
}

// Should fault with a description when the transport fails.
#[tokio::test]
async fn connection_refused() {
    let provider = MockProvider::refusing();

    let err = proxy(&provider).invoke(request()).await.expect_err("should fault");

    let Error::Internal(description) = &err else {
        panic!("expected internal error, got {err:?}");
    };
    assert!(description.contains("Connection refused"));
}

// Should fault when the body is not the provider's JSON.
#[tokio::test]
async fn undecodable_body() {
    let provider = MockProvider::replying_status(502, b"<html>Bad Gateway</html>");

    let err = proxy(&provider).invoke(request()).await.expect_err("should fault");

    assert_eq!(err.code(), "internal");
    assert!(err.description().contains("HTTP 502"));
}

// Should abandon an upstream call that exceeds the timeout.
#[tokio::test]
async fn upstream_timeout() {
    let provider = MockProvider::stalling(Duration::from_secs(30));
    let config = ProxyConfig::new("test-key")
        .with_endpoint(ENDPOINT)
        .with_timeout(Duration::from_millis(50));

    let err = DistanceProxy::new(config, provider.clone())
        .invoke(request())
        .await
        .expect_err("should time out");

    assert_eq!(err.code(), "internal");
    assert!(err.description().contains("timed out"));
    assert_eq!(provider.requests().len(), 1);
}

// Identical inputs against an identical upstream give identical responses.
#[tokio::test]
async fn repeatable() {
    let provider = MockProvider::replying(include_bytes!("../data/route-traffic.json"));
    let proxy = proxy(&provider);

    let first = proxy.invoke(request()).await.expect("should succeed");
    let second = proxy.invoke(request()).await.expect("should succeed");

    assert_eq!(first, second);
    let requests = provider.requests();
    assert_eq!(requests[0], requests[1]);
}
