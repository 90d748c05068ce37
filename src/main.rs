use std::sync::Arc;

use anyhow::{Context, Result};
use distance_matrix::{DistanceProxy, ProxyConfig};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};
use trip_distance::{HostConfig, Provider};

const SERVICE: &str = "trip-distance";

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    Registry::default().with(filter).with(fmt::layer()).init();

    let proxy = Arc::new(DistanceProxy::new(ProxyConfig::from_env(), Provider::new()?));
    if proxy.config().api_key.is_none() {
        warn!(service = %SERVICE, "DISTANCE_API_KEY is not set; requests will be rejected");
    }
    let app = trip_distance::router(proxy);

    let host = HostConfig::from_env();
    let listener = TcpListener::bind(host.addr)
        .await
        .with_context(|| format!("binding {}", host.addr))?;
    info!(service = %SERVICE, addr = %host.addr, "listening");

    axum::serve(listener, app).with_graceful_shutdown(shutdown()).await.context("serving")?;

    info!(service = %SERVICE, "shut down");
    Ok(())
}

async fn shutdown() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, service = %SERVICE, "failed to listen for shutdown signal");
    }
}
