use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

const DEFAULT_PORT: u16 = 8080;

/// Listen address for the host process.
#[derive(Debug, Clone)]
pub struct HostConfig {
    pub addr: SocketAddr,
}

impl HostConfig {
    #[must_use]
    pub fn from_env() -> Self {
        let ip = env::var("BIND_ADDR")
            .ok()
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self { addr: SocketAddr::new(ip, port) }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
