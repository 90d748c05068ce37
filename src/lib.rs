//! # Trip Distance
//!
//! Host process exposing the `distanceMatrix` callable over HTTP.

mod config;
mod provider;
mod router;

pub use self::config::HostConfig;
pub use self::provider::Provider;
pub use self::router::{CallableError, router};
