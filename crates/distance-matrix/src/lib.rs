//! # Distance Matrix
//!
//! Single-shot proxy between a `distanceMatrix` caller and the upstream
//! distance matrix API.

mod config;
mod error;
mod handler;
mod response;

pub mod provider;
pub mod upstream;

pub use self::config::*;
pub use self::error::*;
pub use self::handler::*;
pub use self::provider::*;
pub use self::response::*;
