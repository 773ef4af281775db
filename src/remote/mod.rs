//! Remote API boundary.
//!
//! Everything the dashboard knows about the backend goes through the
//! [`AirQualityApi`] trait: one typed operation per endpoint, implemented
//! over HTTP by [`HttpGateway`] and in memory by [`LocalGateway`] for tests
//! and demo runs.

pub mod error;
pub mod gateway;
pub mod http;

#[cfg(feature = "local-gateway")]
pub mod local;

pub use error::{GatewayError, GatewayResult};
pub use gateway::AirQualityApi;
pub use http::HttpGateway;

#[cfg(feature = "local-gateway")]
pub use local::LocalGateway;
