//! HTTP transport layers.
//!
//! A transport performs exactly one GET per call; acceptance of the response
//! happens in the decode layer.

#[cfg(feature = "async")]
pub mod async_transport;
#[cfg(feature = "blocking")]
pub mod blocking_transport;
#[cfg(feature = "metrics")]
pub(crate) mod metrics;
pub mod hook;
pub mod request;

use crate::ApiMethod;
use http::{HeaderMap, StatusCode};
use std::time::Duration;
use url::Url;

/// A fully resolved request handed to a transport.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    pub method: ApiMethod,
    /// `{base}/{api_key}/{method}/`, without query.
    pub url: Url,
    pub headers: HeaderMap,
    pub query: Vec<(String, String)>,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}
