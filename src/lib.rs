//! Typed client for the proxy6.net HTTP API.
//!
//! Every call is a `GET {base}/{api_key}/{method}/?{query}`; responses carry
//! `status: "yes" | "no"` plus account fields that the client caches.
//! Choose **async** (`reqwest`) or **blocking** (`ureq`) at compile time.

// compile-time guard: enable at least one client kind.
#[cfg(not(any(feature = "async", feature = "blocking")))]
compile_error!("Enable at least one of: `async` (default) or `blocking`.");

pub mod api;
pub mod auth;
pub mod client;
mod decode;
pub mod endpoint;
pub mod error;
pub mod request_hook;
pub mod transport;
pub mod types;
mod util;

pub use auth::ApiKey;
pub use decode::Payload;
pub use endpoint::{
    ApiMethod, BuyProxies, CheckProxy, DeleteProxies, Endpoint, GetCount, GetCountry, GetPrice,
    ListProxies, ProlongProxies, SetDescription, SetScheme,
};
pub use error::{
    ApiError, ApiErrorCode, BodySnippetConfig, Error, ErrorKind, Result, WireValueError,
};
pub use request_hook::{RequestHook, RequestHookContext};
pub use types::*;

#[cfg(feature = "async")]
pub use client::{Client, ClientBuilder};
#[cfg(feature = "blocking")]
pub use client::{BlockingClient, BlockingClientBuilder};
