//! High-level proxy6 API services.
//!
//! The SDK surface is exposed via service accessors on clients:
//! - `Client::catalog()` / `BlockingClient::catalog()`
//! - `Client::proxies()` / `BlockingClient::proxies()`

pub mod catalog;
pub mod proxies;

pub use catalog::*;
pub use proxies::*;
