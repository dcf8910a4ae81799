use crate::{ApiMethod, Error};
use http::HeaderMap;
use std::sync::Arc;

/// Request hook context passed to `ClientBuilder::request_hook`.
///
/// The hook can inspect the call and mutate headers before the request is
/// sent. The URL is not exposed because it carries the API key.
pub struct RequestHookContext<'a> {
    pub method: ApiMethod,
    pub headers: &'a mut HeaderMap,
    /// Query pairs appended by the transport.
    pub query: &'a [(String, String)],
}

pub type RequestHook =
    Arc<dyn for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static>;
