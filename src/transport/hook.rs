//! Transport wrapper running the user's request hook before each GET.

use crate::transport::{TransportRequest, TransportResponse};
use crate::{Error, RequestHook, RequestHookContext};

#[cfg(feature = "async")]
use crate::transport::async_transport::AsyncTransport;
#[cfg(feature = "blocking")]
use crate::transport::blocking_transport::BlockingTransport;

/// Runs a [`RequestHook`] and then delegates to `inner`.
///
/// A hook error aborts the call before anything is sent.
#[derive(Clone)]
pub struct Hooked<T> {
    inner: T,
    hook: RequestHook,
}

impl<T> Hooked<T> {
    pub fn new(inner: T, hook: RequestHook) -> Self {
        Self { inner, hook }
    }

    fn before(&self, req: &mut TransportRequest) -> Result<(), Error> {
        (self.hook)(RequestHookContext {
            method: req.method,
            headers: &mut req.headers,
            query: &req.query,
        })
    }
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl<T: AsyncTransport> AsyncTransport for Hooked<T> {
    async fn send(&self, mut req: TransportRequest) -> Result<TransportResponse, Error> {
        self.before(&mut req)?;
        self.inner.send(req).await
    }
}

#[cfg(feature = "blocking")]
impl<T: BlockingTransport> BlockingTransport for Hooked<T> {
    fn send(&self, mut req: TransportRequest) -> Result<TransportResponse, Error> {
        self.before(&mut req)?;
        self.inner.send(req)
    }
}
