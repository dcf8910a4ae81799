use super::{TransportRequest, TransportResponse};
use crate::error::Error;
use std::{sync::Arc, time::Duration};
use ureq::Agent;

/// Trait implemented by any blocking HTTP layer.
pub trait BlockingTransport: Send + Sync + 'static {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error>;
}

pub type DynBlockingTransport = Arc<dyn BlockingTransport>;

impl<T: BlockingTransport + ?Sized> BlockingTransport for Arc<T> {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        (**self).send(req)
    }
}

/// Default blocking transport built on `ureq`.
#[derive(Clone)]
pub struct UreqBlocking {
    agent: Agent,
}

impl UreqBlocking {
    /// Construct a new transport.
    ///
    /// * See [`crate::transport::async_transport::ReqwestAsync::try_new`] for parameter meaning.
    pub fn try_new(
        insecure: bool,
        ua: &str,
        timeout: Duration,
        connect_timeout: Duration,
        read_timeout: Duration,
        no_proxy: bool,
    ) -> Result<Self, Error> {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .timeout_connect(Some(connect_timeout))
            .timeout_recv_body(Some(read_timeout))
            .user_agent(ua);

        if no_proxy {
            builder = builder.proxy(None);
        }

        if insecure {
            builder = builder.tls_config(
                ureq::tls::TlsConfig::builder()
                    .disable_verification(true)
                    .build(),
            );
        }

        Ok(Self {
            agent: Agent::new_with_config(builder.build()),
        })
    }
}

fn transport_error(err: ureq::Error) -> Error {
    let message = match &err {
        ureq::Error::Timeout(_) => "request timed out",
        ureq::Error::HostNotFound | ureq::Error::ConnectionFailed => "connection failed",
        ureq::Error::Io(io) if io.kind() == std::io::ErrorKind::TimedOut => "request timed out",
        _ => "request failed",
    };
    Error::Unknown {
        code: None,
        message: message.into(),
        status: None,
        source: Some(Box::new(err)),
    }
}

impl BlockingTransport for UreqBlocking {
    fn send(&self, req: TransportRequest) -> Result<TransportResponse, Error> {
        let TransportRequest {
            method: _,
            url,
            headers,
            query,
            timeout,
        } = req;

        let mut call = self.agent.get(url.as_str()).query_pairs(query);
        for (name, value) in headers.iter() {
            call = call.header(name, value);
        }
        let mut response = call
            .config()
            .timeout_global(Some(timeout))
            .build()
            .call()
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()
            .map_err(transport_error)?;

        Ok(TransportResponse {
            status,
            headers,
            body,
        })
    }
}
