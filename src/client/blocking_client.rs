//! High-level blocking proxy6 client.

use crate::{
    Account, ApiKey, BodySnippetConfig, Currency, Error, RequestHookContext, api,
    decode::{self, Absent, Payload},
    endpoint::Endpoint,
    transport::{
        TransportRequest,
        blocking_transport::{BlockingTransport, DynBlockingTransport, UreqBlocking},
        hook::Hooked,
        request::Request,
    },
    util::{
        redact::body_snippet,
        url::{DEFAULT_BASE_URL, method_url, normalize_base_url},
    },
};
#[cfg(feature = "tracing")]
use crate::util::url::sanitize_url;
use chrono::NaiveDateTime;
use http::HeaderMap;
use rust_decimal::Decimal;
use std::{
    sync::{Arc, PoisonError, RwLock},
    time::Duration,
};
use url::Url;

#[cfg(feature = "tracing")]
use tracing::field;

const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Configures and constructs [`BlockingClient`].
pub struct BlockingClientBuilder {
    api_key: ApiKey,
    base_url: String,
    insecure: bool,
    user_agent: String,
    timeout: Duration,
    connect_timeout: Duration,
    read_timeout: Duration,
    no_proxy: bool,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    request_hook: Option<crate::RequestHook>,
    transport: Option<DynBlockingTransport>,
}

impl BlockingClientBuilder {
    fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_owned(),
            insecure: false,
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            read_timeout: Duration::from_secs(30),
            no_proxy: false,
            default_headers: HeaderMap::new(),
            body_snippet: BodySnippetConfig::default(),
            request_hook: None,
            transport: None,
        }
    }

    pub fn base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = base.into();
        self
    }

    pub fn no_system_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Accept invalid TLS certificates (**dangerous**).
    pub fn danger_accept_invalid_certs(mut self, yes: bool) -> Self {
        self.insecure = yes;
        self
    }

    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = ua.into();
        self
    }

    pub fn timeout(mut self, value: Duration) -> Self {
        self.timeout = value;
        self
    }

    pub fn connect_timeout(mut self, value: Duration) -> Self {
        self.connect_timeout = value;
        self
    }

    pub fn read_timeout(mut self, value: Duration) -> Self {
        self.read_timeout = value;
        self
    }

    pub fn default_header(
        mut self,
        name: http::header::HeaderName,
        value: http::HeaderValue,
    ) -> Self {
        self.default_headers.insert(name, value);
        self
    }

    pub fn default_headers(mut self, headers: HeaderMap) -> Self {
        self.default_headers.extend(headers);
        self
    }

    pub fn capture_body_snippet(mut self, enabled: bool) -> Self {
        self.body_snippet.enabled = enabled;
        self
    }

    pub fn max_body_snippet_bytes(mut self, max_bytes: usize) -> Self {
        self.body_snippet.max_bytes = max_bytes;
        self
    }

    pub fn request_hook<F>(mut self, hook: F) -> Self
    where
        F: for<'a> Fn(RequestHookContext<'a>) -> Result<(), Error> + Send + Sync + 'static,
    {
        self.request_hook = Some(Arc::new(hook));
        self
    }

    /// Replace the default `ureq` transport.
    pub fn transport(mut self, transport: impl BlockingTransport) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn build(self) -> Result<BlockingClient, Error> {
        self.api_key.validate()?;
        let base = normalize_base_url(&self.base_url)?;

        let mut transport: DynBlockingTransport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(UreqBlocking::try_new(
                self.insecure,
                &self.user_agent,
                self.timeout,
                self.connect_timeout,
                self.read_timeout,
                self.no_proxy,
            )?),
        };

        if let Some(hook) = self.request_hook {
            transport = Arc::new(Hooked::new(transport, hook));
        }

        Ok(BlockingClient {
            inner: Arc::new(Inner {
                base,
                api_key: self.api_key,
                timeout: self.timeout,
                default_headers: self.default_headers,
                body_snippet: self.body_snippet,
                transport,
                account: RwLock::new(Account::default()),
            }),
        })
    }
}

/// Blocking proxy6 client. Clones share account state.
#[derive(Clone)]
pub struct BlockingClient {
    inner: Arc<Inner>,
}

struct Inner {
    base: Url,
    api_key: ApiKey,
    timeout: Duration,
    default_headers: HeaderMap,
    body_snippet: BodySnippetConfig,
    transport: DynBlockingTransport,
    account: RwLock<Account>,
}

impl BlockingClient {
    pub fn builder(api_key: impl Into<ApiKey>) -> BlockingClientBuilder {
        BlockingClientBuilder::new(api_key.into())
    }

    pub fn new(api_key: impl Into<ApiKey>) -> Result<Self, Error> {
        Self::builder(api_key).build()
    }

    #[must_use]
    pub fn catalog(&self) -> api::BlockingCatalogService {
        api::BlockingCatalogService::new(self.clone())
    }

    #[must_use]
    pub fn proxies(&self) -> api::BlockingProxiesService {
        api::BlockingProxiesService::new(self.clone())
    }

    #[must_use]
    pub fn account(&self) -> Account {
        self.inner
            .account
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn user_id(&self) -> Option<u64> {
        self.account().user_id
    }

    #[must_use]
    pub fn balance(&self) -> Option<Decimal> {
        self.account().balance
    }

    #[must_use]
    pub fn currency(&self) -> Option<Currency> {
        self.account().currency
    }

    #[must_use]
    pub fn date_mod(&self) -> Option<NaiveDateTime> {
        self.account().date_mod
    }

    /// Run one endpoint: request, acceptance, account refresh, decode.
    pub fn call<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output, Error> {
        let req = endpoint.request();
        let method = req.method;

        #[cfg(feature = "metrics")]
        let _inflight = crate::transport::metrics::InFlightGuard::new();
        #[cfg(any(feature = "tracing", feature = "metrics"))]
        let start = std::time::Instant::now();
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "proxy6.request",
            api.method = %method,
            http.status = field::Empty,
            url = field::Empty,
            latency_ms = field::Empty,
            error_kind = field::Empty,
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (body, raw) = self.exchange(req);
        let result = decode::open(method, body, &self.inner.account)
            .and_then(|payload| endpoint.parse(payload))
            .map_err(|err| self.with_snippet(err, raw.as_deref()));

        #[cfg(feature = "metrics")]
        crate::transport::metrics::record_outcome(
            method,
            start.elapsed(),
            result.as_ref().err().map(Error::kind),
        );
        #[cfg(feature = "tracing")]
        {
            span.record("latency_ms", start.elapsed().as_millis() as i64);
            if let Err(err) = &result {
                span.record("error_kind", field::debug(err.kind()));
            }
        }

        result
    }

    fn exchange(&self, req: Request) -> (Result<Payload, Absent>, Option<Vec<u8>>) {
        let url = match method_url(&self.inner.base, &self.inner.api_key, req.method) {
            Ok(url) => url,
            Err(err) => return (Err(Absent::failed(err)), None),
        };
        #[cfg(feature = "tracing")]
        tracing::Span::current().record(
            "url",
            field::display(sanitize_url(&url, &self.inner.api_key)),
        );

        let sent = self.inner.transport.send(TransportRequest {
            method: req.method,
            url,
            headers: self.inner.default_headers.clone(),
            query: req.query,
            timeout: req.timeout_override.unwrap_or(self.inner.timeout),
        });

        match sent {
            Ok(resp) => {
                #[cfg(feature = "tracing")]
                tracing::Span::current().record("http.status", resp.status.as_u16() as i64);
                (decode::accept(&resp), Some(resp.body))
            }
            Err(err) => (Err(Absent::failed(err)), None),
        }
    }

    fn with_snippet(&self, err: Error, raw: Option<&[u8]>) -> Error {
        match err {
            Error::Decode {
                method,
                body_snippet: None,
                source,
            } => Error::Decode {
                method,
                body_snippet: raw.and_then(|body| {
                    body_snippet(body, self.inner.body_snippet, &self.inner.api_key)
                }),
                source,
            },
            other => other,
        }
    }
}
