//! Type-safe endpoint definitions, one per remote method.

use crate::{
    Collection, Error, ListLayout, NewProxy, Price, Prolong, ProlongReport, Proxy, ProxyCountry,
    ProxyId, ProxyList, ProxyScheme, ProxyState, ProxyVersion, Purchase,
    decode::{self, Payload},
    transport::request::Request,
    types::{
        common::join_ids,
        proxy::{RawNewProxy, RawProlong, RawProxy},
    },
    util::lenient,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fmt;

/// Remote method names, as they appear in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ApiMethod {
    GetPrice,
    GetCount,
    GetCountry,
    GetProxy,
    SetType,
    SetDescr,
    Buy,
    Prolong,
    Delete,
    Check,
}

impl ApiMethod {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetPrice => "getprice",
            Self::GetCount => "getcount",
            Self::GetCountry => "getcountry",
            Self::GetProxy => "getproxy",
            Self::SetType => "settype",
            Self::SetDescr => "setdescr",
            Self::Buy => "buy",
            Self::Prolong => "prolong",
            Self::Delete => "delete",
            Self::Check => "check",
        }
    }
}

impl fmt::Display for ApiMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common trait implemented by every API endpoint.
pub trait Endpoint {
    type Output;

    fn method(&self) -> ApiMethod;
    /// Query parameters for the call.
    fn request(&self) -> Request;
    /// Build the success value from a `status: "yes"` payload, with the
    /// account fields already removed.
    fn parse(&self, payload: Payload) -> Result<Self::Output, Error>;
}

#[derive(Deserialize)]
struct CountPayload {
    #[serde(deserialize_with = "lenient::int")]
    count: u64,
}

/// `getprice`: cost of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetPrice {
    pub count: u32,
    pub period: u32,
    pub version: ProxyVersion,
}

impl Endpoint for GetPrice {
    type Output = Price;

    fn method(&self) -> ApiMethod {
        ApiMethod::GetPrice
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("count", self.count.to_string())
            .query_pair("period", self.period.to_string())
            .query_pair("version", self.version.as_str())
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        decode::fields(self.method(), payload)
    }
}

/// `getcount`: proxies available to buy in a country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCount {
    pub country: ProxyCountry,
    pub version: ProxyVersion,
}

impl Endpoint for GetCount {
    type Output = u64;

    fn method(&self) -> ApiMethod {
        ApiMethod::GetCount
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("country", self.country.as_str())
            .query_pair("version", self.version.as_str())
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        decode::fields::<CountPayload>(self.method(), payload).map(|p| p.count)
    }
}

/// `getcountry`: countries open for purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetCountry {
    pub version: ProxyVersion,
}

impl Endpoint for GetCountry {
    type Output = Vec<ProxyCountry>;

    fn method(&self) -> ApiMethod {
        ApiMethod::GetCountry
    }

    fn request(&self) -> Request {
        Request::new(self.method()).query_pair("version", self.version.as_str())
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        #[derive(Deserialize)]
        struct Countries {
            list: Vec<String>,
        }

        let countries: Countries = decode::fields(self.method(), payload)?;
        countries
            .list
            .iter()
            .map(|code| ProxyCountry::from_wire(code).map_err(Error::from))
            .collect()
    }
}

/// `getproxy`: the account's proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListProxies {
    pub state: ProxyState,
    /// Only proxies whose technical comment matches exactly.
    pub description: Option<String>,
    pub page: u32,
    pub limit: u32,
    pub layout: ListLayout,
}

impl Default for ListProxies {
    fn default() -> Self {
        Self {
            state: ProxyState::All,
            description: None,
            page: 1,
            limit: 1000,
            layout: ListLayout::Keyed,
        }
    }
}

impl ListProxies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(mut self, state: ProxyState) -> Self {
        self.state = state;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Page size; the API caps it at 1000.
    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Endpoint for ListProxies {
    type Output = ProxyList;

    fn method(&self) -> ApiMethod {
        ApiMethod::GetProxy
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("state", self.state.as_str())
            .query_pair("page", self.page.to_string())
            .query_pair("limit", self.limit.to_string())
            .optional_pair("descr", self.description.as_deref())
            .flag("nokey", self.layout.is_sequence())
    }

    fn parse(&self, mut payload: Payload) -> Result<Self::Output, Error> {
        #[derive(Deserialize)]
        struct Header {
            #[serde(deserialize_with = "lenient::int")]
            list_count: usize,
        }

        let method = self.method();
        let list = payload.remove("list");
        let header: Header = decode::fields(method, payload)?;
        let proxies: Collection<Proxy> = decode::collection::<RawProxy, _>(method, list, self.layout)?;
        decode::check_count(method, header.list_count, proxies.len())?;
        Ok(ProxyList {
            count: header.list_count,
            proxies,
        })
    }
}

/// `settype`: switch the protocol of some proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetScheme {
    pub ids: Vec<ProxyId>,
    pub scheme: ProxyScheme,
}

impl Endpoint for SetScheme {
    type Output = bool;

    fn method(&self) -> ApiMethod {
        ApiMethod::SetType
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("ids", join_ids(self.ids.iter().copied()))
            .query_pair("type", self.scheme.as_str())
    }

    fn parse(&self, _payload: Payload) -> Result<Self::Output, Error> {
        Ok(true)
    }
}

/// `setdescr`: rewrite technical comments.
///
/// Select proxies by their current comment, by id, or both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetDescription {
    pub new: String,
    pub old: Option<String>,
    pub ids: Option<Vec<ProxyId>>,
}

impl SetDescription {
    #[must_use]
    pub fn new(new: impl Into<String>) -> Self {
        Self {
            new: new.into(),
            old: None,
            ids: None,
        }
    }

    /// Match proxies whose current comment equals `old`.
    #[must_use]
    pub fn replacing(mut self, old: impl Into<String>) -> Self {
        self.old = Some(old.into());
        self
    }

    #[must_use]
    pub fn ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }
}

impl Endpoint for SetDescription {
    type Output = u64;

    fn method(&self) -> ApiMethod {
        ApiMethod::SetDescr
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("new", self.new.as_str())
            .optional_pair("old", self.old.as_deref())
            .optional_pair(
                "ids",
                self.ids.as_ref().map(|ids| join_ids(ids.iter().copied())),
            )
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        decode::fields::<CountPayload>(self.method(), payload).map(|p| p.count)
    }
}

/// `buy`: purchase new proxies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyProxies {
    pub count: u32,
    pub period: u32,
    pub country: ProxyCountry,
    pub version: ProxyVersion,
    pub scheme: ProxyScheme,
    /// Technical comment, at most 50 characters.
    pub description: Option<String>,
    pub auto_prolong: bool,
    pub layout: ListLayout,
}

impl BuyProxies {
    #[must_use]
    pub fn new(count: u32, period: u32, country: ProxyCountry) -> Self {
        Self {
            count,
            period,
            country,
            version: ProxyVersion::Ipv6,
            scheme: ProxyScheme::Http,
            description: None,
            auto_prolong: false,
            layout: ListLayout::Keyed,
        }
    }

    #[must_use]
    pub fn version(mut self, version: ProxyVersion) -> Self {
        self.version = version;
        self
    }

    #[must_use]
    pub fn scheme(mut self, scheme: ProxyScheme) -> Self {
        self.scheme = scheme;
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn auto_prolong(mut self, yes: bool) -> Self {
        self.auto_prolong = yes;
        self
    }

    #[must_use]
    pub fn layout(mut self, layout: ListLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Endpoint for BuyProxies {
    type Output = Purchase;

    fn method(&self) -> ApiMethod {
        ApiMethod::Buy
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("count", self.count.to_string())
            .query_pair("period", self.period.to_string())
            .query_pair("country", self.country.as_str())
            .query_pair("version", self.version.as_str())
            .query_pair("type", self.scheme.as_str())
            .optional_pair("descr", self.description.as_deref())
            .flag("auto_prolong", self.auto_prolong)
            .flag("nokey", self.layout.is_sequence())
    }

    fn parse(&self, mut payload: Payload) -> Result<Self::Output, Error> {
        #[derive(Deserialize)]
        struct Header {
            #[serde(default, deserialize_with = "lenient::opt_int")]
            order_id: Option<u64>,
            #[serde(deserialize_with = "lenient::int")]
            count: usize,
            price: Decimal,
            #[serde(default)]
            price_single: Option<Decimal>,
            #[serde(deserialize_with = "lenient::int")]
            period: u32,
            country: String,
        }

        let method = self.method();
        let list = payload.remove("list");
        let header: Header = decode::fields(method, payload)?;
        let country = ProxyCountry::from_wire(&header.country)?;
        if country != self.country {
            return Err(Error::decode(
                method,
                format!(
                    "purchase country {country} differs from requested {}",
                    self.country
                ),
            ));
        }
        let proxies: Collection<NewProxy> =
            decode::collection::<RawNewProxy, _>(method, list, self.layout)?;
        decode::check_count(method, header.count, proxies.len())?;
        Ok(Purchase {
            order_id: header.order_id,
            count: header.count,
            price: header.price,
            price_single: header.price_single,
            period: header.period,
            country,
            proxies,
        })
    }
}

/// `prolong`: extend proxies by `period` days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProlongProxies {
    pub period: u32,
    pub ids: Vec<ProxyId>,
    pub layout: ListLayout,
}

impl Endpoint for ProlongProxies {
    type Output = ProlongReport;

    fn method(&self) -> ApiMethod {
        ApiMethod::Prolong
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .query_pair("period", self.period.to_string())
            .query_pair("ids", join_ids(self.ids.iter().copied()))
            .flag("nokey", self.layout.is_sequence())
    }

    fn parse(&self, mut payload: Payload) -> Result<Self::Output, Error> {
        #[derive(Deserialize)]
        struct Header {
            #[serde(default, deserialize_with = "lenient::opt_int")]
            order_id: Option<u64>,
            price: Decimal,
            #[serde(deserialize_with = "lenient::int")]
            period: u32,
            #[serde(deserialize_with = "lenient::int")]
            count: usize,
        }

        let method = self.method();
        let list = payload.remove("list");
        let header: Header = decode::fields(method, payload)?;
        let proxies: Collection<Prolong> =
            decode::collection::<RawProlong, _>(method, list, self.layout)?;
        decode::check_count(method, header.count, proxies.len())?;
        Ok(ProlongReport {
            order_id: header.order_id,
            price: header.price,
            period: header.period,
            count: header.count,
            proxies,
        })
    }
}

/// `delete`: remove proxies by id, by comment, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteProxies {
    pub ids: Option<Vec<ProxyId>>,
    pub description: Option<String>,
}

impl DeleteProxies {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn ids<I>(mut self, ids: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        self.ids = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Endpoint for DeleteProxies {
    type Output = u64;

    fn method(&self) -> ApiMethod {
        ApiMethod::Delete
    }

    fn request(&self) -> Request {
        Request::new(self.method())
            .optional_pair(
                "ids",
                self.ids.as_ref().map(|ids| join_ids(ids.iter().copied())),
            )
            .optional_pair("descr", self.description.as_deref())
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        decode::fields::<CountPayload>(self.method(), payload).map(|p| p.count)
    }
}

/// `check`: whether one proxy currently works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckProxy {
    pub id: ProxyId,
}

impl Endpoint for CheckProxy {
    type Output = bool;

    fn method(&self) -> ApiMethod {
        ApiMethod::Check
    }

    fn request(&self) -> Request {
        Request::new(self.method()).query_pair("ids", self.id.to_string())
    }

    fn parse(&self, payload: Payload) -> Result<Self::Output, Error> {
        #[derive(Deserialize)]
        struct Status {
            #[serde(deserialize_with = "lenient::flag")]
            proxy_status: bool,
        }

        decode::fields::<Status>(self.method(), payload).map(|s| s.proxy_status)
    }
}
