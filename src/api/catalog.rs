use crate::endpoint::{GetCount, GetCountry, GetPrice};
use crate::{Error, Price, ProxyCountry, ProxyVersion};

/// Prices, stock and countries.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct CatalogService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl CatalogService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl CatalogService {
    /// `getprice`: cost of `count` proxies for `period` days.
    pub async fn price(
        &self,
        count: u32,
        period: u32,
        version: ProxyVersion,
    ) -> Result<Price, Error> {
        self.client
            .call(&GetPrice {
                count,
                period,
                version,
            })
            .await
    }

    /// `getcount`: how many proxies can be bought in `country`.
    pub async fn count(&self, country: ProxyCountry, version: ProxyVersion) -> Result<u64, Error> {
        self.client.call(&GetCount { country, version }).await
    }

    /// `getcountry`
    pub async fn countries(&self, version: ProxyVersion) -> Result<Vec<ProxyCountry>, Error> {
        self.client.call(&GetCountry { version }).await
    }
}

/// Prices, stock and countries (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingCatalogService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingCatalogService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingCatalogService {
    pub fn price(&self, count: u32, period: u32, version: ProxyVersion) -> Result<Price, Error> {
        self.client.call(&GetPrice {
            count,
            period,
            version,
        })
    }

    pub fn count(&self, country: ProxyCountry, version: ProxyVersion) -> Result<u64, Error> {
        self.client.call(&GetCount { country, version })
    }

    pub fn countries(&self, version: ProxyVersion) -> Result<Vec<ProxyCountry>, Error> {
        self.client.call(&GetCountry { version })
    }
}
