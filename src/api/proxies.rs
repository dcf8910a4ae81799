use crate::endpoint::{
    BuyProxies, CheckProxy, DeleteProxies, ListProxies, ProlongProxies, SetDescription, SetScheme,
};
use crate::{Error, ListLayout, ProlongReport, ProxyId, ProxyList, ProxyScheme, Purchase};

/// Proxies owned by the account.
#[derive(Clone)]
#[cfg(feature = "async")]
pub struct ProxiesService {
    client: crate::Client,
}

#[cfg(feature = "async")]
impl ProxiesService {
    pub(crate) fn new(client: crate::Client) -> Self {
        Self { client }
    }
}

#[cfg(feature = "async")]
impl ProxiesService {
    /// `getproxy`: one page of owned proxies.
    pub async fn list(&self, query: &ListProxies) -> Result<ProxyList, Error> {
        self.client.call(query).await
    }

    /// `settype`: switch `ids` to `scheme`.
    pub async fn set_scheme<I>(&self, ids: I, scheme: ProxyScheme) -> Result<bool, Error>
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.client.call(&SetScheme { ids, scheme }).await
    }

    /// `setdescr`: returns the number of proxies updated.
    pub async fn set_description(&self, update: &SetDescription) -> Result<u64, Error> {
        self.client.call(update).await
    }

    /// `buy`
    pub async fn buy(&self, order: &BuyProxies) -> Result<Purchase, Error> {
        self.client.call(order).await
    }

    /// `prolong`: extend `ids` by `period` days.
    pub async fn prolong<I>(
        &self,
        period: u32,
        ids: I,
        layout: ListLayout,
    ) -> Result<ProlongReport, Error>
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.client
            .call(&ProlongProxies {
                period,
                ids,
                layout,
            })
            .await
    }

    /// `delete`: returns the number of proxies removed.
    pub async fn delete(&self, selection: &DeleteProxies) -> Result<u64, Error> {
        self.client.call(selection).await
    }

    /// `check`: `true` when the proxy answers.
    pub async fn check(&self, id: impl Into<ProxyId>) -> Result<bool, Error> {
        self.client.call(&CheckProxy { id: id.into() }).await
    }
}

/// Proxies owned by the account (blocking).
#[cfg(feature = "blocking")]
#[derive(Clone)]
pub struct BlockingProxiesService {
    client: crate::BlockingClient,
}

#[cfg(feature = "blocking")]
impl BlockingProxiesService {
    pub(crate) fn new(client: crate::BlockingClient) -> Self {
        Self { client }
    }
}

#[cfg(feature = "blocking")]
impl BlockingProxiesService {
    pub fn list(&self, query: &ListProxies) -> Result<ProxyList, Error> {
        self.client.call(query)
    }

    pub fn set_scheme<I>(&self, ids: I, scheme: ProxyScheme) -> Result<bool, Error>
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.client.call(&SetScheme { ids, scheme })
    }

    pub fn set_description(&self, update: &SetDescription) -> Result<u64, Error> {
        self.client.call(update)
    }

    pub fn buy(&self, order: &BuyProxies) -> Result<Purchase, Error> {
        self.client.call(order)
    }

    pub fn prolong<I>(&self, period: u32, ids: I, layout: ListLayout) -> Result<ProlongReport, Error>
    where
        I: IntoIterator,
        I::Item: Into<ProxyId>,
    {
        let ids = ids.into_iter().map(Into::into).collect();
        self.client.call(&ProlongProxies {
            period,
            ids,
            layout,
        })
    }

    pub fn delete(&self, selection: &DeleteProxies) -> Result<u64, Error> {
        self.client.call(selection)
    }

    pub fn check(&self, id: impl Into<ProxyId>) -> Result<bool, Error> {
        self.client.call(&CheckProxy { id: id.into() })
    }
}
