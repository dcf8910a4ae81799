use crate::ApiMethod;
use std::time::Duration;

/// One call to a remote method: the method name plus its query parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Request {
    pub method: ApiMethod,
    pub query: Vec<(String, String)>,
    pub timeout_override: Option<Duration>,
}

impl Request {
    #[must_use]
    pub fn new(method: ApiMethod) -> Self {
        Self {
            method,
            query: Vec::new(),
            timeout_override: None,
        }
    }

    #[must_use]
    pub fn query_pair(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add the pair only when a value is present.
    #[must_use]
    pub fn optional_pair<V: Into<String>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query_pair(key, value),
            None => self,
        }
    }

    /// Presence flag: `key=` when set, nothing otherwise.
    #[must_use]
    pub fn flag(self, key: impl Into<String>, set: bool) -> Self {
        if set { self.query_pair(key, "") } else { self }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_override = Some(timeout);
        self
    }
}
