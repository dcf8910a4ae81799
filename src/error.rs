use crate::ApiMethod;
use http::StatusCode;
use std::{error::Error as StdError, fmt};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, Copy)]
pub struct BodySnippetConfig {
    pub enabled: bool,
    pub max_bytes: usize,
}

impl Default for BodySnippetConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_bytes: 4096,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    BadRequest,
    Unknown,
    InvalidWireValue,
    Decode,
    InvalidConfig,
}

/// Error codes reported by the API in `error_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ApiErrorCode {
    /// 100: the API key is wrong.
    InvalidApiKey,
    /// 105: the API was accessed from an IP not on the allow list.
    InvalidIp,
    /// 110: no such API method.
    InvalidMethod,
    /// 200: wrong or missing proxy quantity.
    InvalidCount,
    /// 210: wrong or missing period (days).
    InvalidPeriod,
    /// 220: wrong or missing country (iso2).
    InvalidCountry,
    /// 230: malformed list of proxy ids.
    InvalidProxyIds,
    /// 240: wrong proxy version.
    InvalidVersion,
    /// 250: bad technical description.
    InvalidDescription,
    /// 260: wrong or missing proxy type (protocol).
    InvalidType,
    /// 300: more proxies requested than the service has available.
    ProxiesUnavailable,
    /// 400: not enough funds on the account.
    InsufficientFunds,
    /// 404: the requested element was not found.
    ElementNotFound,
    /// 410: total cost came out less than or equal to zero.
    PriceError,
}

impl ApiErrorCode {
    const TABLE: [(Self, i64); 14] = [
        (Self::InvalidApiKey, 100),
        (Self::InvalidIp, 105),
        (Self::InvalidMethod, 110),
        (Self::InvalidCount, 200),
        (Self::InvalidPeriod, 210),
        (Self::InvalidCountry, 220),
        (Self::InvalidProxyIds, 230),
        (Self::InvalidVersion, 240),
        (Self::InvalidDescription, 250),
        (Self::InvalidType, 260),
        (Self::ProxiesUnavailable, 300),
        (Self::InsufficientFunds, 400),
        (Self::ElementNotFound, 404),
        (Self::PriceError, 410),
    ];

    /// Look up a server `error_id`. Codes outside the table yield `None`.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(_, value)| *value == code)
            .map(|(kind, _)| *kind)
    }

    #[must_use]
    pub fn code(self) -> i64 {
        Self::TABLE
            .iter()
            .find(|(kind, _)| *kind == self)
            .map(|(_, value)| *value)
            .unwrap_or_default()
    }
}

impl fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.code())
    }
}

/// A `status: "no"` response whose `error_id` is in the known table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub method: ApiMethod,
    /// Server message, verbatim.
    pub message: Box<str>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{} during {}]", self.message, self.code, self.method)
    }
}

/// An enumeration value that is not in its lookup table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value on the wire: {value:?}")]
pub struct WireValueError {
    pub kind: &'static str,
    pub value: Box<str>,
}

impl WireValueError {
    pub(crate) fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into().into_boxed_str(),
        }
    }
}

/// All errors returned by the SDK.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("{0}")]
    Api(ApiError),

    #[error("Unknown error: {message}")]
    Unknown {
        /// Server `error_id` when one was sent but is not in the table.
        code: Option<i64>,
        message: Box<str>,
        /// HTTP status when a response arrived but was not usable.
        status: Option<StatusCode>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    #[error(transparent)]
    InvalidWireValue(#[from] WireValueError),

    #[error("Decode error during {method}: {source}")]
    Decode {
        method: ApiMethod,
        body_snippet: Option<Box<str>>,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        message: Box<str>,
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },
}

impl Error {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api(_) => ErrorKind::BadRequest,
            Self::Unknown { .. } => ErrorKind::Unknown,
            Self::InvalidWireValue(_) => ErrorKind::InvalidWireValue,
            Self::Decode { .. } => ErrorKind::Decode,
            Self::InvalidConfig { .. } => ErrorKind::InvalidConfig,
        }
    }

    /// The mapped server error code, if this is an API error from the table.
    #[must_use]
    pub fn api_code(&self) -> Option<ApiErrorCode> {
        match self {
            Self::Api(e) => Some(e.code),
            _ => None,
        }
    }

    /// Server message for API-reported errors.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Api(e) => Some(&e.message),
            Self::Unknown { message, .. } => Some(message),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown { .. })
    }

    #[must_use]
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self.api_code(),
            Some(ApiErrorCode::InvalidApiKey | ApiErrorCode::InvalidIp)
        )
    }

    pub(crate) fn decode(
        method: ApiMethod,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Decode {
            method,
            body_snippet: None,
            source: source.into(),
        }
    }

    /// Map a `status: "no"` response onto the error table.
    pub(crate) fn from_api(method: ApiMethod, code: Option<i64>, message: String) -> Self {
        match code.and_then(ApiErrorCode::from_code) {
            Some(code) => Self::Api(ApiError {
                code,
                method,
                message: message.into_boxed_str(),
            }),
            None => Self::Unknown {
                code,
                message: message.into_boxed_str(),
                status: None,
                source: None,
            },
        }
    }
}
