use crate::util::lenient;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};

/// Format of every date string the API sends.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Largest distance between a server-local date string and its unix form.
const MAX_UTC_OFFSET_SECS: i64 = 14 * 3600;

/// A proxy id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProxyId(u64);

impl ProxyId {
    #[must_use]
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProxyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProxyId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl FromStr for ProxyId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl<'de> Deserialize<'de> for ProxyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient::int(deserializer).map(Self)
    }
}

/// Comma-joined id list, as the `ids` parameter expects.
pub(crate) fn join_ids<I>(ids: I) -> String
where
    I: IntoIterator,
    I::Item: Into<ProxyId>,
{
    ids.into_iter()
        .map(|id| id.into().to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// A point in time sent both as a server-local date string and as unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    local: NaiveDateTime,
    unix: i64,
}

impl Timestamp {
    /// Pair a formatted date with its unix form.
    ///
    /// Fails when the string does not parse or the two forms are further
    /// apart than any UTC offset allows.
    pub fn parse(formatted: &str, unix: i64) -> Result<Self, String> {
        let local = NaiveDateTime::parse_from_str(formatted.trim(), DATE_FORMAT)
            .map_err(|err| format!("bad date {formatted:?}: {err}"))?;
        let drift = local
            .and_utc()
            .timestamp()
            .checked_sub(unix)
            .and_then(i64::checked_abs)
            .ok_or_else(|| format!("unixtime {unix} out of range for date {formatted:?}"))?;
        if drift > MAX_UTC_OFFSET_SECS {
            return Err(format!(
                "date {formatted:?} disagrees with unixtime {unix} by {drift}s"
            ));
        }
        Ok(Self { local, unix })
    }

    /// Date as the server printed it (server-local wall clock).
    #[must_use]
    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    #[must_use]
    pub fn unix(&self) -> i64 {
        self.unix
    }

    #[must_use]
    pub fn utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.unix, 0)
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT)
}
