//! Enumerations with fixed wire values.
//!
//! Every enum decodes through an explicit lookup table; a value outside the
//! table fails with [`WireValueError`].

use crate::{WireValueError, util::lenient::Scalar};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire value sent in query strings and received in payloads.
            #[must_use]
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire),+
                }
            }

            pub fn from_wire(value: &str) -> Result<Self, WireValueError> {
                match value {
                    $($wire => Ok(Self::$variant),)+
                    other => Err(WireValueError::new($kind, other)),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = WireValueError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::from_wire(s)
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = Scalar::deserialize(deserializer)?.into_wire();
                Self::from_wire(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

wire_enum! {
    /// Proxy IP version.
    #[derive(Default)]
    ProxyVersion, "version" {
        #[default]
        Ipv6 => "6",
        Ipv4 => "4",
        /// IPv4 shared between several customers.
        Ipv4Shared => "3",
    }
}

wire_enum! {
    /// Proxy protocol.
    #[derive(Default)]
    ProxyScheme, "scheme" {
        /// HTTP(S) tunnel.
        #[default]
        Http => "http",
        /// SOCKS5.
        Socks => "socks",
    }
}

impl ProxyScheme {
    /// URI scheme used when building a connection link.
    #[must_use]
    pub fn uri_scheme(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Socks => "socks5",
        }
    }
}

wire_enum! {
    /// Filter for `getproxy`.
    #[derive(Default)]
    ProxyState, "state" {
        Active => "active",
        Expired => "expired",
        Expiring => "expiring",
        #[default]
        All => "all",
    }
}

wire_enum! {
    /// Account currency.
    Currency, "currency" {
        Rub => "RUB",
        Usd => "USD",
    }
}

wire_enum! {
    /// Proxy location, as an iso2 code.
    ProxyCountry, "country" {
        Ukraine => "ua",
        Latvia => "lv",
        Russia => "ru",
        Belgium => "be",
        Belarus => "by",
        Romania => "ro",
        Slovenia => "si",
        SouthAfrica => "za",
        Australia => "au",
        Japan => "jp",
        Moldova => "md",
        Israel => "il",
        Spain => "es",
        Germany => "de",
        Kyrgyzstan => "kg",
        Tajikistan => "tj",
        Turkmenistan => "tm",
        UnitedStates => "us",
        UnitedKingdom => "gb",
        Egypt => "eg",
        Philippines => "ph",
        HongKong => "hk",
        Kazakhstan => "kz",
        Bulgaria => "bg",
        Malaysia => "my",
        Thailand => "th",
        SouthKorea => "kr",
        Serbia => "rs",
        Cyprus => "cy",
        Bangladesh => "bd",
        UnitedArabEmirates => "ae",
        Uzbekistan => "uz",
        Nigeria => "ng",
        Mexico => "mx",
        Taiwan => "tw",
        Singapore => "sg",
        Italy => "it",
        Brazil => "br",
        Lithuania => "lt",
        Indonesia => "id",
        Denmark => "dk",
        Vietnam => "vn",
        India => "in",
        China => "cn",
        Portugal => "pt",
        Netherlands => "nl",
        Georgia => "ge",
        Ireland => "ie",
        Chile => "cl",
        Armenia => "am",
        Estonia => "ee",
        France => "fr",
        Poland => "pl",
        CzechRepublic => "cz",
        Austria => "at",
        Norway => "no",
        Finland => "fi",
        Greece => "gr",
        Switzerland => "ch",
        Sweden => "se",
        Turkey => "tr",
        Canada => "ca",
    }
}

/// Shape of a returned proxy collection.
///
/// `Sequence` sends the `nokey` presence flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ListLayout {
    /// Records keyed by proxy id.
    #[default]
    Keyed,
    /// Records in server order.
    Sequence,
}

impl ListLayout {
    #[must_use]
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Sequence)
    }
}
