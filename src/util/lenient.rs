//! Scalars the API sends either as JSON numbers or as numeric strings.

use serde::{Deserialize, Deserializer, de::Error as _};
use std::{fmt::Display, str::FromStr};

#[derive(Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
}

impl Scalar {
    /// Text form used by enumeration lookup tables.
    pub(crate) fn into_wire(self) -> String {
        match self {
            Self::Int(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
            Self::Bool(b) => b.to_string(),
            Self::String(s) => s,
        }
    }
}

fn parse_int<T, E>(scalar: Scalar) -> Result<T, E>
where
    T: FromStr + TryFrom<i64>,
    <T as FromStr>::Err: Display,
    E: serde::de::Error,
{
    match scalar {
        Scalar::Int(i) => T::try_from(i).map_err(|_| E::custom(format!("integer {i} out of range"))),
        Scalar::String(s) => s.trim().parse::<T>().map_err(E::custom),
        Scalar::Float(f) => Err(E::custom(format!("expected an integer, got {f}"))),
        Scalar::Bool(b) => Err(E::custom(format!("expected an integer, got {b}"))),
    }
}

pub(crate) fn int<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<i64>,
    <T as FromStr>::Err: Display,
{
    parse_int(Scalar::deserialize(deserializer)?)
}

pub(crate) fn opt_int<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + TryFrom<i64>,
    <T as FromStr>::Err: Display,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::String(s)) if s.trim().is_empty() => Ok(None),
        Some(scalar) => parse_int(scalar).map(Some),
    }
}

/// `true`/`false`, `1`/`0` or `"1"`/`"0"`.
pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Bool(b) => Ok(b),
        Scalar::Int(0) => Ok(false),
        Scalar::Int(1) => Ok(true),
        Scalar::String(s) => match s.trim() {
            "1" | "true" => Ok(true),
            "0" | "false" | "" => Ok(false),
            other => Err(D::Error::custom(format!("expected a flag, got {other:?}"))),
        },
        Scalar::Int(i) => Err(D::Error::custom(format!("expected a flag, got {i}"))),
        Scalar::Float(f) => Err(D::Error::custom(format!("expected a flag, got {f}"))),
    }
}

pub(crate) fn opt_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Wrap(#[serde(deserialize_with = "flag")] bool);

    Ok(Option::<Wrap>::deserialize(deserializer)?.map(|Wrap(b)| b))
}
