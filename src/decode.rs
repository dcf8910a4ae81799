//! Response acceptance and decoding shared by every endpoint.

use crate::{
    Account, ApiMethod, Collection, Currency, Error, Identified, ListLayout, ProxyId,
    transport::TransportResponse,
    types::{common::parse_date, proxy::RecordError},
    util::lenient::Scalar,
};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, error::Error as StdError, sync::RwLock};

/// Top-level JSON object of a response, minus the fields already consumed.
pub type Payload = Map<String, Value>;

/// Marker for "no usable response": wrong status, unrecognized body or a
/// failed exchange.
#[derive(Debug, Default)]
pub(crate) struct Absent {
    pub(crate) status: Option<StatusCode>,
    pub(crate) source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Absent {
    pub(crate) fn failed(source: Error) -> Self {
        Self {
            status: None,
            source: Some(Box::new(source)),
        }
    }
}

/// Keep the body only for HTTP 200 with `status` equal to `"yes"` or `"no"`.
pub(crate) fn accept(resp: &TransportResponse) -> Result<Payload, Absent> {
    let absent = || Absent {
        status: Some(resp.status),
        source: None,
    };
    if resp.status != StatusCode::OK {
        return Err(absent());
    }
    let body: Value = serde_json::from_slice(&resp.body).map_err(|err| Absent {
        status: Some(resp.status),
        source: Some(Box::new(err)),
    })?;
    match body {
        Value::Object(map)
            if matches!(map.get("status").and_then(Value::as_str), Some("yes" | "no")) =>
        {
            Ok(map)
        }
        _ => Err(absent()),
    }
}

/// Consume account fields and the status branch.
///
/// Account fields are stored before the status is looked at, so a failed
/// call still refreshes the cached balance.
pub(crate) fn open(
    method: ApiMethod,
    body: Result<Payload, Absent>,
    account: &RwLock<Account>,
) -> Result<Payload, Error> {
    let mut payload = match body {
        Ok(payload) => payload,
        Err(absent) => {
            #[cfg(feature = "tracing")]
            tracing::debug!(api.method = %method, status = ?absent.status, "no usable response");
            return Err(Error::Unknown {
                code: None,
                message: "Invalid Request".into(),
                status: absent.status,
                source: absent.source,
            });
        }
    };

    let (update, account_error) = take_account(&mut payload);
    if !update.is_empty() {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            api.method = %method,
            user_id = ?update.user_id,
            balance = ?update.balance,
            "account state refreshed"
        );
        let mut state = account
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        state.merge(update);
    }

    let status = payload.remove("status");
    if status.as_ref().and_then(Value::as_str) == Some("yes") {
        if let Some(err) = account_error {
            return Err(err.into_error(method));
        }
        return Ok(payload);
    }

    let code = payload.remove("error_id").and_then(int_value);
    let message = match payload.remove("error") {
        Some(Value::String(s)) => s,
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    };
    Err(Error::from_api(method, code, message))
}

fn int_value(value: Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Remove and decode `user_id`, `balance`, `currency` and `date_mod`.
///
/// Fields that decode are returned even when another one fails.
fn take_account(payload: &mut Payload) -> (Account, Option<RecordError>) {
    #[derive(Deserialize)]
    struct Balance(Decimal);

    let mut account = Account::default();
    let mut first_error = None;
    let mut fail = |err: RecordError| {
        first_error.get_or_insert(err);
    };

    match payload.remove("user_id") {
        None | Some(Value::Null) => {}
        Some(value) => match int_value(value.clone()).and_then(|id| u64::try_from(id).ok()) {
            Some(id) => account.user_id = Some(id),
            None => fail(RecordError::Invalid(format!("bad user_id {value}"))),
        },
    }
    match payload.remove("balance") {
        None | Some(Value::Null) => {}
        Some(value) => match serde_json::from_value::<Balance>(value.clone()) {
            Ok(Balance(balance)) => account.balance = Some(balance),
            Err(_) => fail(RecordError::Invalid(format!("bad balance {value}"))),
        },
    }
    match payload.remove("currency") {
        None | Some(Value::Null) => {}
        Some(value) => match serde_json::from_value::<Scalar>(value) {
            Ok(raw) => match Currency::from_wire(&raw.into_wire()) {
                Ok(currency) => account.currency = Some(currency),
                Err(err) => fail(err.into()),
            },
            Err(err) => fail(RecordError::Invalid(err.to_string())),
        },
    }
    match payload.remove("date_mod") {
        None | Some(Value::Null) => {}
        Some(Value::String(raw)) => match parse_date(&raw) {
            Ok(date) => account.date_mod = Some(date),
            Err(err) => fail(RecordError::Invalid(format!("bad date_mod {raw:?}: {err}"))),
        },
        Some(other) => fail(RecordError::Invalid(format!("bad date_mod {other}"))),
    }

    (account, first_error)
}

impl RecordError {
    pub(crate) fn into_error(self, method: ApiMethod) -> Error {
        match self {
            Self::Wire(err) => Error::InvalidWireValue(err),
            Self::Invalid(message) => Error::decode(method, message),
        }
    }
}

/// Deserialize the remaining top-level fields into `T`.
pub(crate) fn fields<T: DeserializeOwned>(method: ApiMethod, payload: Payload) -> Result<T, Error> {
    serde_json::from_value(Value::Object(payload)).map_err(|err| Error::decode(method, err))
}

/// Decode `list` in the layout the caller asked for.
///
/// The server writes an empty map as `[]`, so empty containers of either
/// kind decode into either layout.
pub(crate) fn collection<R, T>(
    method: ApiMethod,
    list: Option<Value>,
    layout: ListLayout,
) -> Result<Collection<T>, Error>
where
    R: DeserializeOwned,
    T: TryFrom<R, Error = RecordError> + Identified,
{
    let record = |value: Value| -> Result<T, Error> {
        let raw: R = serde_json::from_value(value).map_err(|err| Error::decode(method, err))?;
        T::try_from(raw).map_err(|err| err.into_error(method))
    };

    let list = list.ok_or_else(|| Error::decode(method, "missing field `list`"))?;
    match (layout, list) {
        (ListLayout::Keyed, Value::Object(map)) => {
            let mut out = BTreeMap::new();
            for (key, value) in map {
                let id: ProxyId = key
                    .parse()
                    .map_err(|_| Error::decode(method, format!("bad proxy id key {key:?}")))?;
                let item = record(value)?;
                if item.id() != id {
                    return Err(Error::decode(
                        method,
                        format!("record under key {id} has id {}", item.id()),
                    ));
                }
                out.insert(id, item);
            }
            Ok(Collection::ById(out))
        }
        (ListLayout::Sequence, Value::Array(items)) => items
            .into_iter()
            .map(record)
            .collect::<Result<Vec<_>, _>>()
            .map(Collection::Sequence),
        (ListLayout::Keyed, Value::Array(items)) if items.is_empty() => {
            Ok(Collection::ById(BTreeMap::new()))
        }
        (ListLayout::Sequence, Value::Object(map)) if map.is_empty() => {
            Ok(Collection::Sequence(Vec::new()))
        }
        (ListLayout::Keyed, Value::Null) => Ok(Collection::ById(BTreeMap::new())),
        (ListLayout::Sequence, Value::Null) => Ok(Collection::Sequence(Vec::new())),
        (layout, other) => Err(Error::decode(
            method,
            format!("`list` does not match {layout:?} layout: {}", kind_of(&other)),
        )),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A declared count must equal the number of records carried.
pub(crate) fn check_count(method: ApiMethod, declared: usize, actual: usize) -> Result<(), Error> {
    if declared != actual {
        return Err(Error::decode(
            method,
            format!("declared count {declared} but {actual} records"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ApiErrorCode, ErrorKind, Proxy, types::proxy::RawProxy};
    use http::HeaderMap;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn response(status: u16, body: Value) -> TransportResponse {
        TransportResponse {
            status: StatusCode::from_u16(status).unwrap(),
            headers: HeaderMap::new(),
            body: serde_json::to_vec(&body).unwrap(),
        }
    }

    fn open_value(method: ApiMethod, body: Value, account: &RwLock<Account>) -> Result<Payload, Error> {
        open(method, accept(&response(200, body)), account)
    }

    #[test]
    fn accept_requires_200_and_known_status() {
        assert!(accept(&response(200, json!({"status": "yes"}))).is_ok());
        assert!(accept(&response(200, json!({"status": "no"}))).is_ok());
        assert!(accept(&response(200, json!({"status": "maybe"}))).is_err());
        assert!(accept(&response(200, json!({"count": 1}))).is_err());
        assert!(accept(&response(200, json!(["status", "yes"]))).is_err());
        let absent = accept(&response(502, json!({"status": "yes"}))).unwrap_err();
        assert_eq!(absent.status, Some(StatusCode::BAD_GATEWAY));

        let garbled = TransportResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: b"<html>".to_vec(),
        };
        assert!(accept(&garbled).unwrap_err().source.is_some());
    }

    #[test]
    fn absent_body_is_unknown_error() {
        let account = RwLock::new(Account::default());
        let err = open(ApiMethod::GetPrice, Err(Absent::default()), &account).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unknown);
        assert_eq!(err.message(), Some("Invalid Request"));
    }

    #[test]
    fn account_fields_are_stored_and_removed() {
        let account = RwLock::new(Account::default());
        let payload = open_value(
            ApiMethod::GetCount,
            json!({
                "status": "yes",
                "user_id": "1",
                "balance": "48.80",
                "currency": "RUB",
                "date_mod": "2024-01-10 12:00:00",
                "count": 971
            }),
            &account,
        )
        .unwrap();
        assert_eq!(payload.len(), 1);
        assert!(payload.contains_key("count"));

        let state = account.read().unwrap().clone();
        assert_eq!(state.user_id, Some(1));
        assert_eq!(state.balance, Some(dec!(48.80)));
        assert_eq!(state.currency, Some(Currency::Rub));
        assert_eq!(
            state.date_mod.map(|d| d.to_string()),
            Some("2024-01-10 12:00:00".to_owned())
        );
    }

    #[test]
    fn account_fields_survive_error_branch() {
        let account = RwLock::new(Account::default());
        let err = open_value(
            ApiMethod::Buy,
            json!({
                "status": "no",
                "user_id": 7,
                "balance": 0.5,
                "currency": "USD",
                "error_id": 400,
                "error": "Error active"
            }),
            &account,
        )
        .unwrap_err();
        assert_eq!(err.api_code(), Some(ApiErrorCode::InsufficientFunds));
        assert_eq!(err.message(), Some("Error active"));

        let state = account.read().unwrap().clone();
        assert_eq!(state.user_id, Some(7));
        assert_eq!(state.balance, Some(dec!(0.5)));
        assert_eq!(state.currency, Some(Currency::Usd));
    }

    #[test]
    fn error_table_is_applied() {
        let account = RwLock::new(Account::default());
        let cases = [
            (100, ApiErrorCode::InvalidApiKey),
            (105, ApiErrorCode::InvalidIp),
            (110, ApiErrorCode::InvalidMethod),
            (200, ApiErrorCode::InvalidCount),
            (210, ApiErrorCode::InvalidPeriod),
            (220, ApiErrorCode::InvalidCountry),
            (230, ApiErrorCode::InvalidProxyIds),
            (240, ApiErrorCode::InvalidVersion),
            (250, ApiErrorCode::InvalidDescription),
            (260, ApiErrorCode::InvalidType),
            (300, ApiErrorCode::ProxiesUnavailable),
            (400, ApiErrorCode::InsufficientFunds),
            (404, ApiErrorCode::ElementNotFound),
            (410, ApiErrorCode::PriceError),
        ];
        for (code, expected) in cases {
            let err = open_value(
                ApiMethod::GetPrice,
                json!({"status": "no", "error_id": code.to_string(), "error": "boom"}),
                &account,
            )
            .unwrap_err();
            assert_eq!(err.api_code(), Some(expected), "code {code}");
            assert_eq!(err.message(), Some("boom"));
        }

        let err = open_value(
            ApiMethod::GetPrice,
            json!({"status": "no", "error_id": 999, "error": "Mystery"}),
            &account,
        )
        .unwrap_err();
        assert!(err.is_unknown());
        assert_eq!(err.message(), Some("Mystery"));

        let err = open_value(ApiMethod::GetPrice, json!({"status": "no"}), &account).unwrap_err();
        assert!(matches!(err, Error::Unknown { code: None, .. }));
    }

    #[test]
    fn unknown_currency_is_a_wire_error() {
        let account = RwLock::new(Account::default());
        let err = open_value(
            ApiMethod::GetCount,
            json!({"status": "yes", "currency": "EUR", "balance": "1", "count": 1}),
            &account,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidWireValue);
        assert_eq!(account.read().unwrap().balance, Some(dec!(1)));
    }

    fn proxy_json(id: u64) -> Value {
        json!({
            "id": id,
            "ip": "10.0.0.1",
            "host": "10.0.0.1",
            "port": 8000,
            "user": "u",
            "pass": "p",
            "type": "http",
            "country": "de",
            "date": "2024-01-10 12:00:00",
            "date_end": "2024-01-17 12:00:00",
            "unixtime": 1_704_877_200,
            "unixtime_end": 1_705_482_000,
            "descr": "",
            "active": 1
        })
    }

    fn proxies(list: Value, layout: ListLayout) -> Result<Collection<Proxy>, Error> {
        collection::<RawProxy, Proxy>(ApiMethod::GetProxy, Some(list), layout)
    }

    #[test]
    fn collection_follows_requested_layout() {
        let keyed = proxies(json!({"1": proxy_json(1), "2": proxy_json(2)}), ListLayout::Keyed).unwrap();
        assert!(matches!(keyed, Collection::ById(_)));
        assert_eq!(keyed.len(), 2);

        let seq = proxies(json!([proxy_json(2), proxy_json(1)]), ListLayout::Sequence).unwrap();
        assert!(matches!(seq, Collection::Sequence(_)));
        assert_eq!(seq.ids(), vec![ProxyId::new(2), ProxyId::new(1)]);

        assert!(proxies(json!([proxy_json(1)]), ListLayout::Keyed).is_err());
        assert!(proxies(json!({"1": proxy_json(1)}), ListLayout::Sequence).is_err());
    }

    #[test]
    fn empty_containers_fit_either_layout() {
        assert!(proxies(json!([]), ListLayout::Keyed).unwrap().is_empty());
        assert!(proxies(json!({}), ListLayout::Sequence).unwrap().is_empty());
    }

    #[test]
    fn keyed_record_must_match_its_key() {
        let err = proxies(json!({"5": proxy_json(6)}), ListLayout::Keyed).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }

    #[test]
    fn count_mismatch_is_decode_error() {
        assert!(check_count(ApiMethod::GetProxy, 2, 2).is_ok());
        let err = check_count(ApiMethod::GetProxy, 3, 2).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Decode);
    }
}
