use crate::{ApiMethod, ErrorKind};
use std::time::Duration;

pub(crate) struct InFlightGuard {
    gauge: metrics::Gauge,
}

impl InFlightGuard {
    pub(crate) fn new() -> Self {
        let gauge = metrics::gauge!("proxy6_sdk_inflight");
        gauge.increment(1.0);
        Self { gauge }
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.decrement(1.0);
    }
}

fn error_kind_label(kind: ErrorKind) -> &'static str {
    match kind {
        ErrorKind::BadRequest => "bad_request",
        ErrorKind::Unknown => "unknown",
        ErrorKind::InvalidWireValue => "invalid_wire_value",
        ErrorKind::Decode => "decode",
        ErrorKind::InvalidConfig => "invalid_config",
    }
}

pub(crate) fn record_outcome(method: ApiMethod, latency: Duration, error_kind: Option<ErrorKind>) {
    let method = method.as_str();
    let outcome = if error_kind.is_some() { "error" } else { "ok" };

    metrics::counter!(
        "proxy6_sdk_requests_total",
        "method" => method,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!(
        "proxy6_sdk_request_duration_seconds",
        "method" => method,
        "outcome" => outcome
    )
    .record(latency);

    if let Some(kind) = error_kind {
        metrics::counter!(
            "proxy6_sdk_errors_total",
            "method" => method,
            "kind" => error_kind_label(kind)
        )
        .increment(1);
    }
}
