//! Prometheus metrics and the `/metrics` exposition endpoint.

use std::sync::OnceLock;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
    core::Collector,
};
use salvo::{
    Request, Response, handler,
    http::{
        StatusCode,
        header::{CONTENT_TYPE, HeaderValue},
    },
};
use tracing::error;

const DURATION_BUCKETS: [f64; 13] = [
    0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
];

#[derive(Debug)]
struct BackofficeMetrics {
    registry: Registry,
    requests_total: IntCounterVec,
    request_duration_seconds: HistogramVec,
    requests_in_flight: IntGauge,
    auth_attempts_total: IntCounterVec,
    import_rows_total: IntCounterVec,
}

static METRICS: OnceLock<Option<BackofficeMetrics>> = OnceLock::new();

/// Result of checking a request's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AuthOutcome {
    Authenticated,
    MissingToken,
    InvalidToken,
    NotAdmin,
    Failed,
}

impl AuthOutcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Authenticated => "authenticated",
            Self::MissingToken => "missing_token",
            Self::InvalidToken => "invalid_token",
            Self::NotAdmin => "not_admin",
            Self::Failed => "failed",
        }
    }
}

#[derive(Debug)]
pub(super) struct InFlightRequestGuard {
    tracked: bool,
}

impl InFlightRequestGuard {
    pub(super) fn track() -> Self {
        let Some(metrics) = metrics() else {
            return Self { tracked: false };
        };

        metrics.requests_in_flight.inc();

        Self { tracked: true }
    }
}

impl Drop for InFlightRequestGuard {
    fn drop(&mut self) {
        if self.tracked
            && let Some(metrics) = metrics()
        {
            metrics.requests_in_flight.dec();
        }
    }
}

pub(super) fn observe_request(method: &str, route: &str, status_code: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status_code_label = status_code.to_string();

    metrics
        .requests_total
        .with_label_values(&[
            method,
            route,
            status_class(status_code),
            status_code_label.as_str(),
        ])
        .inc();

    metrics
        .request_duration_seconds
        .with_label_values(&[method, route])
        .observe(duration_seconds);
}

pub(crate) fn observe_auth(outcome: AuthOutcome) {
    if let Some(metrics) = metrics() {
        metrics
            .auth_attempts_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }
}

/// Count imported members, or the row errors of a rejected import.
pub(crate) fn observe_import(imported: bool, rows: usize) {
    let Some(metrics) = metrics() else {
        return;
    };

    let outcome = if imported { "imported" } else { "rejected" };

    metrics
        .import_rows_total
        .with_label_values(&[outcome])
        .inc_by(u64::try_from(rows).unwrap_or(u64::MAX));
}

#[handler]
pub(crate) async fn metrics_handler(_req: &mut Request, res: &mut Response) {
    let Some(metrics) = metrics() else {
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        return;
    };

    let encoder = TextEncoder::new();
    let mut encoded = Vec::new();

    if let Err(source) = encoder.encode(&metrics.registry.gather(), &mut encoded) {
        error!("failed to encode metrics response: {source}");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);

        return;
    }

    match HeaderValue::from_str(encoder.format_type()) {
        Ok(content_type) => {
            res.headers_mut().insert(CONTENT_TYPE, content_type);
            res.render(String::from_utf8_lossy(&encoded).into_owned());
        }
        Err(source) => {
            error!("failed to encode metrics content type header: {source}");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
        }
    }
}

fn metrics() -> Option<&'static BackofficeMetrics> {
    METRICS.get_or_init(build_metrics).as_ref()
}

fn register<M>(registry: &Registry, name: &str, built: prometheus::Result<M>) -> Option<M>
where
    M: Collector + Clone + 'static,
{
    let metric = match built {
        Ok(metric) => metric,
        Err(source) => {
            error!(metric = name, "failed to create metric: {source}");
            return None;
        }
    };

    if let Err(source) = registry.register(Box::new(metric.clone())) {
        error!(metric = name, "failed to register metric: {source}");
        return None;
    }

    Some(metric)
}

fn build_metrics() -> Option<BackofficeMetrics> {
    let registry = Registry::new();

    let requests_total = register(
        &registry,
        "requests_total",
        IntCounterVec::new(
            Opts::new(
                "backoffice_json_http_requests_total",
                "HTTP requests by method, route, status class and status code.",
            ),
            &["method", "route", "status_class", "status_code"],
        ),
    )?;

    let request_duration_seconds = register(
        &registry,
        "request_duration_seconds",
        HistogramVec::new(
            HistogramOpts::new(
                "backoffice_json_http_request_duration_seconds",
                "HTTP request duration in seconds by method and route.",
            )
            .buckets(DURATION_BUCKETS.to_vec()),
            &["method", "route"],
        ),
    )?;

    let requests_in_flight = register(
        &registry,
        "requests_in_flight",
        IntGauge::with_opts(Opts::new(
            "backoffice_json_http_requests_in_flight",
            "HTTP requests currently being served.",
        )),
    )?;

    let auth_attempts_total = register(
        &registry,
        "auth_attempts_total",
        IntCounterVec::new(
            Opts::new(
                "backoffice_json_auth_attempts_total",
                "Bearer token checks by outcome.",
            ),
            &["outcome"],
        ),
    )?;

    let import_rows_total = register(
        &registry,
        "import_rows_total",
        IntCounterVec::new(
            Opts::new(
                "backoffice_json_import_rows_total",
                "Batch import members imported and row errors rejected.",
            ),
            &["outcome"],
        ),
    )?;

    Some(BackofficeMetrics {
        registry,
        requests_total,
        request_duration_seconds,
        requests_in_flight,
        auth_attempts_total,
        import_rows_total,
    })
}

fn status_class(status_code: u16) -> &'static str {
    match status_code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}
