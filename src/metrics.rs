//! Request metrics backed by a Prometheus registry.
//!
//! Every request passing through [`track_requests`] is counted and timed,
//! labeled by method, matched route, and status. 5xx responses also bump
//! the error counter. Exposition happens in `routes_ops`.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request, State},
    middleware::Next,
    response::Response,
};
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry};

use crate::AppState;

pub struct Metrics {
    registry: Registry,
    pub request_count: IntCounterVec,
    pub request_latency: HistogramVec,
    pub error_count: IntCounterVec,
}

impl Metrics {
    pub fn new() -> prometheus::Result<Self> {
        let registry = Registry::new();

        let request_count = IntCounterVec::new(
            Opts::new("scribe_request_count", "Total request count"),
            &["method", "endpoint", "http_status"],
        )?;

        let request_latency = HistogramVec::new(
            HistogramOpts::new("scribe_request_latency_seconds", "Request latency"),
            &["endpoint"],
        )?;

        let error_count = IntCounterVec::new(
            Opts::new("scribe_error_count", "Total error count"),
            &["endpoint"],
        )?;

        registry.register(Box::new(request_count.clone()))?;
        registry.register(Box::new(request_latency.clone()))?;
        registry.register(Box::new(error_count.clone()))?;

        Ok(Self {
            registry,
            request_count,
            request_latency,
            error_count,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}

/// Axum middleware recording count/latency/errors for every request.
pub async fn track_requests(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let method = req.method().to_string();
    // Matched route keeps label cardinality bounded; fall back to the
    // raw path for requests that never matched a route.
    let endpoint = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());

    let start = Instant::now();
    let response = next.run(req).await;
    let latency = start.elapsed().as_secs_f64();

    let status = response.status();
    let metrics = &state.metrics;
    metrics
        .request_latency
        .with_label_values(&[&endpoint])
        .observe(latency);
    metrics
        .request_count
        .with_label_values(&[&method, &endpoint, status.as_str()])
        .inc();
    if status.is_server_error() {
        metrics.error_count.with_label_values(&[&endpoint]).inc();
    }

    response
}
