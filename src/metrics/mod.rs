use std::sync::Once;
use std::time::Duration;

use lazy_static::lazy_static;
use prometheus::exponential_buckets;
use prometheus::Encoder;
use prometheus::HistogramOpts;
use prometheus::HistogramVec;
use prometheus::IntCounterVec;
use prometheus::Opts;
use prometheus::Registry;
use tracing::warn;

use crate::BackendVersion;


lazy_static! {
    pub static ref BACKEND_CALLS_METRIC: IntCounterVec = IntCounterVec::new(
        Opts::new("backend_calls_total", "Backend requests by generation, operation and outcome"),
        &["version", "operation", "outcome"]
    )
    .expect("metric can not be created");

    pub static ref BACKEND_CALL_LATENCY_METRIC: HistogramVec = HistogramVec::new(
        HistogramOpts::new("backend_call_latency_ms", "Histogram of backend request latency in ms")
            .buckets(exponential_buckets(1.0, 2.0, 14).expect("buckets can be created")),
        &["version", "operation"]
    )
    .expect("metric can not be created");

    pub static ref REGISTRY: Registry = Registry::new();
}

static REGISTER: Once = Once::new();

pub fn register_custom_metrics(registry: &Registry) {
    if let Err(e) = registry.register(Box::new(BACKEND_CALLS_METRIC.clone())) {
        warn!("backend_calls_total not registered: {}", e);
    }
    if let Err(e) = registry.register(Box::new(BACKEND_CALL_LATENCY_METRIC.clone())) {
        warn!("backend_call_latency_ms not registered: {}", e);
    }
}

pub(crate) fn observe_backend_call(
    version: BackendVersion,
    operation: &str,
    outcome: &str,
    elapsed: Duration,
) {
    BACKEND_CALLS_METRIC
        .with_label_values(&[version.as_label(), operation, outcome])
        .inc();
    BACKEND_CALL_LATENCY_METRIC
        .with_label_values(&[version.as_label(), operation])
        .observe(elapsed.as_secs_f64() * 1000.0);
}

/// Text exposition of the crate's metrics.
pub fn render() -> String {
    REGISTER.call_once(|| register_custom_metrics(&REGISTRY));
    encode(&REGISTRY)
}

pub(crate) fn encode(registry: &Registry) -> String {
    let encoder = prometheus::TextEncoder::new();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&registry.gather(), &mut buffer) {
        warn!("could not encode custom metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_else(|e| {
        warn!("custom metrics could not be from_utf8'd: {}", e);
        String::default()
    })
}
