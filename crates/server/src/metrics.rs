use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{register_histogram_vec, register_int_counter_vec, Encoder, HistogramVec, IntCounterVec, TextEncoder};
use service::errors::ServiceError;

// Prometheus metrics (default registry)
pub static CONTACT_OPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "contacts_operations_total",
        "Contact operations by operation and outcome",
        &["op", "outcome"]
    )
    .expect("register contacts_operations_total")
});

pub static CONTACT_OP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "contacts_operation_duration_seconds",
        "Contact operation duration in seconds",
        &["op"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]
    )
    .expect("register contacts_operation_duration_seconds")
});

fn outcome<T>(res: &Result<T, ServiceError>) -> &'static str {
    match res {
        Ok(_) => "ok",
        Err(ServiceError::Validation(_)) => "validation",
        Err(ServiceError::InvalidId(_)) => "invalid_id",
        Err(ServiceError::NotFound(_)) => "not_found",
        Err(ServiceError::Conflict(_)) => "conflict",
        Err(ServiceError::Db(_)) => "error",
    }
}

/// Record one finished operation.
pub fn observe<T>(op: &'static str, started: Instant, res: &Result<T, ServiceError>) {
    CONTACT_OPS_TOTAL.with_label_values(&[op, outcome(res)]).inc();
    CONTACT_OP_DURATION.with_label_values(&[op]).observe(started.elapsed().as_secs_f64());
}

pub fn encode_metrics() -> (axum::http::StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("metrics encode error: {e}"),
        );
    }
    (
        axum::http::StatusCode::OK,
        String::from_utf8(buffer).unwrap_or_default(),
    )
}
