use prometheus::{
    register_int_counter_vec, Encoder, IntCounterVec, TextEncoder,
};
use std::sync::LazyLock;

pub static WEBHOOK_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "elementpay_webhook_requests_total",
        "Webhook deliveries by outcome",
        &["result"]
    )
    .unwrap()
});

pub static SIGNATURE_FAILURES: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "elementpay_signature_failures_total",
        "Webhook signature verification failures",
        &["reason"]
    )
    .unwrap()
});

pub static ORDER_REQUESTS: LazyLock<IntCounterVec> = LazyLock::new(|| {
    register_int_counter_vec!(
        "elementpay_order_requests_total",
        "Order API requests",
        &["op", "result"]
    )
    .unwrap()
});

pub fn metrics_output() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if encoder.encode(&metric_families, &mut buffer).is_err() {
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
