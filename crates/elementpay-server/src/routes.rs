use actix_web::{get, post, web, HttpRequest, HttpResponse};

use elementpay::signature::unix_now;
use elementpay::{security, ApiError, CreateOrderRequest, SignatureError, WebhookPayload};

use crate::metrics;
use crate::state::AppState;

/// Metric label for a verification failure. Internal only — the HTTP
/// response is identical for every reason.
fn failure_label(err: SignatureError) -> &'static str {
    match err {
        SignatureError::MalformedHeader => "malformed",
        SignatureError::StaleTimestamp => "stale",
        SignatureError::InvalidEncoding => "encoding",
        SignatureError::MacMismatch => "mismatch",
    }
}

#[get("/health")]
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "service": "elementpay-server",
        "orders": state.orders.len(),
    }))
}

#[get("/metrics")]
pub async fn metrics_endpoint(req: HttpRequest, state: web::Data<AppState>) -> HttpResponse {
    // Separate METRICS_TOKEN guards the endpoint (not the webhook secret).
    match &state.metrics_token {
        Some(token) => {
            let authorized = req
                .headers()
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(|t| security::constant_time_eq(t.as_bytes(), token))
                .unwrap_or(false);

            if !authorized {
                return HttpResponse::Unauthorized().json(ApiError::new(
                    "unauthorized",
                    "Valid Bearer token required for /metrics",
                ));
            }
        }
        None => {
            // No token configured — metrics stay protected by default.
            // Set ELEMENTPAY_PUBLIC_METRICS=true to opt into open access.
            let public_metrics = std::env::var("ELEMENTPAY_PUBLIC_METRICS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false);
            if !public_metrics {
                return HttpResponse::Forbidden().json(ApiError::new(
                    "forbidden",
                    "Set METRICS_TOKEN or ELEMENTPAY_PUBLIC_METRICS=true to access /metrics",
                ));
            }
        }
    }
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics::metrics_output())
}

#[post("/api/mock/orders/create")]
pub async fn create_order(state: web::Data<AppState>, body: web::Bytes) -> HttpResponse {
    let req: CreateOrderRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(_) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["create", "invalid"])
                .inc();
            return HttpResponse::BadRequest().json(ApiError::new(
                "invalid_request",
                "amount, currency and token are required",
            ));
        }
    };

    if !(req.amount.is_finite() && req.amount > 0.0)
        || req.currency.is_empty()
        || req.token.is_empty()
    {
        metrics::ORDER_REQUESTS
            .with_label_values(&["create", "invalid"])
            .inc();
        return HttpResponse::BadRequest().json(ApiError::new(
            "invalid_request",
            "amount must be positive and currency/token non-empty",
        ));
    }

    let order = state.orders.create(req);
    metrics::ORDER_REQUESTS
        .with_label_values(&["create", "created"])
        .inc();
    tracing::info!(order_id = %order.order_id, "order created");
    HttpResponse::Created().json(order)
}

#[get("/api/mock/orders/{order_id}")]
pub async fn get_order(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let order_id = path.into_inner();
    match state.orders.poll(&order_id) {
        Some(order) => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["get", "found"])
                .inc();
            HttpResponse::Ok().json(order)
        }
        None => {
            metrics::ORDER_REQUESTS
                .with_label_values(&["get", "not_found"])
                .inc();
            HttpResponse::NotFound().json(ApiError::new(
                "order_not_found",
                format!("No order with id {order_id}"),
            ))
        }
    }
}

#[post("/api/webhooks/elementpay")]
pub async fn receive_webhook(
    req: HttpRequest,
    state: web::Data<AppState>,
    body: web::Bytes,
) -> HttpResponse {
    // The raw body bytes are captured before any JSON parsing — the
    // signature covers them exactly as sent.
    let header = req
        .headers()
        .get(elementpay::SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    let Some(header) = header else {
        metrics::WEBHOOK_REQUESTS
            .with_label_values(&["missing_signature"])
            .inc();
        tracing::warn!("webhook delivery without signature header");
        return HttpResponse::Unauthorized().json(ApiError::new(
            "missing_signature",
            "X-Webhook-Signature header required",
        ));
    };

    if let Err(reason) = state.verifier.check_at(&body, header, unix_now()) {
        metrics::WEBHOOK_REQUESTS
            .with_label_values(&["invalid_signature"])
            .inc();
        metrics::SIGNATURE_FAILURES
            .with_label_values(&[failure_label(reason)])
            .inc();
        tracing::warn!(reason = %reason, "webhook signature verification failed");
        // One rejection shape for every failure mode; the sender learns
        // nothing about which check failed.
        return HttpResponse::Forbidden().json(ApiError::new(
            "invalid_signature",
            "Webhook signature verification failed",
        ));
    }

    // Only a verified body reaches the parser and the order store.
    let payload: WebhookPayload = match serde_json::from_slice(&body) {
        Ok(p) => p,
        Err(e) => {
            metrics::WEBHOOK_REQUESTS.with_label_values(&["error"]).inc();
            tracing::error!(error = %e, "verified webhook body failed to parse");
            return HttpResponse::InternalServerError().json(ApiError::new(
                "internal_error",
                "Failed to process webhook",
            ));
        }
    };

    let known = state
        .orders
        .apply_status(&payload.data.order_id, payload.data.status);
    metrics::WEBHOOK_REQUESTS
        .with_label_values(&["received"])
        .inc();
    tracing::info!(
        kind = %payload.kind,
        order_id = %payload.data.order_id,
        status = ?payload.data.status,
        known_order = known,
        "webhook received"
    );

    HttpResponse::Ok().json(serde_json::json!({ "received": true }))
}
