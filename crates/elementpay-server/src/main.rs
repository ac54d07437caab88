use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::{web, App, HttpServer};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use elementpay::{WebhookVerifier, DEFAULT_TOLERANCE_SECS};
use elementpay_server::routes;
use elementpay_server::state::AppState;
use elementpay_server::store::OrderStore;

fn parse_cors_origins() -> Vec<String> {
    match std::env::var("ALLOWED_ORIGINS") {
        Ok(origins) => origins
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        Err(_) => vec![],
    }
}

fn build_cors(origins: &[String]) -> Cors {
    if origins.is_empty() {
        // Default: allow localhost on any port
        Cors::default()
            .allowed_origin_fn(|origin, _| {
                origin
                    .to_str()
                    .map(|o| {
                        // Match http://localhost or http://localhost:PORT exactly
                        o == "http://localhost" || o.starts_with("http://localhost:")
                    })
                    .unwrap_or(false)
            })
            .allow_any_method()
            .allowed_headers(vec!["content-type", "authorization", "x-webhook-signature"])
            .max_age(3600)
    } else {
        let mut cors = Cors::default();
        for origin in origins {
            cors = cors.allowed_origin(origin);
        }
        cors.allow_any_method()
            .allowed_headers(vec!["content-type", "authorization", "x-webhook-signature"])
            .max_age(3600)
    }
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let webhook_secret: Vec<u8> = match std::env::var("WEBHOOK_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
    {
        Some(s) => {
            let bytes = s.into_bytes();
            if bytes.len() < 32 {
                tracing::warn!(
                    "WEBHOOK_SECRET is only {} bytes (minimum 32 recommended) — \
                     use `openssl rand -hex 32` to generate a secure secret",
                    bytes.len()
                );
            }
            bytes
        }
        None => {
            tracing::error!(
                "WEBHOOK_SECRET is required. \
                 Set it to the secret shared with the webhook sender \
                 (e.g. `openssl rand -hex 32`). For local development, \
                 any non-empty value will work."
            );
            std::process::exit(1);
        }
    };

    let tolerance_secs: i64 = std::env::var("WEBHOOK_TOLERANCE_SECS")
        .ok()
        .and_then(|t| t.parse().ok())
        .unwrap_or(DEFAULT_TOLERANCE_SECS);

    // Separate metrics token (never the webhook secret)
    let metrics_token = std::env::var("METRICS_TOKEN")
        .ok()
        .filter(|s| !s.is_empty())
        .map(|s| s.into_bytes());

    if metrics_token.is_none() {
        tracing::warn!("METRICS_TOKEN not set — /metrics requires ELEMENTPAY_PUBLIC_METRICS=true");
    }

    let state = web::Data::new(AppState {
        verifier: WebhookVerifier::new(webhook_secret).with_tolerance(tolerance_secs),
        orders: OrderStore::new(),
        metrics_token,
    });

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(4021);

    let rate_limit_rpm: u64 = std::env::var("RATE_LIMIT_RPM")
        .ok()
        .and_then(|r| r.parse().ok())
        .unwrap_or(120);

    let cors_origins = parse_cors_origins();

    tracing::info!("ElementPay server listening on port {port}");
    tracing::info!("Webhook freshness window: {tolerance_secs}s (symmetric)");
    tracing::info!("Rate limit: {rate_limit_rpm} req/min per IP");
    tracing::info!("  POST http://localhost:{port}/api/mock/orders/create");
    tracing::info!("  POST http://localhost:{port}/api/webhooks/elementpay");

    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_minute(rate_limit_rpm)
        .finish()
        .expect("failed to build rate limiter config");

    HttpServer::new(move || {
        App::new()
            .wrap(build_cors(&cors_origins))
            .wrap(Governor::new(&governor_conf))
            .app_data(state.clone())
            .app_data(web::PayloadConfig::default().limit(65_536))
            .service(routes::health)
            .service(routes::metrics_endpoint)
            .service(routes::create_order)
            .service(routes::get_order)
            .service(routes::receive_webhook)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
