use elementpay::WebhookVerifier;

use crate::store::OrderStore;

/// Shared application state for the server.
pub struct AppState {
    /// Verifier holding the webhook shared secret. The secret is mandatory —
    /// the server will not start without it — and is never logged.
    pub verifier: WebhookVerifier,
    /// In-memory order map. Lost on restart, which is the intended demo
    /// behavior (no persistence).
    pub orders: OrderStore,
    /// Separate bearer token for the /metrics endpoint (not the webhook secret).
    pub metrics_token: Option<Vec<u8>>,
}
