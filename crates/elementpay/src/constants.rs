/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "X-Webhook-Signature";

/// Default freshness window for webhook timestamps, in seconds.
///
/// The window is symmetric: signatures dated more than this far in the past
/// *or* the future are rejected, bounding replay exposure while tolerating
/// clock skew in either direction. Override per-verifier with
/// [`WebhookVerifier::with_tolerance`](crate::WebhookVerifier::with_tolerance).
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Mock settlement simulator: seconds an order stays in `created`.
pub const CREATED_PHASE_SECS: i64 = 8;

/// Mock settlement simulator: seconds before an order leaves `processing`.
pub const PROCESSING_PHASE_SECS: i64 = 18;

/// Mock settlement simulator: probability an order settles (vs. fails).
pub const SETTLE_PROBABILITY: f64 = 0.8;
