//! Webhook signature construction and verification.
//!
//! The wire format follows the `X-Webhook-Signature` header contract:
//! `t=<unix-seconds>,v1=<base64 HMAC-SHA256>`, where the MAC is computed
//! over the ASCII concatenation `"{t}.{rawBody}"`. The raw body bytes must
//! be captured exactly as received — any re-serialization changes the byte
//! sequence and invalidates the signature.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::DEFAULT_TOLERANCE_SECS;
use crate::error::SignatureError;
use crate::security;

type HmacSha256 = Hmac<Sha256>;

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

/// Parsed form of the signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub mac: String,
}

impl SignatureHeader {
    /// Parse a `t=<unix-seconds>,v1=<base64 mac>` header value.
    ///
    /// Splits on `,` then on the first `=` of each pair, so base64 padding
    /// in the MAC survives. Unknown keys are ignored; a missing `t=` or
    /// `v1=` entry, or a non-integer timestamp, is malformed.
    pub fn parse(header: &str) -> Result<Self, SignatureError> {
        let mut timestamp = None;
        let mut mac = None;

        for part in header.split(',') {
            let Some((key, value)) = part.split_once('=') else {
                continue;
            };
            match key {
                "t" if timestamp.is_none() => {
                    timestamp = Some(
                        value
                            .parse::<i64>()
                            .map_err(|_| SignatureError::MalformedHeader)?,
                    );
                }
                "v1" if mac.is_none() => mac = Some(value.to_string()),
                _ => {}
            }
        }

        match (timestamp, mac) {
            (Some(timestamp), Some(mac)) => Ok(Self { timestamp, mac }),
            _ => Err(SignatureError::MalformedHeader),
        }
    }
}

/// HMAC-SHA256 over `"{timestamp}.{body}"`.
fn compute_mac(secret: &[u8], timestamp: i64, body: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);
    mac.finalize().into_bytes().to_vec()
}

/// Sign raw payload bytes, returning the complete header value
/// `t={timestamp},v1={base64 mac}`.
pub fn sign(secret: &[u8], timestamp: i64, body: &[u8]) -> String {
    let mac = base64::engine::general_purpose::STANDARD.encode(compute_mac(secret, timestamp, body));
    format!("t={timestamp},v1={mac}")
}

/// Verifies incoming webhook signatures against a shared secret.
///
/// Stateless apart from the secret and tolerance, both fixed at
/// construction; safe to share across concurrent requests.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: Vec<u8>,
    tolerance_secs: i64,
}

impl WebhookVerifier {
    /// A verifier with the default freshness window
    /// ([`DEFAULT_TOLERANCE_SECS`]).
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            secret,
            tolerance_secs: DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Override the freshness window (seconds, symmetric).
    pub fn with_tolerance(mut self, tolerance_secs: i64) -> Self {
        self.tolerance_secs = tolerance_secs;
        self
    }

    /// Verify a signature header against the raw body bytes.
    ///
    /// Every failure mode — malformed header, stale timestamp, bad base64,
    /// MAC mismatch — collapses to `false`. Nothing is propagated and
    /// nothing distinguishes which check failed.
    pub fn verify(&self, raw_body: &[u8], header: &str) -> bool {
        self.check_at(raw_body, header, unix_now()).is_ok()
    }

    /// The same check with an explicit clock, returning the failure reason.
    ///
    /// Exposed for callers that want to log or count rejection reasons;
    /// the reason must not be surfaced to the webhook sender.
    pub fn check_at(
        &self,
        raw_body: &[u8],
        header: &str,
        now: i64,
    ) -> Result<(), SignatureError> {
        let parsed = SignatureHeader::parse(header)?;

        // Symmetric window: future-dated signatures beyond the tolerance
        // are rejected too, not just stale ones. abs_diff keeps extreme
        // attacker-chosen timestamps (i64::MIN/MAX) from overflowing.
        if now.abs_diff(parsed.timestamp) > self.tolerance_secs.max(0) as u64 {
            return Err(SignatureError::StaleTimestamp);
        }

        let expected = compute_mac(&self.secret, parsed.timestamp, raw_body);
        let provided = base64::engine::general_purpose::STANDARD
            .decode(parsed.mac.as_bytes())
            .map_err(|_| SignatureError::InvalidEncoding)?;

        // Length is not secret-dependent, so rejecting before the byte
        // comparison leaks nothing.
        if provided.len() != expected.len() {
            return Err(SignatureError::MacMismatch);
        }

        if security::constant_time_eq_len(&provided, &expected) {
            Ok(())
        } else {
            Err(SignatureError::MacMismatch)
        }
    }
}
