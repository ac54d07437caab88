//! ElementPay webhook protocol.
//!
//! Implements the signed-webhook contract used between ElementPay and
//! merchant backends: HMAC-SHA256 over `"{t}.{rawBody}"`, delivered in an
//! `X-Webhook-Signature: t=<unix-seconds>,v1=<base64 mac>` header, with a
//! symmetric freshness window for replay protection.
//!
//! # Two-party model
//!
//! - **Sender** — signs the raw payload bytes with [`signature::sign`]
//! - **Receiver** — verifies with [`WebhookVerifier`] before any processing
//!
//! # Quick example (receiver)
//!
//! ```
//! use elementpay::WebhookVerifier;
//!
//! let verifier = WebhookVerifier::new(b"whsec_test".to_vec());
//! let t = elementpay::signature::unix_now();
//! let body = br#"{"type":"order.updated","data":{"order_id":"ord_1","status":"settled"}}"#;
//! let header = elementpay::signature::sign(b"whsec_test", t, body);
//! assert!(verifier.verify(body, &header));
//! ```

pub mod constants;
pub mod error;
pub mod order;
pub mod security;
pub mod signature;

// Re-exports
pub use constants::{DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER};
pub use error::SignatureError;
pub use order::{ApiError, CreateOrderRequest, Order, OrderStatus, WebhookData, WebhookPayload};
pub use signature::{SignatureHeader, WebhookVerifier};
