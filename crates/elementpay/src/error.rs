use thiserror::Error;

/// Reasons a webhook signature fails verification.
///
/// These are internal to the receiver: at the HTTP boundary every variant
/// collapses to the same rejection so a caller learns nothing about which
/// check failed.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SignatureError {
    #[error("signature header is malformed")]
    MalformedHeader,

    #[error("timestamp outside the freshness window")]
    StaleTimestamp,

    #[error("signature is not valid base64")]
    InvalidEncoding,

    #[error("signature does not match")]
    MacMismatch,
}
