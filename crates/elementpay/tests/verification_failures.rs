use base64::Engine;

use elementpay::signature::{self, unix_now};
use elementpay::{SignatureError, WebhookVerifier, DEFAULT_TOLERANCE_SECS};

const SECRET: &[u8] = b"whsec_test";
const BODY: &[u8] = br#"{"type":"order.updated","data":{"order_id":"ord_1","status":"settled"}}"#;

fn verifier() -> WebhookVerifier {
    WebhookVerifier::new(SECRET.to_vec())
}

// -- Acceptance --

#[test]
fn test_valid_signature_accepted() {
    let header = signature::sign(SECRET, unix_now(), BODY);
    assert!(verifier().verify(BODY, &header));
}

#[test]
fn test_valid_signature_within_window() {
    let now = unix_now();
    for skew in [-DEFAULT_TOLERANCE_SECS, -60, 0, 60, DEFAULT_TOLERANCE_SECS] {
        let header = signature::sign(SECRET, now + skew, BODY);
        assert!(
            verifier().check_at(BODY, &header, now).is_ok(),
            "skew {skew} should be inside the window"
        );
    }
}

// -- MAC sensitivity --

#[test]
fn test_single_byte_tamper_rejected() {
    let header = signature::sign(SECRET, unix_now(), BODY);

    // Flip one bit in each byte position of the body in turn.
    for i in 0..BODY.len() {
        let mut tampered = BODY.to_vec();
        tampered[i] ^= 0x01;
        assert!(
            !verifier().verify(&tampered, &header),
            "bit flip at byte {i} should invalidate the MAC"
        );
    }
}

#[test]
fn test_wrong_secret_rejected() {
    let header = signature::sign(b"whsec_other", unix_now(), BODY);
    assert!(!verifier().verify(BODY, &header));
}

#[test]
fn test_timestamp_substitution_rejected() {
    // Signature computed for one timestamp, header claims another. Both
    // inside the window, so only the MAC check can catch it.
    let now = unix_now();
    let header = signature::sign(SECRET, now, BODY);
    let mac = header.split_once(",v1=").unwrap().1;
    let forged = format!("t={},v1={}", now - 30, mac);
    assert_eq!(
        verifier().check_at(BODY, &forged, now),
        Err(SignatureError::MacMismatch)
    );
}

// -- Freshness --

#[test]
fn test_stale_timestamp_rejected() {
    let now = unix_now();
    let header = signature::sign(SECRET, now - DEFAULT_TOLERANCE_SECS - 1, BODY);
    assert_eq!(
        verifier().check_at(BODY, &header, now),
        Err(SignatureError::StaleTimestamp)
    );
}

#[test]
fn test_future_timestamp_rejected() {
    // The window is symmetric: a signature too far in the future is
    // rejected even though its MAC is correct.
    let now = unix_now();
    let header = signature::sign(SECRET, now + DEFAULT_TOLERANCE_SECS + 1, BODY);
    assert_eq!(
        verifier().check_at(BODY, &header, now),
        Err(SignatureError::StaleTimestamp)
    );
}

#[test]
fn test_extreme_timestamps_rejected() {
    // Boundary integers parse fine but sit astronomically far outside the
    // window; the distance check must not overflow.
    let now = unix_now();
    for t in [i64::MIN, i64::MIN + 1, -1, i64::MAX - 1, i64::MAX] {
        let header = format!("t={t},v1=AAAA");
        assert_eq!(
            verifier().check_at(BODY, &header, now),
            Err(SignatureError::StaleTimestamp),
            "timestamp {t}"
        );
        assert!(!verifier().verify(BODY, &header));
    }
}

// -- Malformed input, must never panic --

#[test]
fn test_missing_timestamp_component() {
    assert!(!verifier().verify(BODY, "v1=c29tZW1hYw=="));
}

#[test]
fn test_missing_mac_component() {
    assert!(!verifier().verify(BODY, "t=1706500000"));
}

#[test]
fn test_garbage_header() {
    for header in ["", ",,,", "t=,v1=", "t==5,v1=x", "no pairs here", "t=1e9,v1=x"] {
        assert!(!verifier().verify(BODY, header), "header {header:?}");
    }
}

#[test]
fn test_non_base64_mac() {
    let now = unix_now();
    let header = format!("t={now},v1=!!not-base64!!");
    assert_eq!(
        verifier().check_at(BODY, &header, now),
        Err(SignatureError::InvalidEncoding)
    );
}

#[test]
fn test_decoded_length_mismatch() {
    // Valid base64 but the wrong digest length: rejected before any byte
    // comparison is attempted.
    let now = unix_now();
    let short = base64::engine::general_purpose::STANDARD.encode(b"short");
    let header = format!("t={now},v1={short}");
    assert_eq!(
        verifier().check_at(BODY, &header, now),
        Err(SignatureError::MacMismatch)
    );
}

// -- Concrete vector from the protocol contract --

#[test]
fn test_documented_scenario() {
    let t = unix_now();
    let header = signature::sign(b"whsec_test", t, BODY);
    assert!(WebhookVerifier::new(b"whsec_test".to_vec()).verify(BODY, &header));

    let mut altered = BODY.to_vec();
    let pos = altered.iter().position(|&b| b == b's').unwrap();
    altered[pos] = b'S';
    assert!(!WebhookVerifier::new(b"whsec_test".to_vec()).verify(&altered, &header));
}
