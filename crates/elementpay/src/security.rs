//! Constant-time comparison helpers.
//!
//! All implementations use the `subtle` crate for timing-attack resistance.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Constant-time comparison of two equal-length byte slices.
///
/// Returns `false` without comparing when the lengths differ — a length
/// mismatch is not secret-dependent, so the early exit leaks nothing.
/// Used for MAC comparison where both sides are fixed-length digests.
pub fn constant_time_eq_len(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Constant-time byte comparison that does not leak input lengths or content.
///
/// Both inputs are hashed to fixed-length SHA-256 digests before comparison,
/// so timing reveals neither the content nor the length of either input.
/// Used for the `/metrics` bearer token, where the provided value may be
/// any length; MAC comparison uses [`constant_time_eq_len`] instead.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    let ha = Sha256::digest(a);
    let hb = Sha256::digest(b);
    ha.ct_eq(&hb).into()
}
