//! # Defensive XDR Decoding
//!
//! Payloads are diagnostic only. A payload that does not decode becomes
//! `None` instead of failing the outcome.

use crate::domain::XdrPayload;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

/// Decode a base64 XDR payload, or `None` if absent or malformed.
pub fn decode_xdr(payload: Option<&str>) -> Option<XdrPayload> {
    let base64 = payload?.trim();
    if base64.is_empty() {
        return None;
    }
    let bytes = STANDARD.decode(base64).ok()?;
    Some(XdrPayload {
        base64: base64.to_string(),
        bytes,
    })
}
