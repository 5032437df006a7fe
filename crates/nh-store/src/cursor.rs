//! Continuation Cursor Codec
//!
//! The cursor is an opaque, URL-safe token encoding the resume offset plus a
//! fingerprint of the query that produced it. A cursor presented with a
//! different filter/sort combination would silently resume the wrong result
//! set, so decoding verifies the fingerprint and rejects the token instead.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{Query, StoreError, StoreResult};

#[derive(Debug, Serialize, Deserialize)]
struct CursorToken {
    offset: u64,
    fingerprint: String,
}

fn fingerprint(query: &Query) -> String {
    let bytes = serde_json::to_vec(query).unwrap_or_default();
    hex::encode(Sha256::digest(&bytes))
}

/// Encodes the resume offset for the next page of `query`.
pub fn encode(offset: u64, query: &Query) -> String {
    let token = CursorToken {
        offset,
        fingerprint: fingerprint(query),
    };
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(&token).unwrap_or_default())
}

/// Decodes a cursor back into a resume offset, verifying it belongs to
/// `query`.
pub fn decode(cursor: &str, query: &Query) -> StoreResult<u64> {
    let bytes = URL_SAFE_NO_PAD
        .decode(cursor)
        .map_err(|_| StoreError::InvalidCursor("malformed token".to_string()))?;
    let token: CursorToken = serde_json::from_slice(&bytes)
        .map_err(|_| StoreError::InvalidCursor("malformed token".to_string()))?;

    if token.fingerprint != fingerprint(query) {
        return Err(StoreError::InvalidCursor(
            "cursor does not belong to this query".to_string(),
        ));
    }

    Ok(token.offset)
}
