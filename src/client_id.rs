use axum::http::{HeaderMap, header};
use sha2::{Digest, Sha256};

// How many user-agent characters feed the key
const UA_PREFIX_LEN: usize = 20;

// Derive a client key from forwarded IP + user-agent prefix (hashed).
// Both headers are caller-controllable, so this is a spoofable,
// collidable heuristic for quota bucketing, not an identity.
pub fn client_key(headers: &HeaderMap) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("unknown");

    let ua = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let ua_prefix: String = ua.chars().take(UA_PREFIX_LEN).collect();

    let mut hasher = Sha256::new();
    hasher.update(ip.as_bytes());
    hasher.update(ua_prefix.as_bytes());
    format!("{:x}", hasher.finalize())
}
