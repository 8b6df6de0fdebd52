use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};

/// Tokens ended by logout, keyed by their hash, with their expiry
static REVOKED: Lazy<RwLock<HashMap<String, usize>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Hash token for storage
fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// End a session. The token stays rejected until it would have expired anyway.
pub fn revoke(token: &str, expires_at: usize) {
    let now = Utc::now().timestamp() as usize;
    let mut revoked = REVOKED.write().unwrap_or_else(|e| e.into_inner());
    revoked.retain(|_, exp| *exp > now);
    revoked.insert(hash_token(token), expires_at);
}

pub fn is_revoked(token: &str) -> bool {
    REVOKED
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .contains_key(&hash_token(token))
}
