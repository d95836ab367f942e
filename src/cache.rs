use sha2::{Digest, Sha256};
use serde_json::Value;
use std::time::Instant;

// Cached upstream body with timestamp
#[derive(Clone)]
pub struct CacheEntry {
    pub response: Value,
    pub created_at: Instant,
}

// Cache key (hash of source name + query value)
pub fn make_cache_key(source_name: &str, query: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source_name.as_bytes());
    hasher.update(query.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_stable_and_distinguishes_sources() {
        assert_eq!(make_cache_key("a", "123"), make_cache_key("a", "123"));
        assert_ne!(make_cache_key("a", "123"), make_cache_key("b", "123"));
        assert_ne!(make_cache_key("a", "123"), make_cache_key("a", "124"));
    }
}
