use serde_json::Value;
use std::time::Instant;
use tracing::warn;

use crate::cache::{CacheEntry, make_cache_key};
use crate::metrics::{CACHE_HITS, CACHE_MISSES, CACHE_SIZE, UPSTREAM_FAILURES};
use crate::models::SourceDescriptor;
use crate::state::AppState;

// Sources behave differently for browser-looking clients
const UPSTREAM_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// One bounded-time call to one source. Every failure mode - timeout,
// non-2xx, network error, non-JSON body - comes back as None; nothing
// propagates past this boundary. Successful bodies are cached for a
// short TTL as a best-effort optimization.
pub async fn fetch(state: &AppState, source: &SourceDescriptor, query: &str) -> Option<Value> {
    let cache_key = make_cache_key(&source.name, query);

    if let Some(entry) = state.cache.get(&cache_key) {
        if entry.created_at.elapsed() < state.cache_ttl {
            CACHE_HITS.inc();
            return Some(entry.response.clone());
        }
    }
    CACHE_MISSES.inc();

    let url = source.build_url(query);
    let result = state
        .client
        .get(&url)
        .header(reqwest::header::USER_AGENT, UPSTREAM_USER_AGENT)
        .timeout(state.upstream_timeout)
        .send()
        .await;

    let response = match result {
        Ok(res) if res.status().is_success() => res,
        Ok(res) => {
            warn!(source = %source.name, status = %res.status(), "upstream returned error status");
            UPSTREAM_FAILURES.inc();
            return None;
        }
        Err(err) => {
            warn!(source = %source.name, error = %err, "upstream request failed");
            UPSTREAM_FAILURES.inc();
            return None;
        }
    };

    match response.json::<Value>().await {
        Ok(body) => {
            state.cache.insert(
                cache_key,
                CacheEntry {
                    response: body.clone(),
                    created_at: Instant::now(),
                },
            );
            CACHE_SIZE.set(state.cache.len() as f64);
            Some(body)
        }
        Err(err) => {
            warn!(source = %source.name, error = %err, "upstream body was not JSON");
            UPSTREAM_FAILURES.inc();
            None
        }
    }
}
