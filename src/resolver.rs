use tracing::debug;

use crate::fetcher::fetch;
use crate::models::LookupResult;
use crate::normalize::normalize;
use crate::sanitize::sanitize;
use crate::state::AppState;

// Walk the source list in declared order, strictly sequentially, and
// return the first non-empty normalized result. A failed or empty
// source is skipped, never escalated. Exhaustion returns None without
// distinguishing "all timed out" from "all returned empty" - the
// caller only gets the coarse not-found signal.
pub async fn resolve(state: &AppState, query: &str) -> Option<LookupResult> {
    for source in &state.sources {
        let Some(mut raw) = fetch(state, source, query).await else {
            debug!(source = %source.name, "source failed, trying next");
            continue;
        };

        // sanitize before shape matching, so attribution never survives
        sanitize(&mut raw, &state.vendor_scrub);

        let items = normalize(&raw, source.shape);
        if items.is_empty() {
            debug!(source = %source.name, "source returned no records");
            continue;
        }

        return Some(LookupResult {
            items,
            source_name: source.name.clone(),
        });
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, routing::get};
    use dashmap::DashMap;
    use serde_json::json;
    use std::time::Duration;

    use crate::config::Branding;
    use crate::models::{ResponseShape, SourceDescriptor};
    use crate::quota::QuotaStore;

    // Serve a fixed JSON body on a loopback port
    async fn spawn_source(body: serde_json::Value) -> String {
        let app = Router::new().route("/", get(move || async move { Json(body.clone()) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/?q={{query}}", addr)
    }

    fn test_state(sources: Vec<SourceDescriptor>) -> AppState {
        AppState {
            client: reqwest::Client::new(),
            sources,
            email_lookup: false,
            quota: QuotaStore::new(100, Duration::from_secs(60)),
            cache: DashMap::new(),
            cache_ttl: Duration::from_secs(300),
            upstream_timeout: Duration::from_secs(2),
            branding: Branding {
                brand: "test".to_string(),
                owner: "owner".to_string(),
                telegram: "tg".to_string(),
            },
            vendor_scrub: "via AnshAPI".to_string(),
        }
    }

    fn source(name: &str, template: String, shape: ResponseShape) -> SourceDescriptor {
        SourceDescriptor {
            name: name.to_string(),
            url_template: template,
            shape,
        }
    }

    #[tokio::test]
    async fn first_non_empty_source_wins() {
        let a = spawn_source(json!({ "result": [] })).await;
        let b = spawn_source(json!({ "result": ["result1"] })).await;

        let state = test_state(vec![
            source("a", a, ResponseShape::ResultList),
            source("b", b, ResponseShape::ResultList),
        ]);

        let found = resolve(&state, "7070096514").await.unwrap();
        assert_eq!(found.source_name, "b");
        assert_eq!(found.items, vec![json!("result1")]);
    }

    #[tokio::test]
    async fn unreachable_source_is_skipped() {
        // nothing listens on this port
        let dead = "http://127.0.0.1:9/?q={query}".to_string();
        let alive = spawn_source(json!({ "data": { "result": [{ "name": "x" }] } })).await;

        let state = test_state(vec![
            source("dead", dead, ResponseShape::ResultList),
            source("alive", alive, ResponseShape::DataResult),
        ]);

        let found = resolve(&state, "7070096514").await.unwrap();
        assert_eq!(found.source_name, "alive");
    }

    #[tokio::test]
    async fn exhaustion_is_none() {
        let empty = spawn_source(json!({ "result": [] })).await;
        let state = test_state(vec![source("empty", empty, ResponseShape::ResultList)]);
        assert!(resolve(&state, "7070096514").await.is_none());
    }

    #[tokio::test]
    async fn attribution_is_scrubbed_from_returned_records() {
        let tainted = spawn_source(json!({
            "result": [{ "name": "John via AnshAPI", "credits": 2 }]
        }))
        .await;

        let state = test_state(vec![source("tainted", tainted, ResponseShape::ResultList)]);
        let found = resolve(&state, "7070096514").await.unwrap();
        assert_eq!(found.items, vec![json!({ "name": "John" })]);
    }

    #[tokio::test]
    async fn repeat_lookup_is_served_from_cache() {
        let upstream = spawn_source(json!({ "result": ["r"] })).await;
        let state = test_state(vec![source("c", upstream, ResponseShape::ResultList)]);

        let hits_before = crate::metrics::CACHE_HITS.get();
        resolve(&state, "7070096514").await.unwrap();
        resolve(&state, "7070096514").await.unwrap();
        assert!(crate::metrics::CACHE_HITS.get() > hits_before);
        assert_eq!(state.cache.len(), 1);
    }
}
