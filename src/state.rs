use dashmap::DashMap;
use std::time::Duration;

use crate::cache::CacheEntry;
use crate::config::Branding;
use crate::models::SourceDescriptor;
use crate::quota::QuotaStore;

// App's shared state
pub struct AppState {
    pub client: reqwest::Client,
    pub sources: Vec<SourceDescriptor>, // fallback priority order
    pub email_lookup: bool,
    pub quota: QuotaStore,
    pub cache: DashMap<String, CacheEntry>,
    pub cache_ttl: Duration,
    pub upstream_timeout: Duration,
    pub branding: Branding,
    pub vendor_scrub: String,
}
