mod cache;
mod client_id;
mod config;
mod fetcher;
mod handlers;
mod metrics;
mod models;
mod normalize;
mod number;
mod quota;
mod resolver;
mod response;
mod sanitize;
mod state;

use axum::{
    Router,
    routing::{any, get},
};
use clap::Parser;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{Args, Branding, parse_sources};
use crate::quota::QuotaStore;
use crate::state::AppState;

// This is main async function with tokio
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // parse cli arguments
    let args = Args::parse();
    let sources = parse_sources(&args.sources);

    // creating shared state
    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        sources,
        email_lookup: args.email_lookup,
        quota: QuotaStore::new(args.free_limit, Duration::from_secs(args.quota_window)),
        cache: DashMap::new(),
        cache_ttl: Duration::from_secs(args.cache_ttl),
        upstream_timeout: Duration::from_secs(args.upstream_timeout),
        branding: Branding {
            brand: args.brand.clone(),
            owner: args.owner.clone(),
            telegram: args.telegram.clone(),
        },
        vendor_scrub: args.vendor_scrub.clone(),
    });

    // every method hits the root handler, which answers 405 itself so
    // the envelope stays uniform
    let app = Router::new()
        .route("/", any(handlers::lookup_handler))
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .with_state(state.clone());

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();

    info!("Gateway running on http://localhost:{}", args.port);
    for (i, source) in state.sources.iter().enumerate() {
        info!("  source [{}] {} ({:?})", i + 1, source.name, source.shape);
    }
    info!(
        "Quota: {} requests per {} seconds",
        args.free_limit, args.quota_window
    );
    info!("Upstream timeout: {}s, cache TTL: {}s", args.upstream_timeout, args.cache_ttl);

    axum::serve(listener, app).await.unwrap();
}
