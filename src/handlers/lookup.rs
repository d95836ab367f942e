use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::client_id::client_key;
use crate::metrics::{QUOTA_DENIED, REQUEST_LATENCY, REQUEST_TOTAL};
use crate::models::LookupParams;
use crate::number::{clean_number, validate_email, validate_mobile};
use crate::resolver::resolve;
use crate::response::{Outcome, build, service_description};
use crate::state::AppState;

// Root route handler - the whole lookup flow lives behind GET /
pub async fn lookup_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    headers: HeaderMap,
    RawQuery(raw_query): RawQuery,
) -> impl IntoResponse {
    REQUEST_TOTAL.inc();
    let start = Instant::now();

    // parsed leniently by hand so a malformed or repeated parameter
    // still gets the branded envelope, never an extractor rejection
    let params = LookupParams::from_query(raw_query.as_deref().unwrap_or(""));
    let response = dispatch(&state, &method, &headers, raw_query.as_deref(), &params).await;

    REQUEST_LATENCY.observe(start.elapsed().as_secs_f64());
    response
}

async fn dispatch(
    state: &AppState,
    method: &Method,
    headers: &HeaderMap,
    raw_query: Option<&str>,
    params: &LookupParams,
) -> (StatusCode, HeaderMap, String) {
    if method != Method::GET {
        return build(&Outcome::MethodNotAllowed, &state.branding);
    }

    // Home page
    if raw_query.is_none_or(str::is_empty) {
        return service_description(&state.branding);
    }

    // The check consumes quota even when the query later turns out
    // invalid - the check IS the consumption event
    let decision = state.quota.check(&client_key(headers));
    if !decision.allowed {
        QUOTA_DENIED.inc();
        return build(&Outcome::QuotaExceeded, &state.branding);
    }

    if let Some(raw_number) = params.mobile_param() {
        return mobile_lookup(state, raw_number, decision.remaining).await;
    }

    // Reserved path: only answers when an email source is configured,
    // otherwise it falls through to the generic parameter error
    if let Some(email) = params.email.as_deref() {
        if state.email_lookup {
            let outcome = if validate_email(email) {
                Outcome::NotImplemented("Email lookup coming soon".to_string())
            } else {
                Outcome::Invalid("Invalid Email Address".to_string())
            };
            return build(&outcome, &state.branding);
        }
    }

    build(
        &Outcome::Invalid("Missing or invalid search parameter".to_string()),
        &state.branding,
    )
}

async fn mobile_lookup(
    state: &AppState,
    raw_number: &str,
    remaining: u32,
) -> (StatusCode, HeaderMap, String) {
    let cleaned = clean_number(Some(raw_number)).filter(|n| validate_mobile(n));

    let Some(number) = cleaned else {
        return build(
            &Outcome::Invalid("Invalid Indian Mobile Number".to_string()),
            &state.branding,
        );
    };

    match resolve(state, &number).await {
        Some(found) => {
            info!(source = %found.source_name, records = found.items.len(), "lookup resolved");
            build(
                &Outcome::Success {
                    result: found.items,
                    remaining,
                },
                &state.branding,
            )
        }
        None => build(
            &Outcome::NotFound("No information available".to_string()),
            &state.branding,
        ),
    }
}
