use clap::Parser;

use crate::models::{ResponseShape, SourceDescriptor};

// CLI argument structure
#[derive(Parser, Debug, Clone)]
#[command(name = "lookup-gateway")]
#[command(about = "Quota-gated lookup gateway over third-party data sources")]
pub struct Args {
    // Port to run the server on
    #[arg(short, long, default_value_t = 8080)]
    pub port: u16,

    // Upstream sources, comma-separated, in fallback priority order.
    // Each entry is "name|url-template|shape" where the template contains
    // a {query} placeholder and shape is one of: data-result, result, bare.
    #[arg(
        short,
        long,
        default_value = "primary|https://gauravapi.gauravyt492.workers.dev/?mobile={query}|data-result"
    )]
    pub sources: String,

    // Enable the (reserved) email lookup path
    #[arg(long, default_value_t = false)]
    pub email_lookup: bool,

    // Free requests allowed per client per window
    #[arg(long, default_value_t = 100)]
    pub free_limit: u32,

    // Quota window in seconds (default 24 hours)
    #[arg(long, default_value_t = 86400)]
    pub quota_window: u64,

    // Upstream request timeout in seconds
    #[arg(long, default_value_t = 8)]
    pub upstream_timeout: u64,

    // Upstream response cache TTL in seconds
    #[arg(short, long, default_value_t = 300)]
    pub cache_ttl: u64,

    // Brand string included in every response
    #[arg(long, default_value = "BLACK 🖤 ENTHEM")]
    pub brand: String,

    // Owner contact shown in the quota-exceeded response
    #[arg(long, default_value = "@BlackEnthemOwner")]
    pub owner: String,

    // Telegram link shown in the quota-exceeded response
    #[arg(long, default_value = "https://t.me/blackenthem_1")]
    pub telegram: String,

    // Vendor attribution substring scrubbed from upstream string values
    #[arg(long, default_value = "via AnshAPI")]
    pub vendor_scrub: String,
}

// Strings stamped into response envelopes
#[derive(Debug, Clone)]
pub struct Branding {
    pub brand: String,
    pub owner: String,
    pub telegram: String,
}

// Parse the comma-separated source list "name|url|shape,name|url|shape"
pub fn parse_sources(sources_str: &str) -> Vec<SourceDescriptor> {
    let sources: Vec<SourceDescriptor> = sources_str
        .split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|entry| {
            let mut parts = entry.split('|');
            let name = parts.next().unwrap_or("").trim();
            let template = parts.next().unwrap_or("").trim();
            let shape_tag = parts.next().unwrap_or("").trim();

            if name.is_empty() || !template.contains("{query}") {
                panic!("Bad source entry '{}': expected name|url-template|shape", entry);
            }
            let shape = ResponseShape::parse(shape_tag).unwrap_or_else(|| {
                panic!("Unknown response shape '{}' for source '{}'", shape_tag, name)
            });

            SourceDescriptor {
                name: name.to_string(),
                url_template: template.to_string(),
                shape,
            }
        })
        .collect();

    if sources.is_empty() {
        panic!("At least one source required");
    }

    sources
}
