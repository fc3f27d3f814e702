//! Remote product API client.
//!
//! # Architecture
//!
//! - Plain `GET {base_url}/products` with an optional query string
//! - The remote catalog is the source of truth - no local sync
//! - In-memory caching via `moka` for product lists (TTL from config)
//! - No pagination parameters are ever sent; paging happens client-side
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_storefront::api::{CatalogClient, ProductQuery};
//!
//! let client = CatalogClient::new(&config.api)?;
//!
//! // Fail-fast: surfaces transport and decode errors
//! let products = client.fetch_products(&ProductQuery::tagged("new-arrival")).await?;
//!
//! // Fail-soft: logs and returns an empty list instead
//! let products = client.load_catalog(&ProductQuery::all()).await;
//! ```

mod cache;
mod client;

pub use cache::ProductQuery;
pub use client::CatalogClient;

use thiserror::Error;

/// Errors that can occur when fetching from the product API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-success status.
    #[error("API returned {status}: {}", truncate_body(.body))]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Request URL could not be built.
    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),
}

const MAX_BODY_CHARS: usize = 200;

fn truncate_body(body: &str) -> String {
    if body.trim().is_empty() {
        return "(empty body)".to_string();
    }
    let mut out: String = body.chars().take(MAX_BODY_CHARS).collect();
    if body.chars().count() > MAX_BODY_CHARS {
        out.push_str("...");
    }
    out
}
