//! Product API client implementation.
//!
//! Uses `reqwest` for HTTP and caches product lists using `moka`.

use std::sync::Arc;

use moka::future::Cache;
use shopfront_core::Product;
use tracing::{debug, instrument};
use url::Url;

use super::{CatalogError, ProductQuery};
use crate::config::CatalogApiConfig;
use crate::error::AppError;

const LOG_BODY_CHARS: usize = 500;

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the remote product API.
///
/// Cheap to clone; clones share the HTTP connection pool and the cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    products_url: Url,
    cache: Cache<ProductQuery, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new product API client.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the HTTP client cannot be built or the
    /// products endpoint cannot be derived from the base URL.
    pub fn new(config: &CatalogApiConfig) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                products_url: config.base_url.join("products")?,
                cache,
            }),
        })
    }

    /// The `GET /products` endpoint this client talks to.
    #[must_use]
    pub fn products_url(&self) -> &Url {
        &self.inner.products_url
    }

    /// Fetch the product list for `query`, serving from cache when possible.
    ///
    /// The list is returned in API order, unmodified.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status or an
    /// undecodable body. Failures are never cached.
    #[instrument(skip(self), fields(tag = ?query.tag, category = ?query.category))]
    pub async fn fetch_products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(query).await {
            debug!(count = products.len(), "Product list cache hit");
            return Ok(products);
        }

        let products = self.request(query).await?;
        debug!(count = products.len(), "Fetched product list");

        self.inner
            .cache
            .insert(query.clone(), products.clone())
            .await;
        Ok(products)
    }

    /// Fetch the product list for `query`, falling back to an empty list.
    ///
    /// Any `CatalogError` is reported and swallowed so a listing view can
    /// always render (showing "no products found" instead of failing).
    pub async fn load_catalog(&self, query: &ProductQuery) -> Vec<Product> {
        match self.fetch_products(query).await {
            Ok(products) => products,
            Err(e) => {
                AppError::from(e).report();
                Vec::new()
            }
        }
    }

    /// Drop the cached response for `query` so the next fetch hits the API.
    pub async fn invalidate(&self, query: &ProductQuery) {
        self.inner.cache.invalidate(query).await;
    }

    /// Drop every cached response.
    pub fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
    }

    /// Issue `GET /products` and decode the body.
    async fn request(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.products_url.clone())
            .query(&query.params())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CatalogError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(LOG_BODY_CHARS).collect::<String>(),
                "Product API returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str::<Vec<Product>>(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(LOG_BODY_CHARS).collect::<String>(),
                "Failed to parse product list"
            );
            CatalogError::Decode(e)
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::extract::{Query, State};
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};

    use super::*;

    #[derive(Clone, Default)]
    struct Fake {
        hits: Arc<AtomicUsize>,
    }

    async fn products(
        State(fake): State<Fake>,
        Query(params): Query<HashMap<String, String>>,
    ) -> impl IntoResponse {
        fake.hits.fetch_add(1, Ordering::SeqCst);
        match params.get("tag").map(String::as_str) {
            Some("broken") => (StatusCode::OK, "not json").into_response(),
            Some("down") => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
            Some("busy") => (StatusCode::TOO_MANY_REQUESTS, [("Retry-After", "7")], "").into_response(),
            Some(tag) => Json(serde_json::json!([
                {"_id": format!("{tag}-1"), "title": "Tagged", "price": 20, "category": "Bags", "mainImage": "t.jpg"}
            ]))
            .into_response(),
            None => Json(serde_json::json!([
                {"_id": "a", "title": "A", "price": 30, "category": "Shoes", "mainImage": "a.jpg"},
                {"_id": "b", "title": "B", "price": 10, "category": "Bags", "mainImage": "b.jpg"}
            ]))
            .into_response(),
        }
    }

    async fn serve(ttl: Duration) -> (CatalogClient, Fake) {
        let fake = Fake::default();
        let app = Router::new()
            .route("/api/products", get(products))
            .with_state(fake.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let mut config = CatalogApiConfig::with_base_url(&format!("http://{addr}/api")).unwrap();
        config.cache_ttl = ttl;
        (CatalogClient::new(&config).unwrap(), fake)
    }

    #[tokio::test]
    async fn test_fetch_keeps_api_order() {
        let (client, _) = serve(Duration::from_secs(60)).await;
        let products = client.fetch_products(&ProductQuery::all()).await.unwrap();
        let ids: Vec<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn test_fetch_sends_tag() {
        let (client, _) = serve(Duration::from_secs(60)).await;
        let products = client
            .fetch_products(&ProductQuery::tagged("new-arrival"))
            .await
            .unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.as_str(), "new-arrival-1");
    }

    #[tokio::test]
    async fn test_second_fetch_is_cached() {
        let (client, fake) = serve(Duration::from_secs(60)).await;
        client.fetch_products(&ProductQuery::all()).await.unwrap();
        client.fetch_products(&ProductQuery::all()).await.unwrap();
        assert_eq!(fake.hits.load(Ordering::SeqCst), 1);

        client.invalidate(&ProductQuery::all()).await;
        client.fetch_products(&ProductQuery::all()).await.unwrap();
        assert_eq!(fake.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_decode_failure() {
        let (client, _) = serve(Duration::from_secs(60)).await;
        let err = client
            .fetch_products(&ProductQuery::tagged("broken"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }

    #[tokio::test]
    async fn test_status_failure_is_not_cached() {
        let (client, fake) = serve(Duration::from_secs(60)).await;
        let query = ProductQuery::tagged("down");
        let err = client.fetch_products(&query).await.unwrap_err();
        assert!(matches!(err, CatalogError::Status { status: 503, .. }));

        let _ = client.fetch_products(&query).await;
        assert_eq!(fake.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let (client, _) = serve(Duration::from_secs(60)).await;
        let err = client
            .fetch_products(&ProductQuery::tagged("busy"))
            .await
            .unwrap_err();
        assert!(matches!(err, CatalogError::RateLimited(7)));
    }

    #[tokio::test]
    async fn test_load_catalog_fails_soft() {
        let (client, _) = serve(Duration::from_secs(60)).await;
        assert!(client.load_catalog(&ProductQuery::tagged("down")).await.is_empty());
        assert!(client.load_catalog(&ProductQuery::tagged("broken")).await.is_empty());
    }

    #[tokio::test]
    async fn test_load_catalog_unreachable_host() {
        let config = CatalogApiConfig::with_base_url("http://127.0.0.1:9").unwrap();
        let client = CatalogClient::new(&config).unwrap();
        assert!(client.load_catalog(&ProductQuery::all()).await.is_empty());
    }

    #[test]
    fn test_products_url() {
        let config = CatalogApiConfig::with_base_url("https://api.example.com/v1").unwrap();
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(client.products_url().as_str(), "https://api.example.com/v1/products");
    }
}
