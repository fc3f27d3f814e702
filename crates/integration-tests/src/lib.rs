//! Integration tests for Shopfront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopfront-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_pipeline` - Filter, sort and paginate laws over generated catalogs
//! - `cart_persistence` - Cart service against the file-backed store
//! - `storefront_flow` - Listing to cart, end to end against a fake product API
//!
//! This crate provides the shared fixtures: a fake product API served by
//! `axum` on an ephemeral port, and a storefront configuration pointing at it.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use shopfront_storefront::config::StorefrontConfig;

/// A running fake product API.
pub struct FakeApi {
    pub addr: SocketAddr,
    hits: Arc<AtomicUsize>,
}

impl FakeApi {
    /// Requests served so far.
    #[must_use]
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Base URL to configure clients with.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.addr)
    }
}

#[derive(Clone)]
struct FakeState {
    products: Arc<Vec<Value>>,
    hits: Arc<AtomicUsize>,
}

async fn products(
    State(state): State<FakeState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    state.hits.fetch_add(1, Ordering::SeqCst);
    let tag = params.get("tag");
    let matching: Vec<Value> = state
        .products
        .iter()
        .filter(|p| {
            tag.is_none_or(|t| {
                p["tags"]
                    .as_array()
                    .is_some_and(|tags| tags.iter().any(|x| x == t.as_str()))
            })
        })
        .cloned()
        .collect();
    Json(Value::Array(matching))
}

/// Serve `products` (JSON objects, optionally carrying a `tags` array) from
/// `GET /api/products`, honouring `?tag=`.
pub async fn spawn_api(products: Vec<Value>) -> FakeApi {
    let hits = Arc::new(AtomicUsize::new(0));
    let state = FakeState {
        products: Arc::new(products),
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/api/products", get(self::products))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeApi { addr, hits }
}

/// Storefront configuration for `api` with the cart stored under `data_dir`.
#[must_use]
pub fn config_for(api: &FakeApi, data_dir: &Path, page_size: usize) -> StorefrontConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("SHOPFRONT_API_BASE_URL", api.base_url()),
        ("SHOPFRONT_PAGE_SIZE", page_size.to_string()),
        ("SHOPFRONT_DATA_DIR", data_dir.display().to_string()),
    ]);
    StorefrontConfig::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

/// The storefront sample catalog.
#[must_use]
pub fn sample_catalog() -> Vec<Value> {
    vec![
        json!({"_id": "d1", "title": "Linen Dress", "price": 49.5, "category": "Dresses", "mainImage": "d1.jpg", "tags": ["new-arrival"]}),
        json!({"_id": "b1", "title": "Canvas Tote", "price": 20, "category": "Bags", "mainImage": "b1.jpg", "tags": ["new-arrival"]}),
        json!({"_id": "s1", "title": "Court Heel", "price": 20, "category": "Shoes", "mainImage": "s1.jpg", "tags": ["new-arrival"]}),
        json!({"_id": "m1", "title": "Phone One", "price": 300, "category": "Mobiles", "mainImage": "m1.jpg", "tags": []}),
        json!({"_id": "b2", "title": "Mini Clutch", "price": 15, "category": "Bags", "mainImage": "b2.jpg", "tags": ["new-arrival"]}),
        json!({"_id": "j1", "title": "Gold Hoops", "price": 35, "category": "Jewelry & Accessories", "mainImage": "j1.jpg", "tags": ["new-arrival"]}),
        json!({"_id": "l1", "title": "Laptop Pro", "price": 1200, "category": "Laptops", "mainImage": "l1.jpg"}),
        json!({"_id": "m2", "title": "Phone Two", "price": 450, "category": "Mobiles", "mainImage": "m2.jpg", "tags": []}),
    ]
}
