//! Test helpers: a fake product API served on an ephemeral port.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::CatalogClient;
use crate::config::CatalogApiConfig;

#[derive(Clone)]
struct Fake {
    body: Arc<serde_json::Value>,
    hits: Arc<AtomicUsize>,
}

async fn products(State(fake): State<Fake>) -> Json<serde_json::Value> {
    fake.hits.fetch_add(1, Ordering::SeqCst);
    Json((*fake.body).clone())
}

/// Serve `body` from `GET /products` and return a client pointed at it plus a
/// hit counter.
pub async fn spawn_catalog(body: serde_json::Value) -> (CatalogClient, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let fake = Fake {
        body: Arc::new(body),
        hits: Arc::clone(&hits),
    };
    let app = Router::new()
        .route("/products", get(products))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = CatalogApiConfig::with_base_url(&format!("http://{addr}")).unwrap();
    (CatalogClient::new(&config).unwrap(), hits)
}

/// A client whose every request fails to connect.
pub fn unreachable_client() -> CatalogClient {
    let config = CatalogApiConfig::with_base_url("http://127.0.0.1:9").unwrap();
    CatalogClient::new(&config).unwrap()
}
