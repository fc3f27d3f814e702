//! Listing to cart, end to end against a fake product API.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use shopfront_core::{Price, ProductId, SortOption};
use shopfront_integration_tests::{config_for, sample_catalog, spawn_api};
use shopfront_storefront::config::CatalogApiConfig;
use shopfront_storefront::{AppError, AppState};

fn ids(products: &[shopfront_core::Product]) -> Vec<&str> {
    products.iter().map(|p| p.id.as_str()).collect()
}

#[tokio::test]
async fn test_new_arrivals_filter_sort_paginate() {
    let api = spawn_api(sample_catalog()).await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config_for(&api, dir.path(), 2)).unwrap();

    let mut view = state.new_arrivals();
    view.load().await;
    assert_eq!(ids(view.products()), ["d1", "b1", "s1", "b2", "j1"]);
    assert_eq!(view.summary(), "5 new items");

    view.toggle_category("Bags");
    view.toggle_category("Shoes");
    view.set_sort(SortOption::PriceAscending);

    let first = view.page();
    assert_eq!(first.total_items, 3);
    assert_eq!(first.total_pages, 2);
    assert_eq!(ids(&first.items), ["b2", "b1"]);

    view.set_page(2);
    assert_eq!(ids(&view.page().items), ["s1"]);

    // Changing the filter goes back to the first page.
    view.toggle_category("Shoes");
    assert_eq!(view.state().current_page(), 1);
    assert_eq!(ids(&view.page().items), ["b2", "b1"]);
    assert_eq!(api.hits(), 1);
}

#[tokio::test]
async fn test_loads_are_cached_until_reload() {
    let api = spawn_api(sample_catalog()).await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config_for(&api, dir.path(), 6)).unwrap();

    let mut view = state.new_arrivals();
    view.load().await;
    state.new_arrivals().load().await;
    assert_eq!(api.hits(), 1);

    view.reload().await;
    assert_eq!(api.hits(), 2);
    assert_eq!(view.products().len(), 5);
}

#[tokio::test]
async fn test_collections_use_configured_categories() {
    let api = spawn_api(sample_catalog()).await;
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(config_for(&api, dir.path(), 6)).unwrap();

    let phones = state.collections().load("mobiles").await.unwrap();
    assert_eq!(ids(&phones), ["m1", "m2"]);

    let laptops = state.collections().load("laptops").await.unwrap();
    assert_eq!(ids(&laptops), ["l1"]);
    assert_eq!(api.hits(), 1);

    let err = state.collections().load("watches").await.unwrap_err();
    assert!(matches!(err, AppError::UnknownCollection(name) if name == "watches"));
}

#[tokio::test]
async fn test_add_from_listing_persists_across_sessions() {
    let api = spawn_api(sample_catalog()).await;
    let dir = tempfile::tempdir().unwrap();

    {
        let state = AppState::new(config_for(&api, dir.path(), 6)).unwrap();
        let mut view = state.new_arrivals();
        view.load().await;

        let dress = view.find_product(&ProductId::new("d1")).unwrap().clone();
        let tote = view.find_product(&ProductId::new("b1")).unwrap().clone();

        let cart = state.cart().add_to_cart(&state.cart().load(), &dress, None, 1);
        let cart = state.cart().add_to_cart(&cart, &tote, Some("L"), 2);
        let cart = state.cart().add_to_cart(&cart, &dress, None, 1);
        assert_eq!(cart.len(), 2);
    }

    let state = AppState::new(config_for(&api, dir.path(), 6)).unwrap();
    let cart = state.cart().load();
    let lines = cart.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product_id.as_str(), "d1");
    assert_eq!(lines[0].variant.as_str(), "M");
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].variant.as_str(), "L");
    assert_eq!(cart.subtotal(), Price::from_cents(13900).unwrap());
}

#[tokio::test]
async fn test_unreachable_api_gives_empty_grid() {
    let dir = tempfile::tempdir().unwrap();
    let api = spawn_api(sample_catalog()).await;
    let mut config = config_for(&api, dir.path(), 6);
    config.api = CatalogApiConfig::with_base_url("http://127.0.0.1:9/api/").unwrap();
    let state = AppState::new(config).unwrap();

    let mut view = state.new_arrivals();
    view.load().await;
    assert!(view.products().is_empty());
    assert!(!view.is_loading());
    assert_eq!(view.empty_message(), Some("No products found."));
}
