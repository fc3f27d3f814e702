//! Local cart commands.

use shopfront_core::ProductId;
use shopfront_storefront::api::ProductQuery;
use shopfront_storefront::{AppError, AppState};
use tracing::info;

use crate::render;

/// Render the stored cart.
pub fn show(state: &AppState) -> String {
    render::cart(&state.cart().load())
}

/// Look `product_id` up in the catalog and merge it into the stored cart.
///
/// # Errors
///
/// Returns `AppError::ProductNotFound` if the catalog has no such product
/// (including when the catalog could not be fetched).
pub async fn add(
    state: &AppState,
    product_id: &str,
    variant: Option<&str>,
    quantity: i64,
) -> Result<String, AppError> {
    let id = ProductId::new(product_id);
    let products = state.catalog().load_catalog(&ProductQuery::all()).await;
    let product = products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| AppError::ProductNotFound(product_id.to_string()))?;

    let cart = state
        .cart()
        .add_to_stored_cart(product, variant, quantity);
    info!(lines = cart.len(), "Cart updated");
    Ok(render::cart(&cart))
}

/// Remove a line from the stored cart.
pub fn remove(state: &AppState, product_id: &str, variant: Option<&str>) -> String {
    let cart = state.cart().load();
    let cart = state
        .cart()
        .remove_from_cart(&cart, &ProductId::new(product_id), variant);
    render::cart(&cart)
}

/// Empty the stored cart.
pub fn clear(state: &AppState) -> String {
    render::cart(&state.cart().clear())
}
