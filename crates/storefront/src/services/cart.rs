//! Cart merge service.
//!
//! Wraps the pure merge functions from `shopfront_core::cart` with local
//! persistence. The in-memory cart returned by each call is the source of
//! truth for the session: storage failures are reported and swallowed, and a
//! rejected change returns the input cart untouched.

use shopfront_core::{Cart, Product, ProductId, Variant, add_to_cart, remove_line};
use tracing::{debug, instrument};

use super::notify::{LogNotifier, Notifier};
use crate::error::{AppError, add_breadcrumb};
use crate::storage::{KeyValueStore, keys};

/// Cart operations over a key-value store.
pub struct CartService<S, N = LogNotifier> {
    store: S,
    notifier: N,
    default_variant: Variant,
}

impl<S: KeyValueStore> CartService<S> {
    /// Create a service that logs notifications and uses the `"M"` placeholder
    /// variant.
    pub fn new(store: S) -> Self {
        Self::with_notifier(store, LogNotifier, Variant::default())
    }
}

impl<S: KeyValueStore, N: Notifier> CartService<S, N> {
    /// Create a service with an explicit notifier and default variant.
    pub const fn with_notifier(store: S, notifier: N, default_variant: Variant) -> Self {
        Self {
            store,
            notifier,
            default_variant,
        }
    }

    /// The underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Variant used when callers pass `None`.
    pub const fn default_variant(&self) -> &Variant {
        &self.default_variant
    }

    /// Read the persisted cart.
    ///
    /// An absent key, unreadable store or unparseable value all give an empty
    /// cart.
    #[must_use]
    pub fn load(&self) -> Cart {
        let raw = match self.store.get(keys::CART_PRODUCTS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Cart::new(),
            Err(e) => {
                AppError::from(e).report();
                return Cart::new();
            }
        };

        match serde_json::from_str::<Cart>(&raw) {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable stored cart");
                Cart::new()
            }
        }
    }

    /// Overwrite the persisted cart.
    ///
    /// Returns `false` if the write failed; the failure is already reported.
    pub fn persist(&self, cart: &Cart) -> bool {
        let result = serde_json::to_string(cart)
            .map_err(|e| AppError::Storage(e.into()))
            .and_then(|json| {
                self.store
                    .set(keys::CART_PRODUCTS, &json)
                    .map_err(AppError::from)
            });

        match result {
            Ok(()) => {
                debug!(lines = cart.len(), "Persisted cart");
                true
            }
            Err(e) => {
                e.report();
                false
            }
        }
    }

    /// Merge `quantity_delta` units of `product` into `cart` and persist.
    ///
    /// `variant` falls back to the default variant. A non-positive delta is
    /// rejected: the input cart is returned unchanged and nothing is written.
    #[instrument(skip(self, cart, product), fields(product_id = %product.id))]
    pub fn add_to_cart(
        &self,
        cart: &Cart,
        product: &Product,
        variant: Option<&str>,
        quantity_delta: i64,
    ) -> Cart {
        let variant = self.resolve_variant(variant);

        match add_to_cart(cart, product, &variant, quantity_delta) {
            Ok(next) => {
                self.persist(&next);
                add_breadcrumb(
                    "cart",
                    "Added to cart",
                    Some(&[
                        ("product_id", product.id.as_str()),
                        ("variant", variant.as_str()),
                    ]),
                );
                self.notifier
                    .success(&format!("{} added to cart!", product.title));
                next
            }
            Err(e) => {
                AppError::from(e).report();
                cart.clone()
            }
        }
    }

    /// Load the stored cart, merge `product` into it and persist.
    pub fn add_to_stored_cart(
        &self,
        product: &Product,
        variant: Option<&str>,
        quantity_delta: i64,
    ) -> Cart {
        let cart = self.load();
        self.add_to_cart(&cart, product, variant, quantity_delta)
    }

    /// Remove the line for `(product_id, variant)` and persist.
    ///
    /// A missing line is reported and the input cart returned unchanged.
    #[instrument(skip(self, cart))]
    pub fn remove_from_cart(
        &self,
        cart: &Cart,
        product_id: &ProductId,
        variant: Option<&str>,
    ) -> Cart {
        let variant = self.resolve_variant(variant);

        match remove_line(cart, product_id, &variant) {
            Ok(next) => {
                self.persist(&next);
                add_breadcrumb(
                    "cart",
                    "Removed from cart",
                    Some(&[
                        ("product_id", product_id.as_str()),
                        ("variant", variant.as_str()),
                    ]),
                );
                next
            }
            Err(e) => {
                AppError::from(e).report();
                cart.clone()
            }
        }
    }

    /// Empty the cart and persist.
    pub fn clear(&self) -> Cart {
        let cart = Cart::new();
        self.persist(&cart);
        add_breadcrumb("cart", "Cleared cart", None);
        cart
    }

    fn resolve_variant(&self, variant: Option<&str>) -> Variant {
        variant
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map_or_else(|| self.default_variant.clone(), Variant::from)
    }
}
