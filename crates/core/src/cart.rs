//! Merge-by-identity cart mutations.
//!
//! All functions are pure: they take a cart by reference and return a new one,
//! leaving the input untouched. A line's identity is `(product_id, variant)`.

use thiserror::Error;

use crate::types::{Cart, CartLineItem, Product, ProductId, Variant};

/// Rejected cart mutations. The input cart is never changed when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Quantity delta was zero or negative.
    #[error("quantity must be a positive integer (got {0})")]
    InvalidQuantity(i64),

    /// The resulting quantity does not fit in a line item.
    #[error("quantity overflow for {product_id} ({variant})")]
    QuantityOverflow {
        product_id: ProductId,
        variant: Variant,
    },

    /// No line with the given identity.
    #[error("no cart line for {product_id} ({variant})")]
    LineNotFound {
        product_id: ProductId,
        variant: Variant,
    },
}

/// Add `quantity_delta` units of `product` in `variant` to `cart`.
///
/// An existing line for the same identity has its quantity incremented and
/// keeps its original title, price and image. Otherwise a new line is appended
/// with a snapshot of the product.
///
/// # Errors
///
/// - `CartError::InvalidQuantity` if `quantity_delta` is not positive
/// - `CartError::QuantityOverflow` if the new quantity exceeds `u32::MAX`
pub fn add_to_cart(
    cart: &Cart,
    product: &Product,
    variant: &Variant,
    quantity_delta: i64,
) -> Result<Cart, CartError> {
    if quantity_delta <= 0 {
        return Err(CartError::InvalidQuantity(quantity_delta));
    }
    let overflow = || CartError::QuantityOverflow {
        product_id: product.id.clone(),
        variant: variant.clone(),
    };
    let delta = u32::try_from(quantity_delta).map_err(|_| overflow())?;

    let mut next = cart.clone();
    let lines = next.lines_mut();

    match lines.iter_mut().find(|l| l.matches(&product.id, variant)) {
        Some(line) => {
            line.quantity = line.quantity.checked_add(delta).ok_or_else(overflow)?;
        }
        None => lines.push(CartLineItem::snapshot(product, variant.clone(), delta)),
    }

    Ok(next)
}

/// Remove the line for `(product_id, variant)`.
///
/// # Errors
///
/// Returns `CartError::LineNotFound` if the cart has no such line.
pub fn remove_line(
    cart: &Cart,
    product_id: &ProductId,
    variant: &Variant,
) -> Result<Cart, CartError> {
    let mut next = cart.clone();
    let lines = next.lines_mut();
    let before = lines.len();
    lines.retain(|l| !l.matches(product_id, variant));

    if lines.len() == before {
        return Err(CartError::LineNotFound {
            product_id: product_id.clone(),
            variant: variant.clone(),
        });
    }
    Ok(next)
}
