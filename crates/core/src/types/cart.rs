//! Cart and cart line item types.
//!
//! The JSON shape is the one stored under the `cartProducts` key. Lines written
//! by the older browser client (`id`, `selectedSize`, `price`, `name`) are still
//! accepted when reading.

use serde::{Deserialize, Serialize};

use super::{Price, Product, ProductId, Variant};

/// One `(product, variant)` pair with a quantity.
///
/// Title, price and image are snapshots taken when the line was first added;
/// later catalog price changes never alter an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(alias = "id")]
    pub product_id: ProductId,
    #[serde(alias = "selectedSize")]
    pub variant: Variant,
    /// Always at least 1.
    pub quantity: u32,
    #[serde(alias = "price")]
    pub unit_price: Price,
    #[serde(alias = "name")]
    pub display_name: String,
    #[serde(default)]
    pub image_ref: String,
}

impl CartLineItem {
    /// Snapshot a product into a new line.
    #[must_use]
    pub fn snapshot(product: &Product, variant: Variant, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            variant,
            quantity,
            unit_price: product.price,
            display_name: product.title.clone(),
            image_ref: product.main_image.clone(),
        }
    }

    /// Whether this line has the given identity key.
    #[must_use]
    pub fn matches(&self, product_id: &ProductId, variant: &Variant) -> bool {
        self.product_id == *product_id && self.variant == *variant
    }

    /// `unit_price * quantity`.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Ordered list of line items, in first-add order.
///
/// At most one line exists per `(product_id, variant)`. Deserialization
/// restores that invariant for hand-edited or corrupt data: duplicate keys are
/// folded into the first occurrence and zero-quantity lines are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<CartLineItem>", into = "Vec<CartLineItem>")]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    /// Find the line for an identity key.
    #[must_use]
    pub fn line(&self, product_id: &ProductId, variant: &Variant) -> Option<&CartLineItem> {
        self.lines.iter().find(|l| l.matches(product_id, variant))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all line quantities (the cart badge count).
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Sum of all line prices.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(CartLineItem::line_price).sum()
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<CartLineItem> {
        &mut self.lines
    }
}

impl From<Vec<CartLineItem>> for Cart {
    fn from(raw: Vec<CartLineItem>) -> Self {
        let mut lines: Vec<CartLineItem> = Vec::with_capacity(raw.len());
        for item in raw.into_iter().filter(|l| l.quantity > 0) {
            match lines
                .iter_mut()
                .find(|l| l.matches(&item.product_id, &item.variant))
            {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(item.quantity);
                }
                None => lines.push(item),
            }
        }
        Self { lines }
    }
}

impl From<Cart> for Vec<CartLineItem> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
