//! Catalog product as returned by the remote product API.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A purchasable product.
///
/// Owned by the remote catalog; the client only ever holds a read-only copy
/// for the lifetime of one view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product ID. Some API deployments send it as `_id`.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Category name used by the filter sidebar and collections.
    pub category: String,
    /// Primary image URL.
    #[serde(default)]
    pub main_image: String,
}
