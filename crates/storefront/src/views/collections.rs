//! Product carousels backed by configured collections.

use std::collections::BTreeSet;

use shopfront_core::Product;
use shopfront_core::catalog::apply_filter;
use tracing::instrument;

use crate::api::{CatalogClient, ProductQuery};
use crate::config::CollectionsConfig;
use crate::error::AppError;

/// Loads named collections (e.g., "mobiles") for carousel display.
///
/// Which category backs a collection comes from [`CollectionsConfig`].
#[derive(Clone)]
pub struct CollectionCarousel {
    client: CatalogClient,
    collections: CollectionsConfig,
}

impl CollectionCarousel {
    #[must_use]
    pub const fn new(client: CatalogClient, collections: CollectionsConfig) -> Self {
        Self {
            client,
            collections,
        }
    }

    /// Configured collection names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.names()
    }

    /// Products in collection `name`, in API order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::UnknownCollection` if `name` is not configured. A
    /// failed fetch is not an error; it yields an empty carousel.
    #[instrument(skip(self))]
    pub async fn load(&self, name: &str) -> Result<Vec<Product>, AppError> {
        let category = self
            .collections
            .category(name)
            .ok_or_else(|| AppError::UnknownCollection(name.to_string()))?;

        let products = self.client.load_catalog(&ProductQuery::all()).await;
        let selected = BTreeSet::from([category.to_string()]);
        Ok(apply_filter(&products, &selected))
    }
}
