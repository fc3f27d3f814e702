//! Application state shared across commands.

use std::sync::Arc;

use crate::api::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::AppError;
use crate::services::{CartService, LogNotifier, Notifier};
use crate::storage::{FileStore, KeyValueStore};
use crate::views::{CatalogController, CollectionCarousel};

/// Cart service with runtime-chosen store and notifier.
pub type SharedCartService = CartService<Arc<dyn KeyValueStore>, Arc<dyn Notifier>>;

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, cart service and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    cart: SharedCartService,
    collections: CollectionCarousel,
}

impl AppState {
    /// Create state with a [`FileStore`] in the configured data directory and
    /// a logging notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, AppError> {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(config.cart.data_dir.clone()));
        Self::with_parts(config, store, Arc::new(LogNotifier))
    }

    /// Create state with an explicit store and notifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog client cannot be built.
    pub fn with_parts(
        config: StorefrontConfig,
        store: Arc<dyn KeyValueStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, AppError> {
        let catalog = CatalogClient::new(&config.api)?;
        let cart = CartService::with_notifier(store, notifier, config.cart.default_variant.clone());
        let collections = CollectionCarousel::new(catalog.clone(), config.collections.clone());

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                cart,
                collections,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the cart service.
    #[must_use]
    pub fn cart(&self) -> &SharedCartService {
        &self.inner.cart
    }

    /// Get a reference to the collection carousels.
    #[must_use]
    pub fn collections(&self) -> &CollectionCarousel {
        &self.inner.collections
    }

    /// A fresh controller for the new arrivals grid.
    #[must_use]
    pub fn new_arrivals(&self) -> CatalogController {
        CatalogController::new_arrivals(self.inner.catalog.clone(), &self.inner.config.catalog)
    }
}
