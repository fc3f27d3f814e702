//! Unified error handling with Sentry integration.
//!
//! Every subsystem has its own error enum; [`AppError`] unifies them. None of
//! these errors is allowed to crash a view: callers degrade to an empty or
//! previous state and call [`AppError::report`], which logs the failure and
//! captures the ones worth alerting on to Sentry.

use thiserror::Error;

use shopfront_core::CartError;

use crate::api::CatalogError;
use crate::config::ConfigError;
use crate::storage::StorageError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog fetch or decode failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Local key-value store read or write failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart change was rejected.
    #[error("Invalid cart change: {0}")]
    InvalidMutation(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// No collection is configured under this name.
    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    /// Product is not in the fetched catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),
}

impl AppError {
    /// Whether this failure comes from an external collaborator rather than
    /// from the caller's input.
    #[must_use]
    pub const fn is_external(&self) -> bool {
        matches!(self, Self::Catalog(_) | Self::Storage(_) | Self::Config(_))
    }

    /// Log the error, capturing external failures to Sentry.
    pub fn report(&self) {
        if self.is_external() {
            let event_id = sentry::capture_error(self);
            tracing::warn!(
                error = %self,
                sentry_event_id = %event_id,
                "Recovered from external failure"
            );
        } else {
            tracing::warn!(error = %self, "Rejected request");
        }
    }

    /// Message safe to show a shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Catalog(_) => "No products found.".to_string(),
            Self::Storage(_) => "Your cart could not be saved on this device.".to_string(),
            Self::InvalidMutation(CartError::InvalidQuantity(_)) => {
                "Quantity must be at least 1.".to_string()
            }
            Self::InvalidMutation(CartError::LineNotFound { .. }) => {
                "That item is not in your cart.".to_string()
            }
            Self::InvalidMutation(CartError::QuantityOverflow { .. }) => {
                "That quantity is too large.".to_string()
            }
            Self::Config(_) => "The store is not configured.".to_string(),
            Self::UnknownCollection(name) => format!("No collection named '{name}'."),
            Self::ProductNotFound(id) => format!("No product with id '{id}'."),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "123")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use shopfront_core::{ProductId, Variant};

    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::UnknownCollection("hats".to_string());
        assert_eq!(err.to_string(), "Unknown collection: hats");

        let err = AppError::from(CartError::InvalidQuantity(0));
        assert_eq!(
            err.to_string(),
            "Invalid cart change: quantity must be a positive integer (got 0)"
        );
    }

    #[test]
    fn test_external_classification() {
        assert!(AppError::from(CatalogError::RateLimited(1)).is_external());
        assert!(AppError::from(StorageError::Unavailable("poisoned".to_string())).is_external());
        assert!(!AppError::from(CartError::InvalidQuantity(-1)).is_external());
        assert!(!AppError::ProductNotFound("x".to_string()).is_external());
    }

    #[test]
    fn test_user_messages_hide_details() {
        let err = AppError::from(CatalogError::Status {
            status: 500,
            body: "stack trace".to_string(),
        });
        assert_eq!(err.user_message(), "No products found.");

        let err = AppError::from(CartError::LineNotFound {
            product_id: ProductId::new("p1"),
            variant: Variant::default(),
        });
        assert_eq!(err.user_message(), "That item is not in your cart.");
    }

    #[test]
    fn test_report_without_sentry_client() {
        // No Sentry client is bound in tests; reporting must still be safe.
        AppError::from(CatalogError::RateLimited(3)).report();
        AppError::from(CartError::InvalidQuantity(0)).report();
    }
}
