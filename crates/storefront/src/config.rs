//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPFRONT_API_BASE_URL` - Base URL of the product API (e.g., `https://api.example.com/v1/`)
//!
//! ## Optional
//! - `SHOPFRONT_API_TIMEOUT_SECS` - Request timeout (default: 10)
//! - `SHOPFRONT_CACHE_TTL_SECS` - Product list cache TTL (default: 300)
//! - `SHOPFRONT_CACHE_CAPACITY` - Maximum cached product lists (default: 100)
//! - `SHOPFRONT_PAGE_SIZE` - Products per listing page (default: 6)
//! - `SHOPFRONT_NEW_ARRIVALS_TAG` - Tag scoping the new arrivals grid (default: new-arrival)
//! - `SHOPFRONT_CATEGORIES` - Comma-separated sidebar categories
//! - `SHOPFRONT_COLLECTIONS` - Comma-separated `name=Category` carousel mapping
//! - `SHOPFRONT_DEFAULT_VARIANT` - Variant used when none is chosen (default: M)
//! - `SHOPFRONT_DATA_DIR` - Directory for the local cart store (default: .shopfront)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use shopfront_core::Variant;
use thiserror::Error;
use url::Url;

const DEFAULT_CATEGORIES: &str = "Dresses,Bags,Shoes,Jewelry & Accessories";
const DEFAULT_COLLECTIONS: &str = "mobiles=Mobiles,laptops=Laptops";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Remote product API settings
    pub api: CatalogApiConfig,
    /// Listing page settings
    pub catalog: CatalogConfig,
    /// Carousel name to category mapping
    pub collections: CollectionsConfig,
    /// Local cart settings
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Remote product API configuration.
#[derive(Debug, Clone)]
pub struct CatalogApiConfig {
    /// API root; always ends with `/` so relative joins keep the path
    pub base_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
    /// How long a fetched product list is reused
    pub cache_ttl: Duration,
    /// Maximum number of cached product lists
    pub cache_capacity: u64,
}

/// Listing page configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Products per page (never zero)
    pub page_size: usize,
    /// Tag sent as `?tag=` for the new arrivals grid
    pub new_arrivals_tag: String,
    /// Category checkboxes offered in the filter sidebar
    pub categories: Vec<String>,
}

/// Named product collections shown as carousels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionsConfig {
    entries: BTreeMap<String, String>,
}

/// Local cart configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Directory holding the file-backed key-value store
    pub data_dir: PathBuf,
    /// Variant used when the caller does not pick one
    pub default_variant: Variant,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let api = CatalogApiConfig {
            base_url: parse_base_url(
                "SHOPFRONT_API_BASE_URL",
                &env.required("SHOPFRONT_API_BASE_URL")?,
            )?,
            timeout: Duration::from_secs(env.parse_or("SHOPFRONT_API_TIMEOUT_SECS", 10)?),
            cache_ttl: Duration::from_secs(env.parse_or("SHOPFRONT_CACHE_TTL_SECS", 300)?),
            cache_capacity: env.parse_or("SHOPFRONT_CACHE_CAPACITY", 100)?,
        };

        let page_size: usize = env.parse_or("SHOPFRONT_PAGE_SIZE", 6)?;
        if page_size == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_PAGE_SIZE".to_string(),
                "must be greater than zero".to_string(),
            ));
        }
        let catalog = CatalogConfig {
            page_size,
            new_arrivals_tag: env.or_default("SHOPFRONT_NEW_ARRIVALS_TAG", "new-arrival"),
            categories: parse_list(&env.or_default("SHOPFRONT_CATEGORIES", DEFAULT_CATEGORIES)),
        };

        let collections = CollectionsConfig::parse(
            "SHOPFRONT_COLLECTIONS",
            &env.or_default("SHOPFRONT_COLLECTIONS", DEFAULT_COLLECTIONS),
        )?;

        let default_variant = env.or_default("SHOPFRONT_DEFAULT_VARIANT", Variant::DEFAULT);
        if default_variant.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "SHOPFRONT_DEFAULT_VARIANT".to_string(),
                "must not be empty".to_string(),
            ));
        }
        let cart = CartConfig {
            data_dir: PathBuf::from(env.or_default("SHOPFRONT_DATA_DIR", ".shopfront")),
            default_variant: Variant::new(default_variant.trim()),
        };

        Ok(Self {
            api,
            catalog,
            collections,
            cart,
            sentry_dsn: env.optional("SENTRY_DSN"),
            sentry_environment: env.optional("SENTRY_ENVIRONMENT"),
        })
    }
}

impl CatalogApiConfig {
    /// Config pointing at `base_url` with default timeout and cache settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `base_url` is not an absolute HTTP(S) URL.
    pub fn with_base_url(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout: Duration::from_secs(10),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 100,
        })
    }
}

impl CollectionsConfig {
    /// Parse a `name=Category,name=Category` list.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for entries without `=` or with an
    /// empty side.
    pub fn parse(var_name: &str, raw: &str) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (name, category) = entry
                .split_once('=')
                .map(|(n, c)| (n.trim(), c.trim()))
                .filter(|(n, c)| !n.is_empty() && !c.is_empty())
                .ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        var_name.to_string(),
                        format!("expected name=Category, got '{entry}'"),
                    )
                })?;
            entries.insert(name.to_lowercase(), category.to_string());
        }
        Ok(Self { entries })
    }

    /// Category backing the collection `name` (case-insensitive).
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&str> {
        self.entries.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Configured collection names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F: Fn(&str) -> Option<String>> Env<F> {
    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.optional(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Get an optional variable; blank values count as unset.
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a variable with a default value.
    fn or_default(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_string())
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Parse and normalize the API base URL.
fn parse_base_url(var_name: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Split a comma-separated list, dropping blanks.
fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("SHOPFRONT_API_BASE_URL", "http://localhost:8080/api")]).unwrap();

        assert_eq!(config.api.base_url.as_str(), "http://localhost:8080/api/");
        assert_eq!(config.api.timeout, Duration::from_secs(10));
        assert_eq!(config.api.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.catalog.page_size, 6);
        assert_eq!(config.catalog.new_arrivals_tag, "new-arrival");
        assert_eq!(
            config.catalog.categories,
            ["Dresses", "Bags", "Shoes", "Jewelry & Accessories"]
        );
        assert_eq!(config.collections.category("mobiles"), Some("Mobiles"));
        assert_eq!(config.collections.category("Laptops"), Some("Laptops"));
        assert_eq!(config.cart.default_variant.as_str(), "M");
        assert_eq!(config.cart.data_dir, PathBuf::from(".shopfront"));
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_missing_base_url() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(ref key) if key == "SHOPFRONT_API_BASE_URL"));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let err = load(&[("SHOPFRONT_API_BASE_URL", "ftp://example.com")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_rejects_zero_page_size() {
        let err = load(&[
            ("SHOPFRONT_API_BASE_URL", "http://localhost"),
            ("SHOPFRONT_PAGE_SIZE", "0"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "SHOPFRONT_PAGE_SIZE"));
    }

    #[test]
    fn test_rejects_unparseable_number() {
        let err = load(&[
            ("SHOPFRONT_API_BASE_URL", "http://localhost"),
            ("SHOPFRONT_CACHE_TTL_SECS", "soon"),
        ])
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOPFRONT_API_BASE_URL", "https://shop.example.com/"),
            ("SHOPFRONT_PAGE_SIZE", "12"),
            ("SHOPFRONT_CATEGORIES", "Bags, Shoes,,"),
            ("SHOPFRONT_COLLECTIONS", "phones=Mobiles"),
            ("SHOPFRONT_DEFAULT_VARIANT", " 8 "),
            ("SENTRY_DSN", "https://key@sentry.example.com/1"),
        ])
        .unwrap();

        assert_eq!(config.api.base_url.as_str(), "https://shop.example.com/");
        assert_eq!(config.catalog.page_size, 12);
        assert_eq!(config.catalog.categories, ["Bags", "Shoes"]);
        assert_eq!(config.collections.category("phones"), Some("Mobiles"));
        assert_eq!(config.collections.category("mobiles"), None);
        assert_eq!(config.cart.default_variant.as_str(), "8");
        assert!(config.sentry_dsn.is_some());
    }

    #[test]
    fn test_collections_parse_errors() {
        assert!(CollectionsConfig::parse("X", "mobiles").is_err());
        assert!(CollectionsConfig::parse("X", "=Mobiles").is_err());
        assert!(CollectionsConfig::parse("X", "mobiles=").is_err());
        assert!(CollectionsConfig::parse("X", "").unwrap().names().next().is_none());
    }

    #[test]
    fn test_with_base_url() {
        let api = CatalogApiConfig::with_base_url("http://127.0.0.1:9000").unwrap();
        assert_eq!(api.base_url.join("products").unwrap().as_str(), "http://127.0.0.1:9000/products");
    }
}
