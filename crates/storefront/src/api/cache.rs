//! Cache key for product list responses.

/// Query-string scope for `GET /products`.
///
/// Doubles as the cache key: two equal queries share one cached response.
#[derive(Debug, Clone, Default, Hash, PartialEq, Eq)]
pub struct ProductQuery {
    /// `?tag=` filter (e.g., `new-arrival`)
    pub tag: Option<String>,
    /// `?category=` filter
    pub category: Option<String>,
}

impl ProductQuery {
    /// The whole catalog.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Products carrying `tag`.
    #[must_use]
    pub fn tagged(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into()),
            category: None,
        }
    }

    /// Products in `category`.
    #[must_use]
    pub fn in_category(category: impl Into<String>) -> Self {
        Self {
            tag: None,
            category: Some(category.into()),
        }
    }

    /// Query-string pairs, in a fixed order.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, &str)> {
        let mut params = Vec::new();
        if let Some(tag) = &self.tag {
            params.push(("tag", tag.as_str()));
        }
        if let Some(category) = &self.category {
            params.push(("category", category.as_str()));
        }
        params
    }
}
