//! Filter, sort and paginate pipeline for product listings.
//!
//! Every listing view runs the same three steps over the list it fetched:
//!
//! 1. [`apply_filter`] - keep products in any selected category
//! 2. [`apply_sort`] - reorder by price, or keep API order
//! 3. [`paginate`] - cut one fixed-size page
//!
//! [`CatalogPage::build`] runs all three against a [`CatalogFilterState`].

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Product;

// =============================================================================
// Sort Option
// =============================================================================

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Whatever order the API returned.
    #[default]
    Relevance,
    /// Cheapest first.
    #[serde(alias = "low")]
    PriceAscending,
    /// Most expensive first.
    #[serde(alias = "high")]
    PriceDescending,
}

impl SortOption {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceAscending => "price-ascending",
            Self::PriceDescending => "price-descending",
        }
    }

    /// Label shown in the sort dropdown.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Relevance => "Sort by Relevance",
            Self::PriceAscending => "Price: Low to High",
            Self::PriceDescending => "Price: High to Low",
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized sort option string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort option: {0}")]
pub struct ParseSortOptionError(pub String);

impl FromStr for SortOption {
    type Err = ParseSortOptionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "price-ascending" | "price-asc" | "low" => Ok(Self::PriceAscending),
            "price-descending" | "price-desc" | "high" => Ok(Self::PriceDescending),
            other => Err(ParseSortOptionError(other.to_string())),
        }
    }
}

// =============================================================================
// Pipeline Steps
// =============================================================================

/// Keep products whose category is in `selected`.
///
/// An empty selection means "no filter" and returns every product.
#[must_use]
pub fn apply_filter(products: &[Product], selected: &BTreeSet<String>) -> Vec<Product> {
    if selected.is_empty() {
        return products.to_vec();
    }
    products
        .iter()
        .filter(|p| selected.contains(&p.category))
        .cloned()
        .collect()
}

/// Order products by `sort`.
///
/// Price orders use a stable sort so equal prices keep their relative order.
#[must_use]
pub fn apply_sort(mut products: Vec<Product>, sort: SortOption) -> Vec<Product> {
    match sort {
        SortOption::Relevance => {}
        SortOption::PriceAscending => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortOption::PriceDescending => products.sort_by(|a, b| b.price.cmp(&a.price)),
    }
    products
}

/// The 1-indexed page `page` of size `page_size`.
///
/// Page 0, pages past the end and a zero page size all give an empty slice.
#[must_use]
pub fn paginate<T>(items: &[T], page_size: usize, page: usize) -> &[T] {
    if page_size == 0 || page == 0 {
        return &[];
    }
    let Some(start) = (page - 1).checked_mul(page_size) else {
        return &[];
    };
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    items.get(start..end).unwrap_or(&[])
}

/// Number of pages needed for `len` items.
#[must_use]
pub const fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

// =============================================================================
// Filter State
// =============================================================================

/// View-local listing state. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogFilterState {
    selected_categories: BTreeSet<String>,
    sort: SortOption,
    current_page: usize,
}

impl Default for CatalogFilterState {
    fn default() -> Self {
        Self {
            selected_categories: BTreeSet::new(),
            sort: SortOption::Relevance,
            current_page: 1,
        }
    }
}

impl CatalogFilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn selected_categories(&self) -> &BTreeSet<String> {
        &self.selected_categories
    }

    #[must_use]
    pub const fn sort(&self) -> SortOption {
        self.sort
    }

    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    #[must_use]
    pub fn is_selected(&self, category: &str) -> bool {
        self.selected_categories.contains(category)
    }

    /// Select `category` if unselected, otherwise unselect it.
    ///
    /// Resets to page 1 so a narrower result never lands on an empty page.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.selected_categories.remove(category) {
            self.selected_categories.insert(category.to_string());
        }
        self.current_page = 1;
    }

    /// Replace the whole selection. Resets to page 1.
    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = categories.into_iter().map(Into::into).collect();
        self.current_page = 1;
    }

    /// Change the sort order. The current page is kept.
    pub const fn set_sort(&mut self, sort: SortOption) {
        self.sort = sort;
    }

    /// Jump to `page`; values below 1 become 1.
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }
}

// =============================================================================
// Catalog Page
// =============================================================================

/// One rendered page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage {
    /// Products on this page.
    pub items: Vec<Product>,
    /// Matching products across all pages.
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

impl CatalogPage {
    /// Run filter, sort and paginate over `products`.
    #[must_use]
    pub fn build(products: &[Product], state: &CatalogFilterState, page_size: usize) -> Self {
        let filtered = apply_filter(products, &state.selected_categories);
        let sorted = apply_sort(filtered, state.sort);
        let items = paginate(&sorted, page_size, state.current_page).to_vec();

        Self {
            items,
            total_items: sorted.len(),
            total_pages: total_pages(sorted.len(), page_size),
            current_page: state.current_page,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page numbers for the pagination bar.
    pub fn page_numbers(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }

    #[must_use]
    pub const fn has_more_pages(&self) -> bool {
        self.current_page < self.total_pages
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Price, ProductId};

    fn product(id: &str, cents: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::from_cents(cents).unwrap(),
            category: category.to_string(),
            main_image: String::new(),
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    fn sample() -> Vec<Product> {
        vec![
            product("d1", 5000, "Dresses"),
            product("b1", 2000, "Bags"),
            product("s1", 2000, "Shoes"),
            product("b2", 1000, "Bags"),
            product("d2", 2000, "Dresses"),
            product("j1", 9900, "Jewelry & Accessories"),
            product("s2", 3000, "Shoes"),
        ]
    }

    #[test]
    fn test_empty_filter_is_identity() {
        let products = sample();
        assert_eq!(apply_filter(&products, &BTreeSet::new()), products);
    }

    #[test]
    fn test_filter_is_or_combined() {
        let selected: BTreeSet<String> = ["Bags", "Shoes"].into_iter().map(String::from).collect();
        let filtered = apply_filter(&sample(), &selected);
        assert_eq!(ids(&filtered), ["b1", "s1", "b2", "s2"]);
        assert!(filtered.iter().all(|p| selected.contains(&p.category)));
    }

    #[test]
    fn test_filter_unknown_category_matches_nothing() {
        let selected: BTreeSet<String> = std::iter::once("Hats".to_string()).collect();
        assert!(apply_filter(&sample(), &selected).is_empty());
    }

    #[test]
    fn test_relevance_keeps_api_order() {
        let products = sample();
        assert_eq!(apply_sort(products.clone(), SortOption::Relevance), products);
    }

    #[test]
    fn test_price_ascending_is_stable() {
        let sorted = apply_sort(sample(), SortOption::PriceAscending);
        // b1, s1, d2 share a price and keep their input order
        assert_eq!(ids(&sorted), ["b2", "b1", "s1", "d2", "s2", "d1", "j1"]);
        assert!(sorted.windows(2).all(|w| w[0].price <= w[1].price));
    }

    #[test]
    fn test_price_descending_is_stable() {
        let sorted = apply_sort(sample(), SortOption::PriceDescending);
        assert_eq!(ids(&sorted), ["j1", "d1", "s2", "b1", "s1", "d2", "b2"]);
        assert!(sorted.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn test_pages_reconstruct_input() {
        let products = sample();
        for page_size in 1..=products.len() + 1 {
            let pages = total_pages(products.len(), page_size);
            let rebuilt: Vec<Product> = (1..=pages)
                .flat_map(|page| paginate(&products, page_size, page).to_vec())
                .collect();
            assert_eq!(rebuilt, products, "page size {page_size}");
        }
    }

    #[test]
    fn test_out_of_range_pages_are_empty() {
        let products = sample();
        assert!(paginate(&products, 3, 0).is_empty());
        assert!(paginate(&products, 3, 4).is_empty());
        assert!(paginate(&products, 0, 1).is_empty());
        assert!(paginate(&products, 3, usize::MAX).is_empty());
        assert_eq!(paginate(&products, 3, 3).len(), 1);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0, 6), 0);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(7, 0), 0);
    }

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!("relevance".parse::<SortOption>().unwrap(), SortOption::Relevance);
        assert_eq!("low".parse::<SortOption>().unwrap(), SortOption::PriceAscending);
        assert_eq!(
            "Price-Descending".parse::<SortOption>().unwrap(),
            SortOption::PriceDescending
        );
        assert!("newest".parse::<SortOption>().is_err());
        let parsed: SortOption = serde_json::from_str("\"high\"").unwrap();
        assert_eq!(parsed, SortOption::PriceDescending);
    }

    #[test]
    fn test_toggle_category_resets_page() {
        let mut state = CatalogFilterState::new();
        state.set_page(3);
        state.toggle_category("Bags");
        assert!(state.is_selected("Bags"));
        assert_eq!(state.current_page(), 1);

        state.set_page(2);
        state.toggle_category("Bags");
        assert!(!state.is_selected("Bags"));
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_sort_change_keeps_page() {
        let mut state = CatalogFilterState::new();
        state.set_page(2);
        state.set_sort(SortOption::PriceDescending);
        assert_eq!(state.current_page(), 2);
    }

    #[test]
    fn test_set_page_clamps_to_one() {
        let mut state = CatalogFilterState::new();
        state.set_page(0);
        assert_eq!(state.current_page(), 1);
    }

    #[test]
    fn test_two_product_scenario() {
        let products = vec![product("a", 3000, "Shoes"), product("b", 1000, "Bags")];
        let mut state = CatalogFilterState::new();
        state.set_sort(SortOption::PriceAscending);

        let page = CatalogPage::build(&products, &state, 1);
        assert_eq!(ids(&page.items), ["b"]);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_more_pages());

        state.set_page(2);
        let page = CatalogPage::build(&products, &state, 1);
        assert_eq!(ids(&page.items), ["a"]);
        assert!(!page.has_more_pages());
    }

    #[test]
    fn test_build_counts_filtered_items() {
        let mut state = CatalogFilterState::new();
        state.toggle_category("Dresses");
        let page = CatalogPage::build(&sample(), &state, 6);
        assert_eq!(page.total_items, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page_numbers().collect::<Vec<_>>(), [1]);
    }
}
