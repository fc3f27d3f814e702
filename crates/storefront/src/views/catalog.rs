//! Filterable, sortable, paginated product grid (e.g., "new arrivals").

use shopfront_core::{CatalogFilterState, CatalogPage, Product, ProductId, SortOption};
use tracing::{debug, instrument};

use crate::api::{CatalogClient, ProductQuery};
use crate::config::CatalogConfig;

/// Handle for one in-flight catalog request.
///
/// Tickets carry a monotonically increasing sequence number; only the result
/// of the most recently issued ticket is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    query: ProductQuery,
}

impl LoadTicket {
    #[must_use]
    pub const fn seq(&self) -> u64 {
        self.seq
    }

    #[must_use]
    pub const fn query(&self) -> &ProductQuery {
        &self.query
    }
}

/// Controller for a product grid.
///
/// Fetches once per load; filter, sort and page changes only rerun the pure
/// pipeline over the in-memory list.
pub struct CatalogController {
    client: CatalogClient,
    query: ProductQuery,
    heading: String,
    item_noun: &'static str,
    page_size: usize,
    categories: Vec<String>,
    products: Vec<Product>,
    state: CatalogFilterState,
    loading: bool,
    latest_seq: u64,
}

impl CatalogController {
    /// Create a controller for `query` with the given sidebar categories.
    ///
    /// The heading is taken from the query's tag or category. A zero
    /// `page_size` is treated as 1.
    #[must_use]
    pub fn new(
        client: CatalogClient,
        query: ProductQuery,
        page_size: usize,
        categories: Vec<String>,
    ) -> Self {
        let heading = query
            .tag
            .as_deref()
            .or(query.category.as_deref())
            .map_or_else(|| "ALL PRODUCTS".to_string(), |s| s.replace('-', " ").to_uppercase());
        Self {
            client,
            query,
            heading,
            item_noun: "items",
            page_size: page_size.max(1),
            categories,
            products: Vec::new(),
            state: CatalogFilterState::new(),
            loading: false,
            latest_seq: 0,
        }
    }

    /// Controller for the new arrivals grid.
    #[must_use]
    pub fn new_arrivals(client: CatalogClient, config: &CatalogConfig) -> Self {
        Self {
            heading: "NEW ARRIVAL".to_string(),
            item_noun: "new items",
            ..Self::new(
                client,
                ProductQuery::tagged(config.new_arrivals_tag.clone()),
                config.page_size,
                config.categories.clone(),
            )
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Fetch the product list and apply it.
    ///
    /// Fetch failures leave an empty list; they never surface as errors.
    #[instrument(skip(self), fields(tag = ?self.query.tag))]
    pub async fn load(&mut self) {
        let ticket = self.begin_load();
        let products = self.client.load_catalog(ticket.query()).await;
        self.finish_load(&ticket, products);
    }

    /// Drop the cached list and fetch again.
    pub async fn reload(&mut self) {
        self.client.invalidate(&self.query).await;
        self.load().await;
    }

    /// Issue a new request ticket and mark the view as loading.
    ///
    /// Use with [`Self::finish_load`] when the fetch runs elsewhere (e.g., on a
    /// spawned task through a cloned [`CatalogClient`]).
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_seq += 1;
        self.loading = true;
        LoadTicket {
            seq: self.latest_seq,
            query: self.query.clone(),
        }
    }

    /// Apply the result of `ticket`.
    ///
    /// Returns `false` and leaves the view untouched if a newer ticket has been
    /// issued since.
    pub fn finish_load(&mut self, ticket: &LoadTicket, products: Vec<Product>) -> bool {
        if ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding stale catalog response"
            );
            return false;
        }
        debug!(count = products.len(), "Applied catalog response");
        self.products = products;
        self.loading = false;
        true
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// Toggle a sidebar category. Resets to page 1.
    pub fn toggle_category(&mut self, category: &str) {
        self.state.toggle_category(category);
    }

    /// Replace the category selection. Resets to page 1.
    pub fn set_categories<I, S>(&mut self, categories: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state.set_categories(categories);
    }

    /// Change sort order, keeping the current page.
    pub const fn set_sort(&mut self, sort: SortOption) {
        self.state.set_sort(sort);
    }

    /// Jump to a page.
    pub fn set_page(&mut self, page: usize) {
        self.state.set_page(page);
    }

    /// The page to display for the current state.
    #[must_use]
    pub fn page(&self) -> CatalogPage {
        CatalogPage::build(&self.products, &self.state, self.page_size)
    }

    /// Title of the grid.
    #[must_use]
    pub fn heading(&self) -> &str {
        &self.heading
    }

    /// Header line above the grid.
    #[must_use]
    pub fn summary(&self) -> String {
        if self.loading {
            return "Loading...".to_string();
        }
        format!("{} {}", self.page().total_items, self.item_noun)
    }

    /// Message shown in place of an empty grid, if any.
    #[must_use]
    pub fn empty_message(&self) -> Option<&'static str> {
        if self.loading {
            Some("Loading products...")
        } else if self.page().is_empty() {
            Some("No products found.")
        } else {
            None
        }
    }

    /// Look up a fetched product by ID.
    #[must_use]
    pub fn find_product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == *id)
    }

    #[must_use]
    pub const fn state(&self) -> &CatalogFilterState {
        &self.state
    }

    /// Fetched products in API order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Sidebar category options.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn client(&self) -> &CatalogClient {
        &self.client
    }
}
