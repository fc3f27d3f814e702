//! Product grid listing.

use shopfront_core::SortOption;
use shopfront_storefront::AppState;
use shopfront_storefront::api::ProductQuery;
use shopfront_storefront::views::CatalogController;

use crate::render;

/// Options for one listing run.
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub tag: Option<String>,
    pub all: bool,
    pub categories: Vec<String>,
    pub sort: SortOption,
    pub page: usize,
    pub reload: bool,
}

/// Build the controller for `options`.
fn controller(state: &AppState, options: &ListOptions) -> CatalogController {
    let catalog = &state.config().catalog;
    let query = if options.all {
        ProductQuery::all()
    } else if let Some(tag) = &options.tag {
        ProductQuery::tagged(tag.clone())
    } else {
        return state.new_arrivals();
    };
    CatalogController::new(
        state.catalog().clone(),
        query,
        catalog.page_size,
        catalog.categories.clone(),
    )
}

/// Fetch, filter, sort and paginate, then render the page.
pub async fn list(state: &AppState, options: ListOptions) -> String {
    let mut view = controller(state, &options);

    if options.reload {
        view.reload().await;
    } else {
        view.load().await;
    }

    // Category changes reset the page, so apply the page last
    view.set_categories(options.categories);
    view.set_sort(options.sort);
    view.set_page(options.page);

    render::catalog(&view)
}
