//! Listing controllers.
//!
//! Controllers own the fetched product list and the view-local state, and
//! rebuild what to display from those on every input change.

pub mod catalog;
pub mod collections;

pub use catalog::{CatalogController, LoadTicket};
pub use collections::CollectionCarousel;
