//! Shopfront Core - catalog and cart types plus the pure logic over them.
//!
//! This crate is shared by every Shopfront component:
//! - `storefront` - Catalog API client, cart persistence, view controllers
//! - `cli` - Command-line front end
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no logging,
//! no HTTP clients. Every function here is deterministic given its inputs.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for IDs, prices and variants; products and cart lines
//! - [`catalog`] - Filter, sort and paginate pipeline for product listings
//! - [`cart`] - Merge-by-identity cart mutations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use cart::{CartError, add_to_cart, remove_line};
pub use catalog::{CatalogFilterState, CatalogPage, SortOption};
pub use types::*;
