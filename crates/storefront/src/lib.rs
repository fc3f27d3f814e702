//! Shopfront Storefront library.
//!
//! Catalog fetching, listing controllers and local cart persistence, built on
//! the pure types and functions in `shopfront_core`.
//!
//! # Modules
//!
//! - [`api`] - Remote product API client with response caching
//! - [`storage`] - Key-value stores standing in for browser local storage
//! - [`services`] - Cart merge service and notifications
//! - [`views`] - New arrivals grid and collection carousels
//! - [`config`] - Environment configuration
//! - [`error`] - Unified error type with Sentry reporting

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;
pub mod views;

#[cfg(test)]
mod testing;

pub use error::{AppError, Result};
pub use state::AppState;
