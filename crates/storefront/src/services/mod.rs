//! Business services for the storefront.

pub mod cart;
pub mod notify;

pub use cart::CartService;
pub use notify::{LogNotifier, Notifier};
