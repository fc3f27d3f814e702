//! Shopper-facing notifications (toasts).
//!
//! Notifications are fire-and-forget: a notifier must never fail or block the
//! operation that triggered it.

use std::sync::Arc;

/// Receives transient success messages.
pub trait Notifier: Send + Sync {
    /// Show a success message (e.g., "Linen Dress added to cart!").
    fn success(&self, message: &str);
}

/// Notifier that emits an `info` event.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(text = message, "Notification");
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn success(&self, message: &str) {
        (**self).success(message);
    }
}
