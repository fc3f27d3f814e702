//! Command implementations.
//!
//! Each command returns the text to print; [`emit`] writes it to stdout.

pub mod cart;
pub mod catalog;
pub mod collection;

use shopfront_storefront::services::Notifier;

/// Prints notifications as a single confirmation line.
pub struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    #[allow(clippy::print_stdout)]
    fn success(&self, message: &str) {
        println!("✓ {message}");
    }
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub fn emit(output: &str) {
    if !output.is_empty() {
        println!("{output}");
    }
}
