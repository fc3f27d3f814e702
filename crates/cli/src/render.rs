//! Plain-text rendering of listings and the cart.

use std::fmt::Write;

use shopfront_core::{Cart, Product};
use shopfront_storefront::views::CatalogController;

const TITLE_WIDTH: usize = 32;

/// Render the grid: header, sidebar, sort, products and pagination bar.
pub fn catalog(view: &CatalogController) -> String {
    let page = view.page();
    let state = view.state();
    let mut out = String::new();

    let _ = writeln!(out, "{}", view.heading());
    let _ = writeln!(out, "{}", view.summary());

    if !view.categories().is_empty() {
        let _ = writeln!(out, "\nCATEGORIES");
        for category in view.categories() {
            let mark = if state.is_selected(category) { 'x' } else { ' ' };
            let _ = writeln!(out, "  [{mark}] {category}");
        }
    }

    let _ = writeln!(out, "\n{}", state.sort().label());

    match view.empty_message() {
        Some(message) => {
            let _ = writeln!(out, "\n{message}");
        }
        None => {
            out.push('\n');
            for product in &page.items {
                out.push_str(&product_row(product));
                out.push('\n');
            }
        }
    }

    if page.total_pages > 1 {
        let pages: Vec<String> = page
            .page_numbers()
            .map(|n| {
                if n == page.current_page {
                    format!("[{n}]")
                } else {
                    n.to_string()
                }
            })
            .collect();
        let _ = writeln!(out, "\nPages: {}", pages.join(" "));
    }

    out.trim_end().to_string()
}

/// Render one carousel collection.
pub fn collection(name: &str, products: &[Product]) -> String {
    let mut out = format!("{} COLLECTIONS\n", name.to_uppercase());
    if products.is_empty() {
        let _ = write!(out, "No {name} found.");
        return out;
    }
    for product in products {
        out.push_str(&product_row(product));
        out.push('\n');
    }
    out.trim_end().to_string()
}

/// Render the list of configured collection names.
pub fn collection_names<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let names: Vec<&str> = names.collect();
    if names.is_empty() {
        return "No collections configured.".to_string();
    }
    format!("Collections: {}", names.join(", "))
}

/// Render cart lines with totals.
pub fn cart(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart {
        let _ = writeln!(
            out,
            "{:>3} x {:<width$} {:<4} {:>10} {:>10}",
            line.quantity,
            truncate(&line.display_name),
            line.variant,
            line.unit_price.display(),
            line.line_price().display(),
            width = TITLE_WIDTH,
        );
    }
    let _ = write!(
        out,
        "{} items, subtotal {}",
        cart.total_quantity(),
        cart.subtotal().display()
    );
    out
}

fn product_row(product: &Product) -> String {
    format!(
        "  {:<width$} {:>10}  {}  ({})",
        truncate(&product.title),
        product.price.display(),
        product.category,
        product.id,
        width = TITLE_WIDTH,
    )
}

fn truncate(text: &str) -> String {
    if text.chars().count() <= TITLE_WIDTH {
        return text.to_string();
    }
    let mut out: String = text.chars().take(TITLE_WIDTH - 1).collect();
    out.push('…');
    out
}
