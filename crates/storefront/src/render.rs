//! Plain-text rendering of listings for the terminal.

use std::fmt::Write as _;

use technexus_catalog::{CategoryFilter, Product, format_price};
use technexus_core::Entity;

pub const EMPTY_TITLE: &str = "No products found";
pub const EMPTY_HINT: &str = "Try adjusting your filters or search terms";

/// Tab strip with the active filter bracketed.
pub fn tabs(active: CategoryFilter) -> String {
    CategoryFilter::ALL
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{tab}]")
            } else {
                tab.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// One summary line per listing.
pub fn card(product: &Product) -> String {
    format!(
        "{id:<34} {category:<12} {price:>12}  {title}",
        id = product.id().as_str(),
        category = product.category().as_str(),
        price = format_price(product.price()),
        title = product.title(),
    )
}

pub fn grid(products: &[&Product]) -> String {
    if products.is_empty() {
        return format!("{EMPTY_TITLE}\n{EMPTY_HINT}\n");
    }
    let mut out = String::new();
    for product in products {
        let _ = writeln!(out, "{}", card(product));
    }
    out
}

/// Full detail view.
pub fn detail(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", product.title());
    let _ = writeln!(out, "{}  |  {}", format_price(product.price()), product.category());
    let _ = writeln!(out, "Listed {}", product.created_at().format("%Y-%m-%d %H:%M UTC"));
    let _ = writeln!(out, "Image {}", product.image_url());
    if !product.description().is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", product.description());
    }
    out
}
