//! Text rendering of the catalog state.

use catalog_core::{CatalogState, LoadStatus, Product};

pub fn render(state: &CatalogState) -> String {
    let filter = &state.filter;
    let mut lines = Vec::new();

    let mut header = String::from("Product Catalog");
    if !filter.search_query.is_empty() {
        header.push_str(&format!("  [search: {:?}]", filter.search_query));
    }
    if filter.in_stock_only {
        header.push_str("  [in stock only]");
    }
    lines.push(header);

    if let Some(error) = &state.error {
        lines.push(format!("error: {error}"));
    }

    if state.status == LoadStatus::Loading {
        lines.push("Loading products...".to_string());
    } else if state.products.is_empty() && state.error.is_none() {
        lines.push("No products found".to_string());
    } else {
        lines.extend(state.products.iter().map(render_product));
    }

    if state.has_more {
        lines.push(format!("-- page {}, more available (`more`) --", filter.page));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_product(product: &Product) -> String {
    format!(
        "  #{:<4} {:<24} {:>10}  {:<12} {}",
        product.id,
        product.name,
        format!("${:.2}", product.price),
        if product.in_stock { "in stock" } else { "out of stock" },
        if product.saved { "[saved]" } else { "" },
    )
    .trim_end()
    .to_string()
}
