use crate::models::Product;

/// Live-search filter over the product collection
///
/// Returns the products whose name or category contains `term` as a
/// case-insensitive substring, in catalog order. An empty term returns an
/// empty result: the suggestion overlay is hidden when nothing was typed,
/// while the full catalog list is rendered separately from `products()`.
/// Pure and O(n), cheap enough to run on every keystroke.
pub fn filter_catalog(products: &[Product], term: &str) -> Vec<Product> {
    if term.is_empty() {
        return Vec::new();
    }

    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| {
            p.name.to_lowercase().contains(&needle) || p.category.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
