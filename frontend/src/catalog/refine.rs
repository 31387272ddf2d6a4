use super::filter::{ProductFilter, SortKey};
use crate::models::Product;

/// Re-applies the active filter to the cached product list and orders the
/// survivors. The server already filters, but its answer and the cached copy
/// can disagree, so the view is always derived from this pass.
///
/// Pure and total: the input list is never mutated, malformed fields fall
/// back to sort-safe defaults, and equal keys keep their input order (the
/// sort is stable).
pub fn refine(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let needle = filter.search_term.to_lowercase();

    let mut refined: Vec<Product> = products
        .iter()
        .filter(|product| {
            if !needle.is_empty()
                && !product.name.to_lowercase().contains(&needle)
                && !product.description.to_lowercase().contains(&needle)
            {
                return false;
            }
            if !filter.category.is_empty() && product.category != filter.category {
                return false;
            }
            product.price >= filter.min_price && product.price <= filter.max_price
        })
        .cloned()
        .collect();

    match filter.sort_by {
        SortKey::PriceAsc => refined.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::PriceDesc => refined.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortKey::Rating => refined.sort_by(|a, b| {
            b.rating
                .unwrap_or(0.0)
                .total_cmp(&a.rating.unwrap_or(0.0))
        }),
        SortKey::Newest => refined.sort_by(|a, b| sort_timestamp(b).cmp(&sort_timestamp(a))),
        SortKey::Name => refined.sort_by(|a, b| a.name.cmp(&b.name)),
    }

    refined
}

// Missing timestamps sort as the epoch, i.e. last under "newest".
fn sort_timestamp(product: &Product) -> i64 {
    product
        .created_at
        .map(|t| t.timestamp_millis())
        .unwrap_or(0)
}
