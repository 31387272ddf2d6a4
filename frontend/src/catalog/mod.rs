//! The catalog pipeline: query building, response normalization, client-side
//! refinement and pagination bookkeeping. Everything here is synchronous and
//! pure; the network fetch lives in `handlers::products`.

pub mod filter;
pub mod normalize;
pub mod pagination;
pub mod query;
pub mod refine;

pub use filter::{FilterUpdate, MAX_PRICE, ProductFilter, SortKey};
pub use normalize::{Normalized, decode_pagination, decode_products, normalize};
pub use pagination::{PageUpdate, Pagination};
pub use query::query_params;
pub use refine::refine;

use serde_json::Value;

use crate::models::Product;

/// Session-lifetime catalog state: the active filter, pagination bookkeeping
/// and the most recent product list. Created with defaults at startup and
/// mutated only through the events below; each fetch response replaces the
/// list wholesale, so overlapping fetches resolve last-write-wins.
#[derive(Debug, Clone, Default)]
pub struct CatalogState {
    pub filter: ProductFilter,
    pub pagination: Pagination,
    pub products: Vec<Product>,
}

impl CatalogState {
    /// Outbound query parameters for the next fetch.
    pub fn request_params(&self) -> Vec<(&'static str, String)> {
        query_params(
            &self.filter,
            self.pagination.current_page,
            self.pagination.items_per_page,
        )
    }

    /// Filter-changed event: merges the intent and snaps back to page 1 so
    /// the next fetch shows the first page of the new selection.
    pub fn apply_filter(&mut self, update: FilterUpdate) {
        self.filter.apply(update);
        self.pagination.reset_page();
    }

    /// Fetch-completed event: normalizes whatever shape arrived, replaces the
    /// cached list and reconciles pagination.
    pub fn apply_response(&mut self, response: &Value) {
        let normalized = normalize(response);
        let server = decode_pagination(normalized.pagination.as_ref());
        self.products = decode_products(&normalized.products);
        self.pagination.reconcile(server, self.products.len());
    }

    /// Page-changed event; unchecked, like the underlying state.
    pub fn set_current_page(&mut self, page: u32) {
        self.pagination.set_current_page(page);
    }

    /// The ordered, filtered view for rendering. Leaves the cache untouched.
    pub fn visible_products(&self) -> Vec<Product> {
        refine(&self.products, &self.filter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn any_filter_change_resets_current_page() {
        let updates = [
            FilterUpdate {
                category: Some("Electronics".to_string()),
                ..FilterUpdate::default()
            },
            FilterUpdate {
                search_term: Some("mug".to_string()),
                ..FilterUpdate::default()
            },
            FilterUpdate {
                min_price: Some(10.0),
                max_price: Some(20.0),
                ..FilterUpdate::default()
            },
            FilterUpdate {
                sort_by: Some(SortKey::Newest),
                ..FilterUpdate::default()
            },
        ];
        for update in updates {
            let mut state = CatalogState::default();
            state.set_current_page(7);
            state.apply_filter(update);
            assert_eq!(state.pagination.current_page, 1);
        }
    }

    #[test]
    fn response_with_pagination_adopts_server_values() {
        let mut state = CatalogState::default();
        state.apply_response(&json!({
            "products": [{"name": "Mug", "price": 5}],
            "pagination": {"current_page": 2, "total_pages": 5, "total_items": 50, "items_per_page": 10}
        }));
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.pagination.current_page, 2);
        assert_eq!(state.pagination.total_pages, 5);
        assert_eq!(state.pagination.total_items, 50);
        assert_eq!(state.pagination.items_per_page, 10);
    }

    #[test]
    fn response_without_pagination_computes_totals() {
        let mut state = CatalogState::default();
        let products: Vec<_> = (0..23).map(|i| json!({"name": format!("p{i}")})).collect();
        state.apply_response(&json!(products));
        assert_eq!(state.pagination.total_items, 23);
        assert_eq!(state.pagination.total_pages, 2);
        assert_eq!(state.pagination.current_page, 1);
    }

    #[test]
    fn responses_replace_the_list_wholesale() {
        let mut state = CatalogState::default();
        state.apply_response(&json!([{"name": "Mug"}, {"name": "Lamp"}]));
        assert_eq!(state.products.len(), 2);
        state.apply_response(&json!([{"name": "Shirt"}]));
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.products[0].name, "Shirt");
    }

    #[test]
    fn malformed_response_degrades_to_empty() {
        let mut state = CatalogState::default();
        state.apply_response(&json!({"unexpected": {"nested": true}}));
        assert!(state.products.is_empty());
        assert_eq!(state.pagination.total_items, 0);
        assert_eq!(state.pagination.total_pages, 1);
    }

    #[test]
    fn visible_products_follow_the_filter() {
        let mut state = CatalogState::default();
        state.apply_response(&json!([
            {"name": "Zed", "price": 10},
            {"name": "Apple", "price": 5}
        ]));
        let visible = state.visible_products();
        assert_eq!(visible[0].name, "Apple");
        assert_eq!(visible[1].name, "Zed");

        state.apply_filter(FilterUpdate {
            min_price: Some(6.0),
            ..FilterUpdate::default()
        });
        let visible = state.visible_products();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].name, "Zed");
    }

    #[test]
    fn request_params_track_state() {
        let mut state = CatalogState::default();
        state.apply_filter(FilterUpdate {
            search_term: Some("mug".to_string()),
            ..FilterUpdate::default()
        });
        state.set_current_page(3);
        let params = state.request_params();
        assert!(params.contains(&("page", "3".to_string())));
        assert!(params.contains(&("limit", "12".to_string())));
        assert!(params.contains(&("search", "mug".to_string())));
    }
}
