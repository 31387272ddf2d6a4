use super::filter::{MAX_PRICE, ProductFilter};

/// Projects the current filter plus the requested page window into the query
/// parameters of the product-listing endpoint, in the form reqwest's
/// `.query(&params)` takes.
///
/// Fields at their unset sentinel (empty category/search, zero minimum,
/// ceiling maximum) are omitted; `page`, `limit` and `sort_by` are always
/// present. Total over any well-formed filter.
pub fn query_params(filter: &ProductFilter, page: u32, limit: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![("page", page.to_string()), ("limit", limit.to_string())];

    if !filter.category.is_empty() {
        params.push(("category", filter.category.clone()));
    }
    if !filter.search_term.is_empty() {
        params.push(("search", filter.search_term.clone()));
    }
    if filter.min_price > 0.0 {
        params.push(("min_price", filter.min_price.to_string()));
    }
    if filter.max_price < MAX_PRICE {
        params.push(("max_price", filter.max_price.to_string()));
    }
    params.push(("sort_by", filter.sort_by.as_str().to_string()));

    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::filter::SortKey;

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn default_filter_emits_only_page_limit_and_sort() {
        let params = query_params(&ProductFilter::default(), 1, 12);
        assert_eq!(keys(&params), vec!["page", "limit", "sort_by"]);
        assert_eq!(params[0].1, "1");
        assert_eq!(params[1].1, "12");
        assert_eq!(params[2].1, "name");
    }

    #[test]
    fn set_fields_are_all_emitted() {
        let filter = ProductFilter {
            category: "Electronics".to_string(),
            search_term: "phone".to_string(),
            min_price: 50.0,
            max_price: 1000.0,
            sort_by: SortKey::PriceDesc,
        };
        let params = query_params(&filter, 3, 24);
        assert_eq!(
            params,
            vec![
                ("page", "3".to_string()),
                ("limit", "24".to_string()),
                ("category", "Electronics".to_string()),
                ("search", "phone".to_string()),
                ("min_price", "50".to_string()),
                ("max_price", "1000".to_string()),
                ("sort_by", "price_desc".to_string()),
            ]
        );
    }

    #[test]
    fn sentinel_bounds_are_omitted() {
        let filter = ProductFilter {
            min_price: 0.0,
            max_price: MAX_PRICE,
            ..ProductFilter::default()
        };
        let params = query_params(&filter, 1, 12);
        assert!(!keys(&params).contains(&"min_price"));
        assert!(!keys(&params).contains(&"max_price"));
    }

    #[test]
    fn fractional_prices_serialize_as_plain_decimals() {
        let filter = ProductFilter {
            min_price: 9.5,
            max_price: 19.99,
            ..ProductFilter::default()
        };
        let params = query_params(&filter, 1, 12);
        assert!(params.contains(&("min_price", "9.5".to_string())));
        assert!(params.contains(&("max_price", "19.99".to_string())));
    }
}
