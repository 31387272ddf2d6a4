use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub stock_quantity: i64,
    pub rating: Option<f64>,
    pub review_count: i64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub original_price: Option<f64>,
    pub stock_quantity: Option<i64>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
}

/// Query string of the listing endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
}

impl ProductQuery {
    /// Clamped `(page, limit, offset)` window.
    pub fn page_window(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(12).clamp(1, 100);
        (page, limit, (page - 1).saturating_mul(limit))
    }

    /// ORDER BY clause for the requested sort key. A closed set of static
    /// strings; user input never reaches the SQL text.
    pub fn sort_clause(&self) -> &'static str {
        match self.sort_by.as_deref().unwrap_or("name") {
            "price_asc" => "price ASC",
            "price_desc" => "price DESC",
            "rating" => "rating DESC",
            "newest" => "created_at DESC",
            _ => "name ASC",
        }
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref().filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Deserialize)]
pub struct FeaturedQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PaginatedProducts {
    pub products: Vec<Product>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct PaginationInfo {
    pub total_items: i64,
    pub items_per_page: i64,
    pub current_page: i64,
    pub total_pages: i64,
}

impl PaginationInfo {
    pub fn new(current_page: i64, items_per_page: i64, total_items: i64) -> Self {
        let total_pages = ((total_items + items_per_page - 1) / items_per_page).max(1);
        Self {
            total_items,
            items_per_page,
            current_page,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Category {
    pub name: String,
    pub count: i64,
}

#[derive(Debug, Serialize)]
pub struct CategoryList {
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: String,
    pub product_id: String,
    pub user_name: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct NewReview {
    pub user_name: String,
    pub rating: i64,
    pub comment: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct PaginatedReviews {
    pub reviews: Vec<Review>,
    pub pagination: PaginationInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_window_clamps_inputs() {
        let query = ProductQuery {
            page: Some(0),
            limit: Some(1000),
            ..ProductQuery::default()
        };
        assert_eq!(query.page_window(), (1, 100, 0));

        let query = ProductQuery {
            page: Some(3),
            limit: None,
            ..ProductQuery::default()
        };
        assert_eq!(query.page_window(), (3, 12, 24));
    }

    #[test]
    fn page_window_survives_absurd_page_numbers() {
        let query = ProductQuery {
            page: Some(i64::MAX),
            limit: Some(12),
            ..ProductQuery::default()
        };
        let (page, limit, offset) = query.page_window();
        assert_eq!(page, i64::MAX);
        assert_eq!(limit, 12);
        assert_eq!(offset, i64::MAX);
    }

    #[test]
    fn sort_clause_covers_all_keys() {
        let clause = |s: &str| ProductQuery {
            sort_by: Some(s.to_string()),
            ..ProductQuery::default()
        }
        .sort_clause();

        assert_eq!(clause("price_asc"), "price ASC");
        assert_eq!(clause("price_desc"), "price DESC");
        assert_eq!(clause("rating"), "rating DESC");
        assert_eq!(clause("newest"), "created_at DESC");
        assert_eq!(clause("name"), "name ASC");
        assert_eq!(clause("garbage"), "name ASC");
        assert_eq!(ProductQuery::default().sort_clause(), "name ASC");
    }

    #[test]
    fn pagination_uses_ceiling_division() {
        assert_eq!(PaginationInfo::new(1, 12, 23).total_pages, 2);
        assert_eq!(PaginationInfo::new(1, 12, 24).total_pages, 2);
        assert_eq!(PaginationInfo::new(1, 12, 25).total_pages, 3);
        assert_eq!(PaginationInfo::new(1, 12, 0).total_pages, 1);
    }

    #[test]
    fn blank_filters_count_as_absent() {
        let query = ProductQuery {
            category: Some(String::new()),
            search: Some("  ".to_string()),
            ..ProductQuery::default()
        };
        assert_eq!(query.category(), None);
        // whitespace is a real search term, only the empty string is absent
        assert_eq!(query.search(), Some("  "));
    }
}
