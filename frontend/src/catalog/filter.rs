use serde::{Deserialize, Serialize};

/// Price ceiling that stands for "no maximum".
pub const MAX_PRICE: f64 = 250_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    Rating,
    Newest,
}

impl SortKey {
    /// Accepts both the wire spellings and the legacy `price-low`/`price-high`
    /// aliases; anything unrecognized falls back to name order.
    pub fn parse(s: &str) -> Self {
        match s {
            "price_asc" | "price-low" => SortKey::PriceAsc,
            "price_desc" | "price-high" => SortKey::PriceDesc,
            "rating" => SortKey::Rating,
            "newest" => SortKey::Newest,
            _ => SortKey::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }
}

/// User-chosen listing criteria. An empty `category`/`search_term` means
/// "no constraint"; `min_price`/`max_price` at their defaults are left out of
/// outbound requests entirely.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductFilter {
    pub category: String,
    pub search_term: String,
    pub min_price: f64,
    pub max_price: f64,
    pub sort_by: SortKey,
}

impl Default for ProductFilter {
    fn default() -> Self {
        Self {
            category: String::new(),
            search_term: String::new(),
            min_price: 0.0,
            max_price: MAX_PRICE,
            sort_by: SortKey::Name,
        }
    }
}

impl ProductFilter {
    /// Merges a partial change intent; fields not present in the update keep
    /// their current value.
    pub fn apply(&mut self, update: FilterUpdate) {
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(search_term) = update.search_term {
            self.search_term = search_term;
        }
        if let Some(min_price) = update.min_price {
            self.min_price = min_price;
        }
        if let Some(max_price) = update.max_price {
            self.max_price = max_price;
        }
        if let Some(sort_by) = update.sort_by {
            self.sort_by = sort_by;
        }
    }

    pub fn reset(&mut self) {
        *self = ProductFilter::default();
    }
}

/// Partial filter update, merged into the current filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterUpdate {
    pub category: Option<String>,
    pub search_term: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<SortKey>,
}
