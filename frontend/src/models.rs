use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A catalog product as the API reports it. Read-only on this side; the whole
/// list is replaced on every fetch. Numeric fields decode leniently (numbers
/// or numeric strings, anything else is 0) and missing fields take defaults,
/// so a sloppy payload never fails the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(deserialize_with = "de::lenient_f64")]
    pub price: f64,
    pub original_price: Option<f64>,
    pub stock_quantity: i64,
    #[serde(deserialize_with = "de::lenient_opt_f64")]
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub tags: Option<Vec<String>>,
    pub image_url: Option<String>,
    pub is_active: bool,
    #[serde(deserialize_with = "de::lenient_timestamp")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for Product {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            description: String::new(),
            category: String::new(),
            price: 0.0,
            original_price: None,
            stock_quantity: 0,
            rating: None,
            review_count: None,
            tags: None,
            image_url: None,
            is_active: true,
            created_at: None,
        }
    }
}

impl Product {
    /// Lossy decode: a malformed element becomes a default product instead of
    /// failing the batch.
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// A category entry from `/api/products/categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub count: i64,
}

/// Inbound query string of the `/products` page.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    pub page: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<String>,
}

mod de {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    fn as_f64(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn lenient_f64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(as_f64(&value).unwrap_or(0.0))
    }

    pub fn lenient_opt_f64<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(as_f64(&value))
    }

    pub fn lenient_timestamp<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(match value {
            Value::String(s) => DateTime::parse_from_rfc3339(&s)
                .map(|t| t.with_timezone(&Utc))
                .ok(),
            _ => None,
        })
    }
}
