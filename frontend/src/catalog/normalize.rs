use serde::Serialize;
use serde_json::Value;

use super::pagination::PageUpdate;
use crate::models::Product;

/// Canonical response shape: a raw product list plus the server's pagination
/// block when it sent one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized {
    pub products: Vec<Value>,
    pub pagination: Option<Value>,
}

impl Normalized {
    fn empty() -> Self {
        Normalized {
            products: Vec::new(),
            pagination: None,
        }
    }
}

/// Collapses the response shapes the product API has emitted over its
/// lifetime into one canonical form, in priority order:
///
/// 1. an object with a `products` array keeps that array and its `pagination`
///    field verbatim (absent or null becomes `None`);
/// 2. a bare array is wrapped with no pagination;
/// 3. an object whose single field is an array is treated as the list;
/// 4. anything else degrades to an empty result.
///
/// Never fails, and reproduces its own output unchanged.
pub fn normalize(response: &Value) -> Normalized {
    match response {
        Value::Object(map) => {
            if let Some(Value::Array(products)) = map.get("products") {
                let pagination = match map.get("pagination") {
                    None | Some(Value::Null) => None,
                    Some(p) => Some(p.clone()),
                };
                return Normalized {
                    products: products.clone(),
                    pagination,
                };
            }
            if map.len() == 1 {
                if let Some(Value::Array(products)) = map.values().next() {
                    return Normalized {
                        products: products.clone(),
                        pagination: None,
                    };
                }
            }
            Normalized::empty()
        }
        Value::Array(products) => Normalized {
            products: products.clone(),
            pagination: None,
        },
        _ => Normalized::empty(),
    }
}

/// Lossy second stage: each raw value becomes a typed product, malformed
/// elements included (they decay to defaults rather than dropping the batch).
pub fn decode_products(values: &[Value]) -> Vec<Product> {
    values.iter().map(Product::from_value).collect()
}

/// Decodes the server pagination block; an undecodable block counts as the
/// server not reporting pagination at all.
pub fn decode_pagination(pagination: Option<&Value>) -> Option<PageUpdate> {
    pagination.and_then(|value| serde_json::from_value(value.clone()).ok())
}
