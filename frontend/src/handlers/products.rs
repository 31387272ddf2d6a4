use anyhow::{Context, Result};
use serde_json::Value;

use crate::models::Category;

/// HTTP collaborator for the product API. Base URL and credential are handed
/// over once at construction; request handlers never reach into ambient
/// configuration. Carries no retry or timeout policy of its own.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token,
            http: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, path: &str, params: &[(&str, String)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).query(params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("request to {url} failed"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("api error: {status} - {body}");
        }

        response
            .json::<Value>()
            .await
            .with_context(|| format!("invalid json from {url}"))
    }

    /// Raw product-listing response; callers run it through the normalizer,
    /// so any of the shapes the API has historically produced is acceptable.
    pub async fn fetch_products(&self, params: &[(&str, String)]) -> Result<Value> {
        self.get_json("/api/products", params).await
    }

    pub async fn fetch_product(&self, id: &str) -> Result<Value> {
        self.get_json(&format!("/api/products/{id}"), &[]).await
    }

    pub async fn fetch_featured(&self, limit: u32) -> Result<Value> {
        self.get_json("/api/products/featured", &[("limit", limit.to_string())])
            .await
    }

    pub async fn fetch_categories(&self) -> Result<Vec<Category>> {
        let value = self.get_json("/api/products/categories", &[]).await?;
        let categories = value
            .get("categories")
            .cloned()
            .unwrap_or_else(|| Value::Array(Vec::new()));
        serde_json::from_value(categories).context("invalid categories payload")
    }
}
