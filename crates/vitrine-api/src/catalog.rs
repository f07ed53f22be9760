use crate::retry::{with_retry, RetryConfig};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("catalog endpoint returned {status}")]
    Status { status: reqwest::StatusCode },
}

/// Product ids come back from the API as numbers, but nothing in the app
/// does arithmetic on them, so they are normalized to opaque strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdDto {
    Number(i64),
    Text(String),
}

impl IdDto {
    pub fn into_string(self) -> String {
        match self {
            IdDto::Number(n) => n.to_string(),
            IdDto::Text(s) => s,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProductDto {
    pub id: IdDto,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BannerDto {
    pub id: IdDto,
    pub photo: String,
}

/// What the catalog endpoint resolves to: both collections in one response.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDto {
    #[serde(default)]
    pub banners: Vec<BannerDto>,
    #[serde(default)]
    pub products: Vec<ProductDto>,
}

/// Client for the storefront catalog API
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            retry: RetryConfig::default(),
        }
    }

    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Fetch banners and products in one shot, retrying transient failures.
    pub async fn fetch_catalog(&self) -> Result<CatalogDto, ApiError> {
        let url = format!("{}/catalog", self.base_url.trim_end_matches('/'));
        debug!("fetching catalog from {url}");

        with_retry(&self.retry, || async {
            let response = self.http.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ApiError::Status { status });
            }
            Ok(response.json::<CatalogDto>().await?)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_and_string_ids() {
        let raw = r#"{
            "banners": [{"id": 10, "photo": "banner.jpg"}],
            "products": [
                {"id": 1, "name": "Red Shoe", "category": "Shoes", "price": 99.9, "photos": ["a.jpg"]},
                {"id": "sku-7", "name": "Blue Hat", "category": "Hats", "price": 15.0, "photos": ["b.jpg", "c.jpg"]}
            ]
        }"#;

        let catalog: CatalogDto = serde_json::from_str(raw).unwrap();
        assert_eq!(catalog.banners.len(), 1);
        assert_eq!(catalog.products.len(), 2);
        assert_eq!(catalog.products[0].id.clone().into_string(), "1");
        assert_eq!(catalog.products[1].id.clone().into_string(), "sku-7");
    }

    #[test]
    fn missing_collections_default_to_empty() {
        let catalog: CatalogDto = serde_json::from_str("{}").unwrap();
        assert!(catalog.banners.is_empty());
        assert!(catalog.products.is_empty());
    }

    #[test]
    fn client_normalizes_trailing_slash() {
        let client = CatalogClient::new("https://api.example.com/");
        assert_eq!(client.base_url, "https://api.example.com/");
        // The slash is trimmed at request time; just make sure construction works.
        let _ = client.with_retry_config(RetryConfig::default());
    }
}
