use crate::models::{Banner, Catalog, Product};
use crate::{Error, Result};
use vitrine_api::{BannerDto, CatalogClient, ProductDto};

/// Trait for catalog sources - makes testing easier and keeps things flexible
///
/// The controller only ever sees already-parsed data through this seam, so
/// tests can hand it canned catalogs and the HTTP client stays in its own
/// crate. A rejected fetch is a normal `Err` branch, never a panic.
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    async fn fetch_catalog(&self) -> Result<Catalog>;
}

/// Wrapper around the HTTP client that implements CatalogSource
pub struct RemoteCatalogSource {
    client: CatalogClient,
}

impl RemoteCatalogSource {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl CatalogSource for RemoteCatalogSource {
    async fn fetch_catalog(&self) -> Result<Catalog> {
        let dto = self
            .client
            .fetch_catalog()
            .await
            .map_err(|e| Error::Source(e.to_string()))?;

        Ok(Catalog {
            banners: dto.banners.into_iter().map(banner_from_dto).collect(),
            products: dto.products.into_iter().map(product_from_dto).collect(),
        })
    }
}

/// Convert an API product into our internal model
fn product_from_dto(dto: ProductDto) -> Product {
    Product {
        id: dto.id.into_string(),
        name: dto.name,
        category: dto.category,
        price: dto.price,
        photos: dto.photos,
    }
}

fn banner_from_dto(dto: BannerDto) -> Banner {
    Banner {
        id: dto.id.into_string(),
        photo: dto.photo,
    }
}
