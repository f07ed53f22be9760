use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product model - the star of the show
///
/// `id` is opaque and unique within a catalog snapshot. `photos` is ordered
/// and non-empty for any product worth rendering; an empty list is an
/// upstream data defect, not something this layer papers over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub photos: Vec<String>,
}

impl Product {
    /// First photo doubles as the thumbnail.
    pub fn thumbnail(&self) -> Option<&str> {
        self.photos.first().map(String::as_str)
    }
}

/// Promotional banner, read-only and replaced wholesale on every load
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Banner {
    pub id: String,
    pub photo: String,
}

/// One catalog load: both collections together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub banners: Vec<Banner>,
    pub products: Vec<Product>,
}

/// Store key for the last successfully fetched catalog.
pub const SNAPSHOT_KEY: &str = "vitrine.catalog_snapshot";

/// Cached copy of the last good catalog, used when a fetch fails
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub catalog: Catalog,
    pub cached_at: DateTime<Utc>,
}

impl CatalogSnapshot {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            cached_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thumbnail_is_the_first_photo() {
        let product = Product {
            id: "1".into(),
            name: "Red Shoe".into(),
            category: "Shoes".into(),
            price: 99.9,
            photos: vec!["a.jpg".into(), "b.jpg".into()],
        };

        assert_eq!(product.thumbnail(), Some("a.jpg"));
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let snapshot = CatalogSnapshot::new(Catalog {
            banners: vec![Banner {
                id: "b1".into(),
                photo: "banner.jpg".into(),
            }],
            products: vec![Product {
                id: "1".into(),
                name: "Red Shoe".into(),
                category: "Shoes".into(),
                price: 99.9,
                photos: vec!["a.jpg".into()],
            }],
        });

        let raw = serde_json::to_string(&snapshot).unwrap();
        let parsed: CatalogSnapshot = serde_json::from_str(&raw).unwrap();

        assert_eq!(parsed.catalog, snapshot.catalog);
    }
}
