// HTTP client for the storefront catalog API
// Transport only - the core never sees reqwest, just parsed data

pub mod catalog;
pub mod retry;

pub use catalog::{ApiError, BannerDto, CatalogClient, CatalogDto, ProductDto};
pub use retry::{with_retry, RetryConfig};
