// Catalog state and search - the part of the storefront with actual rules
pub mod config;
pub mod controller;
pub mod error;
pub mod favorites;
pub mod models;
pub mod search;
pub mod source;

pub use config::Config;
pub use controller::{CatalogController, LoadPhase, NavigationIntent};
pub use error::Error;
pub use source::{CatalogSource, RemoteCatalogSource};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
