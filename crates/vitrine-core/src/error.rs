use thiserror::Error;

/// All the ways the catalog layer can go wrong
///
/// Most of these never reach the presentation layer: the controller absorbs
/// fetch and store failures and degrades to cached or empty state instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("catalog source failed: {0}")]
    Source(String),

    #[error("store operation failed: {0}")]
    Store(#[from] vitrine_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
