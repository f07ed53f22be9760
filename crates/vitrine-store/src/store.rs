use thiserror::Error;

/// All the ways persistence can fail
///
/// Callers are expected to treat these as telemetry, not control flow: a
/// failed write leaves the in-memory state authoritative and a failed read
/// behaves like a missing key.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Contract for the on-device key-value store
///
/// String keys to string values, async at the boundary. Implementations log
/// their own failures before returning them, so a caller that ignores the
/// `Err` still leaves a trace in the logs. Nothing here ever panics.
#[async_trait::async_trait]
pub trait KvStore: Send + Sync {
    /// Write a value, replacing any previous value under the same key.
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Read a value. `Ok(None)` means the key was never written (or was
    /// removed); errors mean the backend itself misbehaved.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
