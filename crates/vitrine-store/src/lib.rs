// On-device key-value persistence
// Favorites and the cached catalog snapshot live here, nothing else does

pub mod memory;
pub mod sqlite;
pub mod store;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{KvStore, StoreError};
