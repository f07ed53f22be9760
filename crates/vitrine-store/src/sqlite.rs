use crate::store::{KvStore, StoreError};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::Mutex;
use tracing::warn;

/// SQLite-backed key-value store
///
/// SQLite was chosen because:
/// - Zero-config embedded database
/// - Survives app restarts and crashes without a separate process
/// - Battle-tested on-device
///
/// Operations are small single-row statements, so we run them inline behind
/// a mutex rather than shipping them to a blocking pool.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| StoreError::Backend(format!("creating {}: {}", parent.display(), e)))?;
        }

        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// In-memory database, handy for tests.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at INTEGER NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Backend("store mutex poisoned".into()))
    }
}

#[async_trait::async_trait]
impl KvStore for SqliteStore {
    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let result = (|| {
            let conn = self.lock()?;
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3",
                params![key, value, chrono::Utc::now().timestamp()],
            )?;
            Ok(())
        })();

        if let Err(ref e) = result {
            warn!("failed to write {key} to the store: {e}");
        }
        result
    }

    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let result = (|| {
            let conn = self.lock()?;
            let value = conn
                .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                    row.get::<_, String>(0)
                })
                .optional()?;
            Ok(value)
        })();

        if let Err(ref e) = result {
            warn!("failed to read {key} from the store: {e}");
        }
        result
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let result = (|| {
            let conn = self.lock()?;
            conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
            Ok(())
        })();

        if let Err(ref e) = result {
            warn!("failed to remove {key} from the store: {e}");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_get_round_trip() {
        let store = SqliteStore::in_memory().unwrap();

        store.put("greeting", "hello").await.unwrap();
        let value = store.get("greeting").await.unwrap();

        assert_eq!(value, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn put_replaces_existing_value() {
        let store = SqliteStore::in_memory().unwrap();

        store.put("k", "first").await.unwrap();
        store.put("k", "second").await.unwrap();

        assert_eq!(store.get("k").await.unwrap(), Some("second".to_string()));
    }

    #[tokio::test]
    async fn missing_key_reads_as_none() {
        let store = SqliteStore::in_memory().unwrap();

        assert_eq!(store.get("nope").await.unwrap(), None);
    }

    #[tokio::test]
    async fn remove_deletes_and_tolerates_missing_keys() {
        let store = SqliteStore::in_memory().unwrap();

        store.put("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);

        // Removing again is fine
        store.remove("k").await.unwrap();
    }
}
