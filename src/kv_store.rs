//! Whole-value key/value persistence for the pool list and pick ledger.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{Connection, OptionalExtension, params};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::{AppConfig, StorageBackend};
use crate::error::{BolaoError, Result};

pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

pub type SharedStore = Arc<dyn KvStore>;

fn persistence(context: &str, err: impl std::fmt::Display) -> BolaoError {
    BolaoError::Persistence(format!("{context}: {err}"))
}

/// One JSON file per key, swapped in through a temp file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let file = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect::<String>();
        self.dir.join(format!("{file}.json"))
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(persistence(&format!("read {}", path.display()), err)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|err| persistence(&format!("create {}", self.dir.display()), err))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|err| persistence(&format!("write {}", tmp.display()), err))?;
        fs::rename(&tmp, &path).map_err(|err| persistence(&format!("swap {}", path.display()), err))?;
        Ok(())
    }
}

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|err| persistence(&format!("create {}", dir.display()), err))?;
        }
        let conn = Connection::open(path)
            .map_err(|err| persistence(&format!("open {}", path.display()), err))?;
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|err| persistence("open memory db", err))?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|err| persistence("init kv schema", err))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| BolaoError::Persistence("sqlite lock poisoned".to_string()))?;
        conn.query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
            row.get::<_, String>(0)
        })
        .optional()
        .map_err(|err| persistence(&format!("read {key}"), err))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| BolaoError::Persistence("sqlite lock poisoned".to_string()))?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )
        .map_err(|err| persistence(&format!("write {key}"), err))?;
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| BolaoError::Persistence("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| BolaoError::Persistence("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

const SQLITE_FILE: &str = "bolao.sqlite";

pub fn open_store(config: &AppConfig) -> Result<SharedStore> {
    let store: SharedStore = match config.storage_backend {
        StorageBackend::Json => Arc::new(JsonFileStore::new(&config.data_dir)),
        StorageBackend::Sqlite => Arc::new(SqliteStore::open(&config.data_dir.join(SQLITE_FILE))?),
    };
    log::info!(
        "using {:?} storage under {}",
        config.storage_backend,
        config.data_dir.display()
    );
    Ok(store)
}

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    version: u32,
    data: Value,
}

/// Wraps `data` as `{"version": N, "data": ...}`.
pub fn encode_versioned<T: Serialize>(version: u32, data: &T) -> Result<String> {
    serde_json::to_string(&EnvelopeRef { version, data })
        .map_err(|err| persistence("serialize record", err))
}

/// Decodes a versioned record. A bare payload without the envelope is the
/// pre-versioning layout and is read as-is; a newer version is refused.
pub fn decode_versioned<T: DeserializeOwned>(raw: &str, current: u32) -> Result<T> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|err| persistence("invalid stored json", err))?;

    let is_envelope = value
        .as_object()
        .is_some_and(|obj| obj.len() == 2 && obj.contains_key("version") && obj.contains_key("data"));
    let payload = if is_envelope {
        let envelope: Envelope =
            serde_json::from_value(value).map_err(|err| persistence("invalid record envelope", err))?;
        if envelope.version > current {
            return Err(BolaoError::Persistence(format!(
                "record version {} is newer than supported version {current}",
                envelope.version
            )));
        }
        envelope.data
    } else {
        log::debug!("reading unversioned record as legacy layout");
        value
    };

    serde_json::from_value(payload).map_err(|err| persistence("decode stored record", err))
}

/// Reads `key` and decodes it, `None` when nothing was ever stored.
pub fn load_versioned<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
    current: u32,
) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) if !raw.trim().is_empty() => decode_versioned(&raw, current).map(Some),
        _ => Ok(None),
    }
}

pub fn save_versioned<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    version: u32,
    data: &T,
) -> Result<()> {
    let raw = encode_versioned(version, data)?;
    store.set(key, &raw)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn envelope_round_trips_current_version() {
        let mut data = BTreeMap::new();
        data.insert("1".to_string(), 2u32);
        let raw = encode_versioned(1, &data).unwrap();
        assert!(raw.starts_with("{\"version\":1"));
        let back: BTreeMap<String, u32> = decode_versioned(&raw, 1).unwrap();
        assert_eq!(back, data);
    }

    #[test]
    fn newer_version_is_refused() {
        let err = decode_versioned::<Vec<u32>>(r#"{"version":9,"data":[1]}"#, 1).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn bare_payload_reads_as_legacy() {
        let back: Vec<u32> = decode_versioned("[1,2,3]", 1).unwrap();
        assert_eq!(back, vec![1, 2, 3]);
    }

    #[test]
    fn garbage_is_a_persistence_error() {
        let err = decode_versioned::<Vec<u32>>("{not json", 1).unwrap_err();
        assert!(err.is_persistence());
    }

    #[test]
    fn sqlite_store_upserts() {
        let store = SqliteStore::open_in_memory().unwrap();
        assert_eq!(store.get("pools").unwrap(), None);
        store.set("pools", "[]").unwrap();
        store.set("pools", "[1]").unwrap();
        assert_eq!(store.get("pools").unwrap().as_deref(), Some("[1]"));
    }
}
