use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use bolao_terminal::kv_store::{JsonFileStore, KvStore, SqliteStore};
use bolao_terminal::picks::{Outcome, PickLedger};
use bolao_terminal::pools::PoolStore;

fn scratch_dir(tag: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("bolao_terminal_{tag}_{}_{nanos}", std::process::id()))
}

#[test]
fn json_store_writes_one_file_per_key() {
    let dir = scratch_dir("json");
    let store = JsonFileStore::new(&dir);
    assert_eq!(store.get("pools").unwrap(), None);

    store.set("pools", "[]").unwrap();
    store.set("pools", "[1]").unwrap();
    assert_eq!(store.get("pools").unwrap().as_deref(), Some("[1]"));
    assert!(dir.join("pools.json").exists());
    assert!(!dir.join("pools.json.tmp").exists());

    store.set("../escape", "x").unwrap();
    assert!(dir.join("___escape.json").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn data_survives_reopen_on_disk_backends() {
    let dir = scratch_dir("reopen");

    {
        let store = Arc::new(JsonFileStore::new(&dir));
        let mut pools = PoolStore::load(store.clone()).unwrap();
        pools.create("Friends League").unwrap();
        let mut ledger = PickLedger::load(store).unwrap();
        ledger.record_pick("123", Outcome::AwayWin).unwrap();
    }
    let store = Arc::new(JsonFileStore::new(&dir));
    assert_eq!(PoolStore::load(store.clone()).unwrap().list()[0].name, "Friends League");
    assert_eq!(
        PickLedger::load(store).unwrap().pick("123"),
        Some(Outcome::AwayWin)
    );

    let db = dir.join("kv.sqlite");
    {
        let store = Arc::new(SqliteStore::open(&db).unwrap());
        PickLedger::load(store)
            .unwrap()
            .record_pick("7", Outcome::Draw)
            .unwrap();
    }
    let store = Arc::new(SqliteStore::open(&db).unwrap());
    assert_eq!(PickLedger::load(store).unwrap().pick("7"), Some(Outcome::Draw));

    let _ = fs::remove_dir_all(&dir);
}
