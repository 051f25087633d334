use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bolao_terminal::error::{BolaoError, Result};
use bolao_terminal::kv_store::{KvStore, MemoryStore, SharedStore};
use bolao_terminal::pools::{POOLS_KEY, PoolStatus, PoolStore};

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl KvStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BolaoError::Persistence("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}

fn empty_store() -> SharedStore {
    Arc::new(MemoryStore::new())
}

#[test]
fn first_use_lists_nothing() {
    let pools = PoolStore::load(empty_store()).unwrap();
    assert!(pools.list().is_empty());
}

#[test]
fn create_then_delete_round_trip() {
    let store = empty_store();
    let mut pools = PoolStore::load(Arc::clone(&store)).unwrap();

    pools.create("Friends League").unwrap();
    let listed = pools.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Friends League");
    assert_eq!(listed[0].status, PoolStatus::Active);
    assert_eq!(listed[0].participants, 1);

    let reloaded = PoolStore::load(Arc::clone(&store)).unwrap();
    assert_eq!(reloaded.list(), pools.list());

    let id = pools.list()[0].id.clone();
    pools.delete(&id).unwrap();
    assert!(pools.list().is_empty());
    assert!(PoolStore::load(store).unwrap().list().is_empty());
}

#[test]
fn blank_names_are_rejected_without_changes() {
    let mut pools = PoolStore::load(empty_store()).unwrap();
    pools.create("Office").unwrap();
    let before = pools.list().to_vec();

    for name in ["", "   "] {
        let err = pools.create(name).unwrap_err();
        assert!(err.is_validation(), "{name:?}");
    }
    assert_eq!(pools.list(), before.as_slice());
}

#[test]
fn ids_are_unique_and_newest_first() {
    let mut pools = PoolStore::load(empty_store()).unwrap();
    for i in 0..25 {
        pools.create(&format!("Pool {i}")).unwrap();
    }
    let ids = pools.list().iter().map(|p| p.id.clone()).collect::<HashSet<_>>();
    assert_eq!(ids.len(), 25);
    assert_eq!(pools.list()[0].name, "Pool 24");
    assert_eq!(pools.list()[24].name, "Pool 0");
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let mut pools = PoolStore::load(empty_store()).unwrap();
    pools.create("Office").unwrap();
    let before = pools.list().to_vec();
    pools.delete("does-not-exist").unwrap();
    assert_eq!(pools.list(), before.as_slice());
}

#[test]
fn failed_write_keeps_previous_state() {
    let flaky = Arc::new(FlakyStore::default());
    let store: SharedStore = flaky.clone();
    let mut pools = PoolStore::load(Arc::clone(&store)).unwrap();
    pools.create("Kept").unwrap();

    flaky.fail_writes.store(true, Ordering::SeqCst);
    let err = pools.create("Lost").unwrap_err();
    assert!(err.is_persistence());
    assert_eq!(pools.list().len(), 1);

    let id = pools.list()[0].id.clone();
    assert!(pools.delete(&id).unwrap_err().is_persistence());
    assert_eq!(pools.list().len(), 1);

    let on_disk = PoolStore::load(store).unwrap();
    assert_eq!(on_disk.list().len(), 1);
    assert_eq!(on_disk.list()[0].name, "Kept");
}

#[test]
fn legacy_unversioned_pools_load_and_get_wrapped() {
    let store = empty_store();
    store
        .set(
            POOLS_KEY,
            r#"[{"id":"1714000000000","name":"Bolão da firma","participants":1,"status":"ativo"},
                {"id":"1713000000000","name":"Old","participants":3,"status":"finalizado"}]"#,
        )
        .unwrap();

    let mut pools = PoolStore::load(Arc::clone(&store)).unwrap();
    assert_eq!(pools.list().len(), 2);
    assert_eq!(pools.list()[0].status, PoolStatus::Active);
    assert_eq!(pools.list()[1].status, PoolStatus::Finished);

    pools.create("New").unwrap();
    assert!(pools.list()[0].id.parse::<i64>().unwrap() > 1_714_000_000_000);
    let raw = store.get(POOLS_KEY).unwrap().unwrap();
    assert!(raw.starts_with("{\"version\":1"));
    assert!(raw.contains("\"status\":\"active\""));
}

#[test]
fn newer_schema_refuses_to_load() {
    let store = empty_store();
    store.set(POOLS_KEY, r#"{"version":7,"data":[]}"#).unwrap();
    let err = PoolStore::load(store).err().expect("newer version should fail");
    assert!(err.is_persistence());
}
