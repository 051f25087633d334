use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BolaoError, Result};
use crate::kv_store::{SharedStore, load_versioned, save_versioned};

pub const POOLS_KEY: &str = "pools";
const POOLS_VERSION: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolStatus {
    #[serde(alias = "ativo")]
    Active,
    #[serde(alias = "finalizado")]
    Finished,
}

impl PoolStatus {
    pub fn label(self) -> &'static str {
        match self {
            PoolStatus::Active => "Active",
            PoolStatus::Finished => "Finished",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,
    pub name: String,
    pub participants: u32,
    pub status: PoolStatus,
}

/// Locally created prediction pools, newest first. Every mutation rewrites
/// the whole collection and only lands in memory once the write succeeded.
pub struct PoolStore {
    store: SharedStore,
    pools: Vec<Pool>,
    last_issued: i64,
}

impl PoolStore {
    pub fn load(store: SharedStore) -> Result<Self> {
        let pools: Vec<Pool> = load_versioned(store.as_ref(), POOLS_KEY, POOLS_VERSION)?
            .unwrap_or_default();
        let last_issued = pools
            .iter()
            .filter_map(|pool| pool.id.parse::<i64>().ok())
            .max()
            .unwrap_or(0);
        log::debug!("loaded {} pools", pools.len());
        Ok(Self {
            store,
            pools,
            last_issued,
        })
    }

    pub fn list(&self) -> &[Pool] {
        &self.pools
    }

    pub fn get(&self, id: &str) -> Option<&Pool> {
        self.pools.iter().find(|pool| pool.id == id)
    }

    pub fn create(&mut self, name: &str) -> Result<&[Pool]> {
        self.create_at(name, Utc::now())
    }

    pub fn create_at(&mut self, name: &str, now: DateTime<Utc>) -> Result<&[Pool]> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BolaoError::Validation("pool name is required".to_string()));
        }

        let id = self.next_id(now.timestamp_millis());
        let pool = Pool {
            id: id.to_string(),
            name: name.to_string(),
            participants: 1,
            status: PoolStatus::Active,
        };

        let mut updated = Vec::with_capacity(self.pools.len() + 1);
        updated.push(pool);
        updated.extend(self.pools.iter().cloned());
        self.commit(updated)?;
        self.last_issued = id;
        log::info!("created pool {id} ({name})");
        Ok(&self.pools)
    }

    /// Removing an unknown id is a no-op and does not touch storage.
    pub fn delete(&mut self, id: &str) -> Result<&[Pool]> {
        if self.get(id).is_none() {
            return Ok(&self.pools);
        }
        let updated = self
            .pools
            .iter()
            .filter(|pool| pool.id != id)
            .cloned()
            .collect();
        self.commit(updated)?;
        log::info!("deleted pool {id}");
        Ok(&self.pools)
    }

    pub fn finish(&mut self, id: &str) -> Result<&[Pool]> {
        if !self
            .pools
            .iter()
            .any(|pool| pool.id == id && pool.status == PoolStatus::Active)
        {
            return Ok(&self.pools);
        }
        let updated = self
            .pools
            .iter()
            .cloned()
            .map(|mut pool| {
                if pool.id == id {
                    pool.status = PoolStatus::Finished;
                }
                pool
            })
            .collect();
        self.commit(updated)?;
        log::info!("finished pool {id}");
        Ok(&self.pools)
    }

    fn commit(&mut self, updated: Vec<Pool>) -> Result<()> {
        if let Err(err) = save_versioned(self.store.as_ref(), POOLS_KEY, POOLS_VERSION, &updated) {
            log::warn!("pool write failed: {err}");
            return Err(err);
        }
        self.pools = updated;
        Ok(())
    }

    fn next_id(&self, now_millis: i64) -> i64 {
        let taken = |candidate: i64| {
            self.pools
                .iter()
                .any(|pool| pool.id == candidate.to_string())
        };
        let mut id = now_millis.max(self.last_issued.saturating_add(1));
        while taken(id) {
            id = id.saturating_add(1);
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::TimeZone;

    use super::*;
    use crate::kv_store::MemoryStore;

    #[test]
    fn same_millisecond_creates_get_distinct_ids() {
        let mut pools = PoolStore::load(Arc::new(MemoryStore::new())).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        pools.create_at("One", now).unwrap();
        pools.create_at("Two", now).unwrap();
        let ids = pools.list().iter().map(|p| p.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(pools.list()[0].name, "Two");
    }

    #[test]
    fn names_are_trimmed() {
        let mut pools = PoolStore::load(Arc::new(MemoryStore::new())).unwrap();
        pools.create("  Office  ").unwrap();
        assert_eq!(pools.list()[0].name, "Office");
    }

    #[test]
    fn finish_flips_status_once() {
        let mut pools = PoolStore::load(Arc::new(MemoryStore::new())).unwrap();
        pools.create("Office").unwrap();
        let id = pools.list()[0].id.clone();
        pools.finish(&id).unwrap();
        assert_eq!(pools.get(&id).map(|p| p.status), Some(PoolStatus::Finished));
        pools.finish("missing").unwrap();
        assert_eq!(pools.list().len(), 1);
    }
}
