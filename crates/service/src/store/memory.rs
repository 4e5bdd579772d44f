use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::StoreError;
use crate::record::{ListRecord, RecordId};
use crate::store::Store;

/// In-memory store with sequential integer keys. Used by the `memory`
/// backend, local demos, and the HTTP tests; not durable.
#[derive(Default)]
pub struct MemStore {
    inner: Mutex<MemState>,
}

#[derive(Default)]
struct MemState {
    rows: BTreeMap<i32, String>,
    next_id: i32,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemStore {
    type Key = i32;

    async fn insert(&self, text: &str) -> Result<ListRecord, StoreError> {
        let mut state = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;
        state.next_id += 1;
        let id = state.next_id;
        state.rows.insert(id, text.to_owned());
        Ok(ListRecord { id: RecordId::Sequential(id), text: text.to_owned() })
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        let state = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;
        Ok(state
            .rows
            .iter()
            .map(|(id, text)| ListRecord { id: RecordId::Sequential(*id), text: text.clone() })
            .collect())
    }

    async fn find_by_id(&self, key: &i32) -> Result<Option<ListRecord>, StoreError> {
        let state = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;
        Ok(state
            .rows
            .get(key)
            .map(|text| ListRecord { id: RecordId::Sequential(*key), text: text.clone() }))
    }

    async fn update_by_id(&self, key: &i32, text: &str) -> Result<Option<ListRecord>, StoreError> {
        let mut state = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;
        match state.rows.get_mut(key) {
            Some(slot) => {
                *slot = text.to_owned();
                Ok(Some(ListRecord { id: RecordId::Sequential(*key), text: text.to_owned() }))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, key: &i32) -> Result<u64, StoreError> {
        let mut state = self.inner.lock().map_err(|e| StoreError(e.to_string()))?;
        Ok(state.rows.remove(key).map(|_| 1).unwrap_or(0))
    }
}

/// In-memory store with ObjectId keys, mirroring the document backend's
/// identifier scheme without a running MongoDB. Insertion-ordered.
#[derive(Default)]
pub struct OpaqueMemStore {
    rows: Mutex<Vec<(ObjectId, String)>>,
}

impl OpaqueMemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for OpaqueMemStore {
    type Key = ObjectId;

    async fn insert(&self, text: &str) -> Result<ListRecord, StoreError> {
        let mut rows = self.rows.lock().map_err(|e| StoreError(e.to_string()))?;
        let oid = ObjectId::new();
        rows.push((oid, text.to_owned()));
        Ok(ListRecord { id: RecordId::Opaque(oid.to_hex()), text: text.to_owned() })
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        let rows = self.rows.lock().map_err(|e| StoreError(e.to_string()))?;
        Ok(rows
            .iter()
            .map(|(oid, text)| ListRecord { id: RecordId::Opaque(oid.to_hex()), text: text.clone() })
            .collect())
    }

    async fn find_by_id(&self, key: &ObjectId) -> Result<Option<ListRecord>, StoreError> {
        let rows = self.rows.lock().map_err(|e| StoreError(e.to_string()))?;
        Ok(rows
            .iter()
            .find(|(oid, _)| oid == key)
            .map(|(oid, text)| ListRecord { id: RecordId::Opaque(oid.to_hex()), text: text.clone() }))
    }

    async fn update_by_id(&self, key: &ObjectId, text: &str) -> Result<Option<ListRecord>, StoreError> {
        let mut rows = self.rows.lock().map_err(|e| StoreError(e.to_string()))?;
        match rows.iter_mut().find(|(oid, _)| oid == key) {
            Some((oid, slot)) => {
                *slot = text.to_owned();
                Ok(Some(ListRecord { id: RecordId::Opaque(oid.to_hex()), text: text.to_owned() }))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, key: &ObjectId) -> Result<u64, StoreError> {
        let mut rows = self.rows.lock().map_err(|e| StoreError(e.to_string()))?;
        let before = rows.len();
        rows.retain(|(oid, _)| oid != key);
        Ok((before - rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mem_store_assigns_increasing_keys() {
        let store = MemStore::new();
        let a = store.insert("first").await.unwrap();
        let b = store.insert("second").await.unwrap();
        assert_eq!(a.id, RecordId::Sequential(1));
        assert_eq!(b.id, RecordId::Sequential(2));
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn mem_store_delete_reports_matched_count() {
        let store = MemStore::new();
        store.insert("row").await.unwrap();
        assert_eq!(store.delete_by_id(&1).await.unwrap(), 1);
        assert_eq!(store.delete_by_id(&1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn opaque_mem_store_round_trips_hex_keys() {
        let store = OpaqueMemStore::new();
        let created = store.insert("doc").await.unwrap();
        let RecordId::Opaque(hex) = &created.id else { panic!("opaque key expected") };
        let key = ObjectId::parse_str(hex).unwrap();
        assert_eq!(store.find_by_id(&key).await.unwrap(), Some(created));
        assert_eq!(store.delete_by_id(&key).await.unwrap(), 1);
        assert_eq!(store.find_by_id(&key).await.unwrap(), None);
    }
}
