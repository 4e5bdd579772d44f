use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};
use serde::{Deserialize, Serialize};

use crate::errors::StoreError;
use crate::record::{ListRecord, RecordId};
use crate::store::Store;

/// Persisted document shape. `_id` is absent on insert so the server
/// assigns it.
#[derive(Debug, Serialize, Deserialize)]
struct ListItemDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    id: Option<ObjectId>,
    list: String,
}

/// Document store backed by the official MongoDB driver. Keys are ObjectIds,
/// rendered as 24-hex strings on the wire.
pub struct MongoStore {
    collection: Collection<ListItemDocument>,
}

impl MongoStore {
    /// Connect and ping the deployment. A failed ping is fatal to startup;
    /// the process must not begin serving against an unreachable store.
    pub async fn connect(url: &str, database: &str, collection: &str) -> anyhow::Result<Self> {
        let options = ClientOptions::parse(url).await?;
        let client = Client::with_options(options)?;
        let db = client.database(database);
        db.run_command(doc! {"ping": 1}, None).await?;
        Ok(Self { collection: db.collection::<ListItemDocument>(collection) })
    }
}

fn to_record(d: ListItemDocument) -> Result<ListRecord, StoreError> {
    let oid = d.id.ok_or_else(|| StoreError("document missing _id".into()))?;
    Ok(ListRecord { id: RecordId::Opaque(oid.to_hex()), text: d.list })
}

fn drv_err(e: mongodb::error::Error) -> StoreError {
    StoreError(e.to_string())
}

#[async_trait]
impl Store for MongoStore {
    type Key = ObjectId;

    async fn insert(&self, text: &str) -> Result<ListRecord, StoreError> {
        let doc = ListItemDocument { id: None, list: text.to_owned() };
        let res = self.collection.insert_one(&doc, None).await.map_err(drv_err)?;
        let oid = res
            .inserted_id
            .as_object_id()
            .ok_or_else(|| StoreError("inserted_id is not an ObjectId".into()))?;
        Ok(ListRecord { id: RecordId::Opaque(oid.to_hex()), text: doc.list })
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        let mut cursor = self.collection.find(doc! {}, None).await.map_err(drv_err)?;
        let mut records = Vec::new();
        while let Some(d) = cursor.try_next().await.map_err(drv_err)? {
            records.push(to_record(d)?);
        }
        Ok(records)
    }

    async fn find_by_id(&self, key: &ObjectId) -> Result<Option<ListRecord>, StoreError> {
        let found = self.collection.find_one(doc! {"_id": *key}, None).await.map_err(drv_err)?;
        found.map(to_record).transpose()
    }

    async fn update_by_id(&self, key: &ObjectId, text: &str) -> Result<Option<ListRecord>, StoreError> {
        let res = self
            .collection
            .update_one(doc! {"_id": *key}, doc! {"$set": {"list": text}}, None)
            .await
            .map_err(drv_err)?;
        if res.matched_count == 0 {
            return Ok(None);
        }
        // Re-read for the response body; a concurrent delete in this window
        // surfaces as NotFound, which is the accepted last-writer outcome.
        self.find_by_id(key).await
    }

    async fn delete_by_id(&self, key: &ObjectId) -> Result<u64, StoreError> {
        let res = self.collection.delete_one(doc! {"_id": *key}, None).await.map_err(drv_err)?;
        Ok(res.deleted_count)
    }
}
