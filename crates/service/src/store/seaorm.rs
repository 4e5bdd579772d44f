use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use models::list_item::{self, Entity as ListEntity};

use crate::errors::StoreError;
use crate::record::{ListRecord, RecordId};
use crate::store::Store;

/// Relational store backed by SeaORM / PostgreSQL. Keys come from the
/// auto-increment primary key of the `lists` table.
pub struct SeaOrmStore {
    db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn to_record(m: list_item::Model) -> ListRecord {
    ListRecord { id: RecordId::Sequential(m.id), text: m.list }
}

fn db_err(e: sea_orm::DbErr) -> StoreError {
    StoreError(e.to_string())
}

#[async_trait]
impl Store for SeaOrmStore {
    type Key = i32;

    async fn insert(&self, text: &str) -> Result<ListRecord, StoreError> {
        let am = list_item::ActiveModel { list: Set(text.to_owned()), ..Default::default() };
        let created = am.insert(&self.db).await.map_err(db_err)?;
        Ok(to_record(created))
    }

    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError> {
        let rows = ListEntity::find()
            .order_by_asc(list_item::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(to_record).collect())
    }

    async fn find_by_id(&self, key: &i32) -> Result<Option<ListRecord>, StoreError> {
        let found = ListEntity::find_by_id(*key).one(&self.db).await.map_err(db_err)?;
        Ok(found.map(to_record))
    }

    async fn update_by_id(&self, key: &i32, text: &str) -> Result<Option<ListRecord>, StoreError> {
        let Some(existing) = ListEntity::find_by_id(*key).one(&self.db).await.map_err(db_err)? else {
            return Ok(None);
        };
        let mut am: list_item::ActiveModel = existing.into();
        am.list = Set(text.to_owned());
        let updated = am.update(&self.db).await.map_err(db_err)?;
        Ok(Some(to_record(updated)))
    }

    async fn delete_by_id(&self, key: &i32) -> Result<u64, StoreError> {
        let res = ListEntity::delete_by_id(*key).exec(&self.db).await.map_err(db_err)?;
        Ok(res.rows_affected)
    }
}
