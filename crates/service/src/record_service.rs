use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::{ServiceError, ValidationError};
use crate::id_scheme::IdScheme;
use crate::record::{ListItemInput, ListRecord};
use crate::store::Store;

/// Check the `list` field of an incoming body and return the trimmed text to
/// persist. Presence and string-typing are explicit checks here; the field
/// arrives as a raw JSON value.
pub fn validate_text(input: &ListItemInput) -> Result<String, ValidationError> {
    match &input.list {
        None | Some(serde_json::Value::Null) => Err(ValidationError::Required),
        Some(serde_json::Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Err(ValidationError::Required)
            } else if trimmed.chars().count() > 200 {
                Err(ValidationError::Invalid)
            } else {
                Ok(trimmed.to_owned())
            }
        }
        Some(_) => Err(ValidationError::Invalid),
    }
}

/// The CRUD contract over one store and one identifier scheme. Stateless per
/// request; the only held state is the injected store handle. Every operation
/// validates before it acts, so client faults never reach the store.
pub struct RecordService<I: IdScheme, S: Store<Key = I::Key>> {
    store: S,
    _scheme: PhantomData<I>,
}

impl<I: IdScheme, S: Store<Key = I::Key>> RecordService<I, S> {
    pub fn new(store: S) -> Self {
        Self { store, _scheme: PhantomData }
    }

    pub async fn create(&self, input: &ListItemInput) -> Result<ListRecord, ServiceError> {
        let text = validate_text(input)?;
        let created = self.store.insert(&text).await?;
        debug!(scheme = I::NAME, "record created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<ListRecord>, ServiceError> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, raw_id: &str) -> Result<ListRecord, ServiceError> {
        let key = I::parse(raw_id).ok_or(ServiceError::InvalidIdentifier)?;
        self.store.find_by_id(&key).await?.ok_or(ServiceError::NotFound)
    }

    /// Identifier format is checked before the body, so a request that is
    /// wrong on both counts reports the identifier error.
    pub async fn update(&self, raw_id: &str, input: &ListItemInput) -> Result<ListRecord, ServiceError> {
        let key = I::parse(raw_id).ok_or(ServiceError::InvalidIdentifier)?;
        let text = validate_text(input)?;
        self.store.update_by_id(&key, &text).await?.ok_or(ServiceError::NotFound)
    }

    pub async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        let key = I::parse(raw_id).ok_or(ServiceError::InvalidIdentifier)?;
        let matched = self.store.delete_by_id(&key).await?;
        if matched == 0 {
            return Err(ServiceError::NotFound);
        }
        debug!(scheme = I::NAME, id = raw_id, "record deleted");
        Ok(())
    }
}

/// Object-safe view of [`RecordService`], keyed by the raw identifier string.
/// The HTTP layer holds an `Arc<dyn RecordApi>`; the concrete scheme/store
/// pair is chosen once during startup.
#[async_trait]
pub trait RecordApi: Send + Sync {
    async fn create(&self, input: &ListItemInput) -> Result<ListRecord, ServiceError>;
    async fn list(&self) -> Result<Vec<ListRecord>, ServiceError>;
    async fn get(&self, raw_id: &str) -> Result<ListRecord, ServiceError>;
    async fn update(&self, raw_id: &str, input: &ListItemInput) -> Result<ListRecord, ServiceError>;
    async fn delete(&self, raw_id: &str) -> Result<(), ServiceError>;
}

#[async_trait]
impl<I, S> RecordApi for RecordService<I, S>
where
    I: IdScheme,
    S: Store<Key = I::Key>,
{
    async fn create(&self, input: &ListItemInput) -> Result<ListRecord, ServiceError> {
        RecordService::create(self, input).await
    }

    async fn list(&self) -> Result<Vec<ListRecord>, ServiceError> {
        RecordService::list(self).await
    }

    async fn get(&self, raw_id: &str) -> Result<ListRecord, ServiceError> {
        RecordService::get(self, raw_id).await
    }

    async fn update(&self, raw_id: &str, input: &ListItemInput) -> Result<ListRecord, ServiceError> {
        RecordService::update(self, raw_id, input).await
    }

    async fn delete(&self, raw_id: &str) -> Result<(), ServiceError> {
        RecordService::delete(self, raw_id).await
    }
}
