use async_trait::async_trait;

use crate::errors::StoreError;
use crate::record::ListRecord;

pub mod memory;
pub mod mongo;
pub mod seaorm;

/// Durable keyed storage for list records. One adapter per datastore family,
/// all exposing the same five operations with the family's native key type.
#[async_trait]
pub trait Store: Send + Sync + 'static {
    type Key: Clone + std::fmt::Debug + Send + Sync + 'static;

    /// Persist a new record; the store assigns the identifier.
    async fn insert(&self, text: &str) -> Result<ListRecord, StoreError>;

    /// All records, in insertion (or key) order.
    async fn find_all(&self) -> Result<Vec<ListRecord>, StoreError>;

    /// `None` when no record matches the key.
    async fn find_by_id(&self, key: &Self::Key) -> Result<Option<ListRecord>, StoreError>;

    /// Replace the text of a matching record; `None` when nothing matched.
    async fn update_by_id(&self, key: &Self::Key, text: &str) -> Result<Option<ListRecord>, StoreError>;

    /// Remove a matching record, returning the matched count.
    async fn delete_by_id(&self, key: &Self::Key) -> Result<u64, StoreError>;
}
