//! Core CRUD contract for list records.
//! - Validates request payloads and external identifiers before any store access.
//! - Polymorphic over the identifier scheme and the store backend, both fixed
//!   once at process configuration time.
//! - Maps store absence and zero-row results onto a single `NotFound`.

pub mod errors;
pub mod id_scheme;
pub mod record;
pub mod record_service;
pub mod store;

#[cfg(test)]
mod test_support;

pub use record::{ListItemInput, ListRecord, RecordId};
pub use record_service::{RecordApi, RecordService};
