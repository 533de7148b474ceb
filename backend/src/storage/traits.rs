//! # Storage Traits
//!
//! The storage abstraction every domain service talks to. A store owns one
//! ordered sequence of records and never mutates a sequence it has already
//! handed out: every change produces a new sequence.

use async_trait::async_trait;
use shared::Entity;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },
}

/// Ordered, id-addressed collection of one entity type
#[async_trait]
pub trait EntityStorage<E: Entity>: Send + Sync {
    /// The current sequence; later mutations never touch it
    async fn snapshot(&self) -> Arc<Vec<E>>;

    /// Look up a single record by id
    async fn get(&self, id: u64) -> Option<E>;

    /// Assign the next id to `record` and append it
    async fn add(&self, record: E) -> E;

    /// Replace the record with `id`, keeping its position.
    /// The stored record always carries `id`, whatever `record.id()` says.
    async fn update(&self, id: u64, record: E) -> Result<E, StorageError>;

    /// Drop the record with `id`, returning it
    async fn remove(&self, id: u64) -> Result<E, StorageError>;

    /// The id the next `add` will assign
    fn next_id(&self) -> u64;
}
