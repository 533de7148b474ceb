//! # Storage Module
//!
//! Process-local storage for the admin dashboard. Nothing here survives a
//! restart; each store is seeded once at startup by a [`SeedProvider`].

pub mod memory;
pub mod seed;
pub mod traits;

use shared::Entity;
use std::sync::Arc;

pub use memory::InMemoryStore;
pub use seed::{EmptySeed, SampleSeed, SeedProvider};
pub use traits::{EntityStorage, StorageError};

/// Shared handle to a store, cloned into every service that reads it
pub type Store<E> = Arc<dyn EntityStorage<E>>;

pub fn memory_store<E: Entity>(records: Vec<E>) -> Store<E> {
    Arc::new(InMemoryStore::new(records))
}
