use async_trait::async_trait;
use shared::Entity;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::traits::{EntityStorage, StorageError};

/// Process-local store that swaps in a fresh `Vec` on every mutation.
///
/// Readers hold `Arc` snapshots; a writer builds the next sequence from the
/// current one and replaces the pointer, so a snapshot taken before a change
/// still shows the old contents and can be compared by pointer.
pub struct InMemoryStore<E: Entity> {
    records: RwLock<Arc<Vec<E>>>,
    next_id: AtomicU64,
}

impl<E: Entity> InMemoryStore<E> {
    /// Seed records keep their ids; new ids continue after the largest one
    pub fn new(seed: Vec<E>) -> Self {
        let next_id = seed.iter().map(Entity::id).max().unwrap_or(0) + 1;
        Self {
            records: RwLock::new(Arc::new(seed)),
            next_id: AtomicU64::new(next_id),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<E: Entity> EntityStorage<E> for InMemoryStore<E> {
    async fn snapshot(&self) -> Arc<Vec<E>> {
        self.records.read().await.clone()
    }

    async fn get(&self, id: u64) -> Option<E> {
        self.records.read().await.iter().find(|r| r.id() == id).cloned()
    }

    async fn add(&self, mut record: E) -> E {
        let mut guard = self.records.write().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        record.set_id(id);

        let mut next = Vec::with_capacity(guard.len() + 1);
        next.extend(guard.iter().cloned());
        next.push(record.clone());
        *guard = Arc::new(next);

        debug!("Added {} {} ({} records)", E::KIND, id, guard.len());
        record
    }

    async fn update(&self, id: u64, mut record: E) -> Result<E, StorageError> {
        let mut guard = self.records.write().await;
        if !guard.iter().any(|r| r.id() == id) {
            return Err(StorageError::NotFound { entity: E::KIND, id });
        }
        record.set_id(id);

        let next: Vec<E> = guard
            .iter()
            .map(|r| if r.id() == id { record.clone() } else { r.clone() })
            .collect();
        *guard = Arc::new(next);

        debug!("Updated {} {}", E::KIND, id);
        Ok(record)
    }

    async fn remove(&self, id: u64) -> Result<E, StorageError> {
        let mut guard = self.records.write().await;
        let removed = guard
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(StorageError::NotFound { entity: E::KIND, id })?;

        let next: Vec<E> = guard.iter().filter(|r| r.id() != id).cloned().collect();
        *guard = Arc::new(next);

        debug!("Removed {} {} ({} records left)", E::KIND, id, guard.len());
        Ok(removed)
    }

    fn next_id(&self) -> u64 {
        self.next_id.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{LaundryService, ServiceStatus};

    fn service(id: u64, name: &str) -> LaundryService {
        LaundryService {
            id,
            name: name.to_string(),
            description: String::new(),
            price_per_kg: 5_000,
            estimated_time: "2 hari".to_string(),
            category: "Cuci".to_string(),
            status: ServiceStatus::Active,
        }
    }

    fn store() -> InMemoryStore<LaundryService> {
        InMemoryStore::new(vec![service(1, "Cuci Reguler"), service(4, "Setrika Saja")])
    }

    fn ids(records: &[LaundryService]) -> Vec<u64> {
        records.iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_next_id_continues_after_seed() {
        let store = store();
        assert_eq!(store.next_id(), 5);

        let added = store.add(service(0, "Dry Cleaning")).await;
        assert_eq!(added.id, 5);
        assert_eq!(store.next_id(), 6);
        assert_eq!(InMemoryStore::<LaundryService>::empty().next_id(), 1);
    }

    #[tokio::test]
    async fn test_add_appends_without_touching_old_snapshot() {
        let store = store();
        let before = store.snapshot().await;

        store.add(service(0, "Dry Cleaning")).await;
        let after = store.snapshot().await;

        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(ids(&before), vec![1, 4]);
        assert_eq!(ids(&after), vec![1, 4, 5]);
        assert_eq!(after[2].name, "Dry Cleaning");
    }

    #[tokio::test]
    async fn test_update_replaces_exactly_one_record_in_place() {
        let store = store();
        let before = store.snapshot().await;

        // A mismatched id on the record is overridden by the path id
        let updated = store.update(1, service(99, "Cuci Kilat")).await.unwrap();
        assert_eq!(updated.id, 1);

        let after = store.snapshot().await;
        assert_eq!(ids(&after), vec![1, 4]);
        assert_eq!(after[0].name, "Cuci Kilat");
        assert_eq!(after[1], before[1]);
        assert_eq!(before[0].name, "Cuci Reguler");
    }

    #[tokio::test]
    async fn test_remove_filters_out_one_record() {
        let store = store();
        let before = store.snapshot().await;

        let removed = store.remove(1).await.unwrap();
        assert_eq!(removed.name, "Cuci Reguler");
        assert_eq!(ids(&store.snapshot().await), vec![4]);
        assert_eq!(ids(&before), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_missing_id_is_not_found() {
        let store = store();
        let before = store.snapshot().await;

        let err = store.update(42, service(0, "x")).await.unwrap_err();
        assert_eq!(err, StorageError::NotFound { entity: "Laundry service", id: 42 });
        assert!(store.remove(42).await.is_err());
        assert!(store.get(42).await.is_none());

        // Failed mutations leave the sequence pointer alone
        assert!(Arc::ptr_eq(&before, &store.snapshot().await));
    }

    #[tokio::test]
    async fn test_removed_ids_are_not_reused() {
        let store = store();
        let added = store.add(service(0, "A")).await;
        store.remove(added.id).await.unwrap();
        let again = store.add(service(0, "B")).await;
        assert_eq!(again.id, added.id + 1);
    }
}
