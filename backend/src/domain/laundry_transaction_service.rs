//! Laundry orders.
//!
//! A submitted order only names the santri and the service by id. The service
//! resolves both, snapshots their display names onto the transaction and
//! prices the order from the service's current rate.

use shared::{
    Entity, FieldErrors, FormFields, FormMode, LaundryService, LaundryTransaction, LaundryTransactionDraft,
    LaundryTransactionForm, ListQuery, MutationResponse, Page, Santri, ServiceStatus,
};
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// `price_per_kg × weight`, rounded to whole rupiah
pub fn laundry_price(price_per_kg: i64, weight_kg: f64) -> i64 {
    (price_per_kg as f64 * weight_kg).round() as i64
}

#[derive(Clone)]
pub struct LaundryTransactionService {
    transactions: Store<LaundryTransaction>,
    santri: Store<Santri>,
    services: Store<LaundryService>,
}

impl LaundryTransactionService {
    pub fn new(
        transactions: Store<LaundryTransaction>,
        santri: Store<Santri>,
        services: Store<LaundryService>,
    ) -> Self {
        Self { transactions, santri, services }
    }

    pub async fn list_transactions(&self, query: &ListQuery) -> Page<LaundryTransaction> {
        info!("Listing laundry transactions: {:?}", query);
        shared::list_page(&self.transactions.snapshot().await, query)
    }

    pub async fn get_transaction(&self, transaction_id: u64) -> AdminResult<LaundryTransaction> {
        self.transactions.get(transaction_id).await.ok_or_else(|| {
            warn!("Laundry transaction not found: {}", transaction_id);
            AdminError::NotFound { entity: LaundryTransaction::KIND, id: transaction_id }
        })
    }

    pub async fn create_transaction(
        &self,
        form: LaundryTransactionForm,
    ) -> AdminResult<MutationResponse<LaundryTransaction>> {
        info!("Creating laundry transaction: santri={}, service={}", form.santri_id, form.service_id);

        let draft = form.validate(FormMode::Add)?;
        let transaction = self.resolve(draft, None).await?;
        let transaction = self.transactions.add(transaction).await;

        info!(
            "Created laundry transaction {} for {}: {} kg {} = {}",
            transaction.id, transaction.santri_name, transaction.weight_kg, transaction.service_name, transaction.total_price
        );
        Ok(MutationResponse {
            item: transaction,
            success_message: "Transaksi laundry berhasil ditambahkan".to_string(),
        })
    }

    pub async fn update_transaction(
        &self,
        transaction_id: u64,
        form: LaundryTransactionForm,
    ) -> AdminResult<MutationResponse<LaundryTransaction>> {
        info!("Updating laundry transaction: {}", transaction_id);

        let existing = self.get_transaction(transaction_id).await?;
        let draft = form.validate(FormMode::Edit(transaction_id))?;
        let transaction = self.resolve(draft, Some(&existing)).await?;
        let transaction = self.transactions.update(transaction_id, transaction).await?;

        Ok(MutationResponse {
            item: transaction,
            success_message: "Transaksi laundry berhasil diperbarui".to_string(),
        })
    }

    pub async fn delete_transaction(&self, transaction_id: u64) -> AdminResult<LaundryTransaction> {
        info!("Deleting laundry transaction: {}", transaction_id);
        Ok(self.transactions.remove(transaction_id).await?)
    }

    /// Look up the referenced santri and service and price the order.
    /// An inactive service may only stay on an order that already used it.
    async fn resolve(
        &self,
        draft: LaundryTransactionDraft,
        existing: Option<&LaundryTransaction>,
    ) -> AdminResult<LaundryTransaction> {
        let mut errors = FieldErrors::new();

        let santri = self.santri.get(draft.santri_id).await;
        if santri.is_none() {
            errors.add("santri_id", "Santri tidak ditemukan");
        }

        let service = self.services.get(draft.service_id).await;
        match &service {
            None => errors.add("service_id", "Layanan laundry tidak ditemukan"),
            Some(s) if s.status == ServiceStatus::Inactive => {
                let unchanged = existing.map_or(false, |tx| tx.service_id == s.id);
                if !unchanged {
                    errors.add("service_id", format!("Layanan {} sedang tidak aktif", s.name));
                }
            }
            Some(_) => {}
        }

        match (santri, service) {
            (Some(santri), Some(service)) if errors.is_empty() => Ok(LaundryTransaction {
                id: existing.map_or(0, |tx| tx.id),
                santri_id: santri.id,
                santri_name: santri.name,
                santri_class: santri.class_name,
                service_id: service.id,
                service_name: service.name,
                weight_kg: draft.weight_kg,
                total_price: laundry_price(service.price_per_kg, draft.weight_kg),
                date: draft.date,
                status: draft.status,
                payment_method: draft.payment_method,
            }),
            _ => Err(AdminError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{memory_store, SampleSeed, SeedProvider};
    use shared::{PaymentMethod, TransactionStatus};

    fn setup_test() -> LaundryTransactionService {
        let seed = SampleSeed;
        LaundryTransactionService::new(
            memory_store(seed.laundry_transactions()),
            memory_store(seed.santri()),
            memory_store(seed.laundry_services()),
        )
    }

    fn form(santri_id: &str, service_id: &str, weight: &str) -> LaundryTransactionForm {
        LaundryTransactionForm {
            santri_id: santri_id.to_string(),
            service_id: service_id.to_string(),
            weight: weight.to_string(),
            date: "2024-02-01".to_string(),
            status: String::new(),
            payment_method: "Cash".to_string(),
        }
    }

    #[test]
    fn test_laundry_price_rounds_to_rupiah() {
        assert_eq!(laundry_price(7_000, 2.5), 17_500);
        assert_eq!(laundry_price(5_000, 1.33), 6_650);
        assert_eq!(laundry_price(15_000, 0.333), 4_995);
    }

    #[tokio::test]
    async fn test_create_resolves_names_and_price() {
        let service = setup_test();
        let created = service.create_transaction(form("4", "3", "2,5")).await.unwrap().item;

        assert_eq!(created.id, 5);
        assert_eq!(created.santri_name, "Fatimah Zahra");
        assert_eq!(created.santri_class, "XI");
        assert_eq!(created.service_name, "Dry Cleaning");
        assert_eq!(created.total_price, 37_500);
        assert_eq!(created.status, TransactionStatus::Pending);
        assert_eq!(created.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_unknown_references_are_field_errors() {
        let service = setup_test();
        let err = service.create_transaction(form("99", "98", "1")).await.unwrap_err();
        match err {
            AdminError::Validation(errors) => {
                assert_eq!(errors.get("santri_id"), Some("Santri tidak ditemukan"));
                assert_eq!(errors.get("service_id"), Some("Layanan laundry tidak ditemukan"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_inactive_service_rejected_for_new_orders() {
        let service = setup_test();
        let err = service.create_transaction(form("1", "4", "1")).await.unwrap_err();
        match err {
            AdminError::Validation(errors) => {
                assert_eq!(errors.get("service_id"), Some("Layanan Setrika Saja sedang tidak aktif"))
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_reprices_from_service() {
        let service = setup_test();
        let mut fields = LaundryTransactionForm::from_source(&service.get_transaction(1).await.unwrap());
        fields.weight = "5".to_string();
        fields.status = "Completed".to_string();

        let updated = service.update_transaction(1, fields).await.unwrap().item;
        assert_eq!(updated.id, 1);
        assert_eq!(updated.total_price, 25_000);
        assert_eq!(updated.status, TransactionStatus::Completed);
    }

    #[tokio::test]
    async fn test_search_and_delete() {
        let service = setup_test();
        let query = ListQuery {
            search: Some("cuci reguler".to_string()),
            ..Default::default()
        };
        let ids: Vec<u64> = service.list_transactions(&query).await.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 4]);

        service.delete_transaction(4).await.unwrap();
        assert!(service.get_transaction(4).await.is_err());
        assert!(matches!(
            service.delete_transaction(4).await,
            Err(AdminError::NotFound { id: 4, .. })
        ));
    }
}
