use shared::{
    Entity, FormFields, FormMode, ListQuery, MutationResponse, Page, Santri, TransactionStatus, UangSakuForm,
    UangSakuKind, UangSakuTransaction,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use super::balance_service::{apply_to_balance, BalanceService};
use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// Pocket-money top-ups and withdrawals
#[derive(Clone)]
pub struct UangSakuService {
    transactions: Store<UangSakuTransaction>,
    santri: Store<Santri>,
    balances: BalanceService,
    /// Serializes check-then-insert so two withdrawals cannot both pass the
    /// balance check against the same history
    write_lock: Arc<Mutex<()>>,
}

impl UangSakuService {
    pub fn new(transactions: Store<UangSakuTransaction>, santri: Store<Santri>, balances: BalanceService) -> Self {
        Self {
            transactions,
            santri,
            balances,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn list_transactions(&self, query: &ListQuery) -> Page<UangSakuTransaction> {
        info!("Listing uang saku transactions: {:?}", query);
        shared::list_page(&self.transactions.snapshot().await, query)
    }

    pub async fn get_transaction(&self, transaction_id: u64) -> AdminResult<UangSakuTransaction> {
        self.transactions.get(transaction_id).await.ok_or_else(|| {
            warn!("Uang saku transaction not found: {}", transaction_id);
            AdminError::NotFound { entity: UangSakuTransaction::KIND, id: transaction_id }
        })
    }

    /// Record a top-up or withdrawal. A completed withdrawal may not take the
    /// balance below zero, and a completed top-up may not push it past what an
    /// `i64` can hold.
    pub async fn create_transaction(&self, form: UangSakuForm) -> AdminResult<MutationResponse<UangSakuTransaction>> {
        info!("Creating uang saku transaction: santri={}, kind={}, amount={}", form.santri_id, form.kind, form.amount);

        let draft = form.validate(FormMode::Add)?;
        let santri = self
            .santri
            .get(draft.santri_id)
            .await
            .ok_or_else(|| AdminError::field("santri_id", "Santri tidak ditemukan"))?;

        let _guard = self.write_lock.lock().await;
        if draft.status == TransactionStatus::Completed {
            let balance = self.balances.balance_of(santri.id).await?;
            match draft.kind {
                UangSakuKind::Withdrawal if draft.amount > balance => {
                    warn!(
                        "Withdrawal of {} rejected for santri {}: balance {}",
                        draft.amount, santri.id, balance
                    );
                    return Err(AdminError::InsufficientBalance { balance, requested: draft.amount });
                }
                UangSakuKind::Topup => {
                    apply_to_balance(balance, santri.id, draft.amount)?;
                }
                UangSakuKind::Withdrawal => {}
            }
        }

        let transaction = self
            .transactions
            .add(UangSakuTransaction {
                id: 0,
                santri_id: santri.id,
                santri_name: santri.name,
                description: draft.description,
                amount: draft.amount,
                kind: draft.kind,
                status: draft.status,
                date: draft.date,
            })
            .await;

        info!("Created uang saku transaction {} for {}", transaction.id, transaction.santri_name);
        let success_message = match transaction.kind {
            UangSakuKind::Topup => "Top up uang saku berhasil dicatat",
            UangSakuKind::Withdrawal => "Penarikan uang saku berhasil dicatat",
        };
        Ok(MutationResponse {
            item: transaction,
            success_message: success_message.to_string(),
        })
    }

    pub async fn delete_transaction(&self, transaction_id: u64) -> AdminResult<UangSakuTransaction> {
        info!("Deleting uang saku transaction: {}", transaction_id);
        let _guard = self.write_lock.lock().await;
        Ok(self.transactions.remove(transaction_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{memory_store, SampleSeed, SeedProvider};

    fn setup_test() -> UangSakuService {
        let seed = SampleSeed;
        let transactions = memory_store(seed.uang_saku_transactions());
        let santri = memory_store(seed.santri());
        let balances = BalanceService::new(transactions.clone(), santri.clone());
        UangSakuService::new(transactions, santri, balances)
    }

    fn form(santri_id: u64, kind: &str, amount: &str) -> UangSakuForm {
        UangSakuForm {
            santri_id: santri_id.to_string(),
            description: "Jajan".to_string(),
            amount: amount.to_string(),
            kind: kind.to_string(),
            status: String::new(),
            date: "2024-02-01".to_string(),
        }
    }

    #[tokio::test]
    async fn test_topup_snapshots_santri_name() {
        let service = setup_test();
        let response = service.create_transaction(form(5, "topup", "75.000")).await.unwrap();
        assert_eq!(response.item.id, 7);
        assert_eq!(response.item.santri_name, "Abdullah Hakim");
        assert_eq!(response.item.amount, 75_000);
        assert_eq!(response.success_message, "Top up uang saku berhasil dicatat");
    }

    #[tokio::test]
    async fn test_withdrawal_within_balance() {
        let service = setup_test();
        let response = service.create_transaction(form(1, "withdrawal", "150000")).await.unwrap();
        assert_eq!(response.item.kind, UangSakuKind::Withdrawal);
        assert_eq!(service.balances.balance_of(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_withdrawal_over_balance_is_rejected() {
        let service = setup_test();
        let err = service.create_transaction(form(1, "withdrawal", "150001")).await.unwrap_err();
        assert!(matches!(
            err,
            AdminError::InsufficientBalance { balance: 150_000, requested: 150_001 }
        ));
        assert_eq!(service.list_transactions(&ListQuery::default()).await.total_items, 6);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_withdrawals_cannot_overdraw() {
        let service = setup_test();
        let first = service.clone();
        let second = service.clone();

        let (a, b) = tokio::join!(
            tokio::spawn(async move { first.create_transaction(form(1, "withdrawal", "150000")).await }),
            tokio::spawn(async move { second.create_transaction(form(1, "withdrawal", "150000")).await }),
        );
        let results = [a.unwrap(), b.unwrap()];

        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results
            .iter()
            .any(|r| matches!(r, Err(AdminError::InsufficientBalance { balance: 0, requested: 150_000 }))));
        assert_eq!(service.balances.balance_of(1).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_topup_that_would_overflow_is_rejected() {
        let seed = SampleSeed;
        let transactions = memory_store(seed.uang_saku_transactions());
        let santri = memory_store(seed.santri());
        let service = UangSakuService::new(
            transactions.clone(),
            santri.clone(),
            BalanceService::new(transactions.clone(), santri),
        );

        let mut huge = seed.uang_saku_transactions()[0].clone();
        huge.santri_id = 5;
        huge.amount = i64::MAX - 10;
        transactions.add(huge).await;

        let err = service.create_transaction(form(5, "topup", "1000")).await.unwrap_err();
        assert!(matches!(err, AdminError::BalanceOverflow { santri_id: 5 }));
    }

    #[tokio::test]
    async fn test_pending_withdrawal_skips_balance_check() {
        let service = setup_test();
        let mut pending = form(6, "withdrawal", "10000");
        pending.status = "Pending".to_string();
        assert!(service.create_transaction(pending).await.is_ok());
    }

    #[tokio::test]
    async fn test_unknown_santri_is_field_error() {
        let service = setup_test();
        let err = service.create_transaction(form(42, "topup", "1000")).await.unwrap_err();
        match err {
            AdminError::Validation(errors) => assert_eq!(errors.get("santri_id"), Some("Santri tidak ditemukan")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_changes_balance() {
        let service = setup_test();
        let removed = service.delete_transaction(2).await.unwrap();
        assert_eq!(removed.description, "Jajan kantin");
        assert_eq!(service.balances.balance_of(1).await.unwrap(), 200_000);
        assert!(service.get_transaction(2).await.is_err());
    }

    #[tokio::test]
    async fn test_search_by_description() {
        let service = setup_test();
        let query = ListQuery {
            search: Some("kiriman".to_string()),
            ..Default::default()
        };
        let ids: Vec<u64> = service.list_transactions(&query).await.items.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
    }
}
