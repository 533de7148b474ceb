//! Uang Saku balances.
//!
//! There is no stored balance: it is recomputed from the transaction history
//! on every read as completed top-ups minus completed withdrawals. Sums are
//! checked; a history that leaves the `i64` range is reported as
//! [`AdminError::BalanceOverflow`] instead of wrapping.

use shared::{Entity, Santri, UangSakuTransaction};
use std::collections::HashMap;
use tracing::{debug, error, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

/// Current balance of one santri
#[derive(Debug, Clone, PartialEq)]
pub struct SantriBalance {
    pub santri: Santri,
    pub balance: i64,
}

#[derive(Clone)]
pub struct BalanceService {
    transactions: Store<UangSakuTransaction>,
    santri: Store<Santri>,
}

/// Add one movement to a running balance
pub fn apply_to_balance(balance: i64, santri_id: u64, delta: i64) -> AdminResult<i64> {
    balance.checked_add(delta).ok_or_else(|| {
        error!("Balance overflow for santri {}", santri_id);
        AdminError::BalanceOverflow { santri_id }
    })
}

/// Sum the effect of every transaction per santri
pub fn balances_from_history(history: &[UangSakuTransaction]) -> AdminResult<HashMap<u64, i64>> {
    let mut balances = HashMap::new();
    for tx in history {
        let balance = balances.entry(tx.santri_id).or_insert(0);
        *balance = apply_to_balance(*balance, tx.santri_id, tx.signed_amount())?;
    }
    Ok(balances)
}

impl BalanceService {
    pub fn new(transactions: Store<UangSakuTransaction>, santri: Store<Santri>) -> Self {
        Self { transactions, santri }
    }

    pub async fn balance_of(&self, santri_id: u64) -> AdminResult<i64> {
        if self.santri.get(santri_id).await.is_none() {
            warn!("Balance requested for unknown santri: {}", santri_id);
            return Err(AdminError::NotFound { entity: Santri::KIND, id: santri_id });
        }

        let balance = self
            .transactions
            .snapshot()
            .await
            .iter()
            .filter(|tx| tx.santri_id == santri_id)
            .try_fold(0, |balance, tx| apply_to_balance(balance, santri_id, tx.signed_amount()))?;

        debug!("Balance for santri {}: {}", santri_id, balance);
        Ok(balance)
    }

    pub async fn balance_for(&self, santri_id: u64) -> AdminResult<SantriBalance> {
        let santri = self
            .santri
            .get(santri_id)
            .await
            .ok_or(AdminError::NotFound { entity: Santri::KIND, id: santri_id })?;
        let balance = self.balance_of(santri_id).await?;
        Ok(SantriBalance { santri, balance })
    }

    /// Every santri in roster order, including those without transactions
    pub async fn all_balances(&self) -> AdminResult<Vec<SantriBalance>> {
        let history = self.transactions.snapshot().await;
        let balances = balances_from_history(&history)?;

        Ok(self
            .santri
            .snapshot()
            .await
            .iter()
            .map(|santri| SantriBalance {
                santri: santri.clone(),
                balance: balances.get(&santri.id).copied().unwrap_or(0),
            })
            .collect())
    }

    pub async fn total_balance(&self) -> AdminResult<i64> {
        self.all_balances()
            .await?
            .iter()
            .try_fold(0, |total, b| apply_to_balance(total, b.santri.id, b.balance))
    }
}
