//! Per-month SPP and Syahriah payment records.
//!
//! Records are read-only for now. Marking a month paid is reported as
//! [`AdminError::NotImplemented`] instead of pretending to succeed.

use shared::{Entity, FeeKind, Month, MonthlyPaymentRecord, Santri};
use std::sync::Arc;
use tracing::{info, warn};

use super::errors::{AdminError, AdminResult};
use crate::storage::Store;

#[derive(Clone)]
pub struct PaymentRecordService {
    records: Arc<Vec<MonthlyPaymentRecord>>,
    santri: Store<Santri>,
}

impl PaymentRecordService {
    pub fn new(records: Vec<MonthlyPaymentRecord>, santri: Store<Santri>) -> Self {
        Self {
            records: Arc::new(records),
            santri,
        }
    }

    /// The record for one santri and fee kind; all months unpaid when none exists
    pub async fn get_record(&self, santri_id: u64, kind: FeeKind) -> AdminResult<MonthlyPaymentRecord> {
        info!("Getting {} payment record for santri {}", kind.label(), santri_id);
        self.ensure_santri(santri_id).await?;

        Ok(self
            .records
            .iter()
            .find(|r| r.santri_id == santri_id && r.kind == kind)
            .cloned()
            .unwrap_or_else(|| MonthlyPaymentRecord::unpaid(santri_id, kind)))
    }

    pub async fn toggle_month(&self, santri_id: u64, kind: FeeKind, month: Month) -> AdminResult<MonthlyPaymentRecord> {
        info!("Toggle {} {} requested for santri {}", kind.label(), month.label(), santri_id);
        self.ensure_santri(santri_id).await?;
        warn!("Monthly payment updates are not available yet");
        Err(AdminError::NotImplemented("Perubahan status pembayaran bulanan"))
    }

    async fn ensure_santri(&self, santri_id: u64) -> AdminResult<()> {
        match self.santri.get(santri_id).await {
            Some(_) => Ok(()),
            None => Err(AdminError::NotFound { entity: Santri::KIND, id: santri_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{memory_store, SampleSeed, SeedProvider};

    fn setup_test() -> PaymentRecordService {
        let seed = SampleSeed;
        PaymentRecordService::new(seed.payment_records(), memory_store(seed.santri()))
    }

    #[tokio::test]
    async fn test_existing_record() {
        let service = setup_test();
        let record = service.get_record(1, FeeKind::Spp).await.unwrap();
        assert!(record.is_paid(Month::June));
        assert!(!record.is_paid(Month::July));

        let yearly = service.get_record(1, FeeKind::Syahriah).await.unwrap();
        assert!(yearly.is_paid(Month::December));
    }

    #[tokio::test]
    async fn test_missing_record_is_all_unpaid() {
        let service = setup_test();
        let record = service.get_record(6, FeeKind::Syahriah).await.unwrap();
        assert_eq!(record, MonthlyPaymentRecord::unpaid(6, FeeKind::Syahriah));
    }

    #[tokio::test]
    async fn test_unknown_santri() {
        let service = setup_test();
        assert!(matches!(
            service.get_record(50, FeeKind::Spp).await,
            Err(AdminError::NotFound { id: 50, .. })
        ));
        assert!(matches!(
            service.toggle_month(50, FeeKind::Spp, Month::May).await,
            Err(AdminError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_toggle_is_explicitly_not_implemented() {
        let service = setup_test();
        let err = service.toggle_month(1, FeeKind::Spp, Month::July).await.unwrap_err();
        assert!(matches!(err, AdminError::NotImplemented(_)));
        assert_eq!(err.to_string(), "Perubahan status pembayaran bulanan belum tersedia");

        // Nothing changed
        let record = service.get_record(1, FeeKind::Spp).await.unwrap();
        assert!(!record.is_paid(Month::July));
    }
}
