use shared::{
    format_rupiah, DashboardSummary, LaundryService, LaundryTransaction, PaymentStatus, Santri, ServiceStatus,
    TransactionStatus,
};
use tracing::info;

use super::balance_service::BalanceService;
use super::errors::AdminResult;
use crate::storage::Store;

/// Headline numbers for the dashboard landing page
#[derive(Clone)]
pub struct DashboardService {
    santri: Store<Santri>,
    laundry_services: Store<LaundryService>,
    laundry_transactions: Store<LaundryTransaction>,
    balances: BalanceService,
}

impl DashboardService {
    pub fn new(
        santri: Store<Santri>,
        laundry_services: Store<LaundryService>,
        laundry_transactions: Store<LaundryTransaction>,
        balances: BalanceService,
    ) -> Self {
        Self {
            santri,
            laundry_services,
            laundry_transactions,
            balances,
        }
    }

    pub async fn summary(&self) -> AdminResult<DashboardSummary> {
        let santri = self.santri.snapshot().await;
        let services = self.laundry_services.snapshot().await;
        let transactions = self.laundry_transactions.snapshot().await;
        let total_balance = self.balances.total_balance().await?;

        let summary = DashboardSummary {
            total_santri: santri.len(),
            active_santri: santri.iter().filter(|s| s.status == ServiceStatus::Active).count(),
            spp_lunas: santri.iter().filter(|s| s.spp_status == PaymentStatus::Lunas).count(),
            syahriah_lunas: santri.iter().filter(|s| s.syahriah_status == PaymentStatus::Lunas).count(),
            active_laundry_services: services.iter().filter(|s| s.status == ServiceStatus::Active).count(),
            pending_laundry_transactions: transactions
                .iter()
                .filter(|t| t.status == TransactionStatus::Pending)
                .count(),
            total_uang_saku_balance: format_rupiah(total_balance),
            raw_total_uang_saku_balance: total_balance,
        };

        info!(
            "Dashboard summary: {} santri, {} pending laundry, balance {}",
            summary.total_santri, summary.pending_laundry_transactions, summary.total_uang_saku_balance
        );
        Ok(summary)
    }
}
