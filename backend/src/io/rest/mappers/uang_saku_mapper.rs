use shared::{format_rupiah, format_signed_rupiah, BalanceView, UangSakuKind, UangSakuTransaction, UangSakuTransactionView};

use super::format_date;
use crate::domain::SantriBalance;

pub struct UangSakuMapper;

impl UangSakuMapper {
    /// Top-ups show with `+`, withdrawals with `-`
    pub fn to_view(tx: UangSakuTransaction) -> UangSakuTransactionView {
        let signed = match tx.kind {
            UangSakuKind::Topup => tx.amount,
            UangSakuKind::Withdrawal => -tx.amount,
        };
        UangSakuTransactionView {
            id: tx.id,
            santri_id: tx.santri_id,
            santri_name: tx.santri_name,
            description: tx.description,
            amount: format_signed_rupiah(signed),
            kind: tx.kind,
            status: tx.status,
            status_color: tx.status.color().to_string(),
            date: format_date(tx.date),
            raw_amount: tx.amount,
        }
    }

    pub fn balance_to_view(balance: SantriBalance) -> BalanceView {
        BalanceView {
            santri_id: balance.santri.id,
            nis: balance.santri.nis,
            santri_name: balance.santri.name,
            class_name: balance.santri.class_name,
            balance: format_rupiah(balance.balance),
            raw_balance: balance.balance,
        }
    }
}
