use shared::{Month, MonthPaymentView, MonthlyPaymentRecord, MonthlyPaymentView};

pub struct PaymentMapper;

impl PaymentMapper {
    /// One entry per calendar month, January first
    pub fn to_view(record: MonthlyPaymentRecord) -> MonthlyPaymentView {
        let months = Month::ALL
            .iter()
            .map(|month| MonthPaymentView {
                month: *month,
                label: month.label().to_string(),
                paid: record.is_paid(*month),
            })
            .collect();

        MonthlyPaymentView {
            santri_id: record.santri_id,
            kind: record.kind,
            months,
            yearly_payment: record.yearly_payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FeeKind;

    #[test]
    fn test_months_in_calendar_order() {
        let mut record = MonthlyPaymentRecord::unpaid(1, FeeKind::Spp);
        record.paid_months[0] = true;

        let view = PaymentMapper::to_view(record);
        assert_eq!(view.months.len(), 12);
        assert_eq!(view.months[0].label, "Januari");
        assert!(view.months[0].paid);
        assert!(!view.months[1].paid);
        assert_eq!(view.months[11].month, Month::December);
    }
}
