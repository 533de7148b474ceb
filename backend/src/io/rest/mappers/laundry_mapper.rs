use shared::{
    format_rupiah, format_weight, LaundryPaymentClass, LaundryPaymentClassView, LaundryService, LaundryServiceView,
    LaundryTransaction, LaundryTransactionView,
};

use super::format_date;

pub struct LaundryMapper;

impl LaundryMapper {
    pub fn service_to_view(service: LaundryService) -> LaundryServiceView {
        LaundryServiceView {
            id: service.id,
            name: service.name,
            description: service.description,
            price_per_kg: format!("{}/kg", format_rupiah(service.price_per_kg)),
            estimated_time: service.estimated_time,
            category: service.category,
            status: service.status,
            raw_price_per_kg: service.price_per_kg,
        }
    }

    pub fn payment_class_to_view(class: LaundryPaymentClass) -> LaundryPaymentClassView {
        LaundryPaymentClassView {
            id: class.id,
            name: class.name,
            monthly_price: format_rupiah(class.monthly_price),
            yearly_price: format_rupiah(class.yearly_price),
            raw_monthly_price: class.monthly_price,
            raw_yearly_price: class.yearly_price,
        }
    }

    pub fn transaction_to_view(tx: LaundryTransaction) -> LaundryTransactionView {
        LaundryTransactionView {
            id: tx.id,
            santri_id: tx.santri_id,
            santri_name: tx.santri_name,
            santri_class: tx.santri_class,
            service_id: tx.service_id,
            service_name: tx.service_name,
            weight: format_weight(tx.weight_kg),
            total_price: format_rupiah(tx.total_price),
            date: format_date(tx.date),
            status: tx.status,
            payment_method: tx.payment_method,
            raw_weight_kg: tx.weight_kg,
            raw_total_price: tx.total_price,
        }
    }
}
