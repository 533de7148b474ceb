//! Conversions from domain records to the formatted view DTOs the dashboard
//! renders. Currency and dates become display strings here and nowhere else.

pub mod fee_class_mapper;
pub mod laundry_mapper;
pub mod payment_mapper;
pub mod uang_saku_mapper;

use chrono::{Datelike, NaiveDate};
use shared::{Month, MutationResponse};

pub use fee_class_mapper::FeeClassMapper;
pub use laundry_mapper::LaundryMapper;
pub use payment_mapper::PaymentMapper;
pub use uang_saku_mapper::UangSakuMapper;

/// `2024-01-15` -> `"15 Januari 2024"`
pub fn format_date(date: NaiveDate) -> String {
    let month = Month::ALL
        .get(date.month0() as usize)
        .map(Month::label)
        .unwrap_or_default();
    format!("{} {} {}", date.day(), month, date.year())
}

pub fn map_mutation<T, U>(response: MutationResponse<T>, to_view: impl FnOnce(T) -> U) -> MutationResponse<U> {
    MutationResponse {
        item: to_view(response.item),
        success_message: response.success_message,
    }
}
