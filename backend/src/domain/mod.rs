//! # Domain Module
//!
//! Business rules for the pesantren admin dashboard. There is one service per
//! management screen; each validates submitted forms with the shared form
//! rules and commits through its store.
//!
//! ## Services
//!
//! - [`SantriService`]: the student roster, unique NIS
//! - [`FeeClassService`]: SPP and Syahriah class pricing
//! - [`LaundryCatalogService`]: laundry services and payment classes
//! - [`LaundryTransactionService`]: laundry orders, priced from the service rate
//! - [`UangSakuService`] and [`BalanceService`]: pocket money and derived balances
//! - [`UserService`]: dashboard accounts, unique email
//! - [`PaymentRecordService`]: monthly SPP/Syahriah payment records
//! - [`ExportService`]: CSV export
//! - [`DashboardService`]: summary counts

pub mod balance_service;
pub mod dashboard_service;
pub mod errors;
pub mod export_service;
pub mod fee_class_service;
pub mod laundry_catalog_service;
pub mod laundry_transaction_service;
pub mod payment_record_service;
pub mod santri_service;
pub mod uang_saku_service;
pub mod user_service;

pub use balance_service::{BalanceService, SantriBalance};
pub use dashboard_service::DashboardService;
pub use errors::{AdminError, AdminResult};
pub use export_service::{CsvExport, ExportService};
pub use fee_class_service::FeeClassService;
pub use laundry_catalog_service::LaundryCatalogService;
pub use laundry_transaction_service::LaundryTransactionService;
pub use payment_record_service::PaymentRecordService;
pub use santri_service::SantriService;
pub use uang_saku_service::UangSakuService;
pub use user_service::UserService;
