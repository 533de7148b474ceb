pub mod dashboard_apis;
pub mod error;
pub mod fee_class_apis;
pub mod laundry_apis;
pub mod mappers;
pub mod payment_apis;
pub mod santri_apis;
pub mod uang_saku_apis;
pub mod user_apis;

pub use dashboard_apis::*;
pub use fee_class_apis::*;
pub use laundry_apis::*;
pub use payment_apis::*;
pub use santri_apis::*;
pub use uang_saku_apis::*;
pub use user_apis::*;
