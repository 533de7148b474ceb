use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

pub mod currency;
pub mod form_modal;
pub mod forms;
pub mod listing;

pub use currency::{
    format_rupiah, format_signed_rupiah, format_weight, parse_rupiah, AmountParseError, MAX_AMOUNT,
};
pub use form_modal::{FieldErrors, FormFields, FormModal, FormMode, PendingDeletion, Submission, SubmitError};
pub use forms::*;
pub use listing::{filter_items, list_page, paginate, ListQuery, ListState, Page, Searchable};

/// A record owned by one of the in-memory entity stores.
///
/// Identity is a stable numeric id assigned by the store; records built by a
/// form carry id 0 until they are committed.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Human-readable entity name used in logs and "not found" messages
    const KIND: &'static str;

    fn id(&self) -> u64;
    fn set_id(&mut self, id: u64);
}

/// Error returned when an enum wire string is not recognised
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Declares a closed string enum with one canonical wire string per variant.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $wire)] $variant ),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let trimmed = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(trimmed))
                    .ok_or_else(|| UnknownVariant { kind: $kind, value: s.to_string() })
            }
        }
    };
}

wire_enum! {
    /// Active/inactive flag shared by laundry services and santri
    ServiceStatus ("status") {
        Active => "Active",
        Inactive => "Inactive",
    }
}

wire_enum! {
    /// Role of a system user; treasurers are scoped per institution
    UserRole ("role") {
        Admin => "admin",
        BendaharaSmk => "bendahara-smk",
        BendaharaSmp => "bendahara-smp",
        BendaharaPondok => "bendahara-pondok",
        Santri => "santri",
    }
}

wire_enum! {
    PaymentMethod ("payment method") {
        Cash => "Cash",
        Transfer => "Transfer",
        UangSaku => "Uang Saku",
    }
}

wire_enum! {
    TransactionStatus ("transaction status") {
        Completed => "Completed",
        Processing => "Processing",
        Pending => "Pending",
        Cancelled => "Cancelled",
    }
}

wire_enum! {
    /// Direction of a pocket-money movement
    UangSakuKind ("uang saku type") {
        Topup => "topup",
        Withdrawal => "withdrawal",
    }
}

wire_enum! {
    /// Whether a santri has settled a recurring fee
    PaymentStatus ("payment status") {
        Lunas => "Lunas",
        BelumLunas => "Belum Lunas",
    }
}

wire_enum! {
    /// Fee families that share the class-pricing screen
    FeeKind ("fee kind") {
        Spp => "spp",
        Syahriah => "syahriah",
    }
}

wire_enum! {
    Month ("month") {
        January => "january",
        February => "february",
        March => "march",
        April => "april",
        May => "may",
        June => "june",
        July => "july",
        August => "august",
        September => "september",
        October => "october",
        November => "november",
        December => "december",
    }
}

impl UserRole {
    pub fn label(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::BendaharaSmk => "Bendahara SMK",
            UserRole::BendaharaSmp => "Bendahara SMP",
            UserRole::BendaharaPondok => "Bendahara Pondok",
            UserRole::Santri => "Santri",
        }
    }
}

impl TransactionStatus {
    /// Badge colour shown next to the status in transaction tables
    pub fn color(&self) -> &'static str {
        match self {
            TransactionStatus::Completed => "green",
            TransactionStatus::Processing => "blue",
            TransactionStatus::Pending => "yellow",
            TransactionStatus::Cancelled => "red",
        }
    }
}

impl FeeKind {
    pub fn label(&self) -> &'static str {
        match self {
            FeeKind::Spp => "SPP",
            FeeKind::Syahriah => "Syahriah",
        }
    }

    /// SPP is billed per semester, Syahriah per year
    pub fn term_label(&self) -> &'static str {
        match self {
            FeeKind::Spp => "Semester",
            FeeKind::Syahriah => "Tahunan",
        }
    }
}

impl Month {
    pub fn index(&self) -> usize {
        Month::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Month::January => "Januari",
            Month::February => "Februari",
            Month::March => "Maret",
            Month::April => "April",
            Month::May => "Mei",
            Month::June => "Juni",
            Month::July => "Juli",
            Month::August => "Agustus",
            Month::September => "September",
            Month::October => "Oktober",
            Month::November => "November",
            Month::December => "Desember",
        }
    }
}

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// A student resident of the pondok
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Santri {
    pub id: u64,
    /// Student identification number, unique across santri
    pub nis: String,
    pub name: String,
    pub class_name: String,
    pub spp_status: PaymentStatus,
    pub syahriah_status: PaymentStatus,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub status: ServiceStatus,
}

/// Pricing for one SPP or Syahriah class, amounts in whole rupiah
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeClass {
    pub id: u64,
    pub kind: FeeKind,
    pub name: String,
    pub monthly: i64,
    /// Semester amount for SPP, yearly amount for Syahriah
    pub term_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryService {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price_per_kg: i64,
    pub estimated_time: String,
    pub category: String,
    pub status: ServiceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryPaymentClass {
    pub id: u64,
    pub name: String,
    pub monthly_price: i64,
    pub yearly_price: i64,
}

/// A laundry order. Santri and service names are snapshotted at creation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryTransaction {
    pub id: u64,
    pub santri_id: u64,
    pub santri_name: String,
    pub santri_class: String,
    pub service_id: u64,
    pub service_name: String,
    pub weight_kg: f64,
    /// `price_per_kg × weight_kg`, rounded to whole rupiah
    pub total_price: i64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
}

/// A pocket-money movement; `amount` is always positive, `kind` gives the sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UangSakuTransaction {
    pub id: u64,
    pub santri_id: u64,
    pub santri_name: String,
    pub description: String,
    pub amount: i64,
    pub kind: UangSakuKind,
    pub status: TransactionStatus,
    pub date: NaiveDate,
}

impl UangSakuTransaction {
    /// Effect of this transaction on the santri balance
    pub fn signed_amount(&self) -> i64 {
        if self.status != TransactionStatus::Completed {
            return 0;
        }
        match self.kind {
            UangSakuKind::Topup => self.amount,
            UangSakuKind::Withdrawal => -self.amount,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Sample data only; never serialized into responses
    #[serde(skip_serializing, default)]
    pub password: String,
    pub phone: String,
    pub role: UserRole,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Paid/unpaid flag per calendar month for one santri and one fee kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentRecord {
    pub santri_id: u64,
    pub kind: FeeKind,
    pub paid_months: [bool; 12],
    pub yearly_payment: bool,
}

impl MonthlyPaymentRecord {
    pub fn unpaid(santri_id: u64, kind: FeeKind) -> Self {
        Self {
            santri_id,
            kind,
            paid_months: [false; 12],
            yearly_payment: false,
        }
    }

    pub fn is_paid(&self, month: Month) -> bool {
        self.yearly_payment || self.paid_months[month.index()]
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> u64 {
                self.id
            }

            fn set_id(&mut self, id: u64) {
                self.id = id;
            }
        }
    };
}

impl_entity!(Santri, "Santri");
impl_entity!(FeeClass, "Fee class");
impl_entity!(LaundryService, "Laundry service");
impl_entity!(LaundryPaymentClass, "Laundry payment class");
impl_entity!(LaundryTransaction, "Laundry transaction");
impl_entity!(UangSakuTransaction, "Uang saku transaction");
impl_entity!(User, "User");

impl Searchable for Santri {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.nis.as_str(), self.class_name.as_str()]
    }
}

impl Searchable for FeeClass {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for LaundryService {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.category.as_str()]
    }
}

impl Searchable for LaundryPaymentClass {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str()]
    }
}

impl Searchable for LaundryTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.santri_name.as_str(), self.santri_class.as_str(), self.service_name.as_str()]
    }
}

impl Searchable for UangSakuTransaction {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.santri_name.as_str(), self.description.as_str()]
    }
}

impl Searchable for User {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.email.as_str(), self.role.as_str()]
    }
}

// ---------------------------------------------------------------------------
// View DTOs (amounts formatted for display, raw values kept alongside)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeClassView {
    pub id: u64,
    pub kind: FeeKind,
    pub name: String,
    pub monthly: String,
    pub term_label: String,
    pub term_amount: String,
    pub raw_monthly: i64,
    pub raw_term_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryServiceView {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub price_per_kg: String,
    pub estimated_time: String,
    pub category: String,
    pub status: ServiceStatus,
    pub raw_price_per_kg: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryPaymentClassView {
    pub id: u64,
    pub name: String,
    pub monthly_price: String,
    pub yearly_price: String,
    pub raw_monthly_price: i64,
    pub raw_yearly_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryTransactionView {
    pub id: u64,
    pub santri_id: u64,
    pub santri_name: String,
    pub santri_class: String,
    pub service_id: u64,
    pub service_name: String,
    pub weight: String,
    pub total_price: String,
    pub date: String,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
    pub raw_weight_kg: f64,
    pub raw_total_price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UangSakuTransactionView {
    pub id: u64,
    pub santri_id: u64,
    pub santri_name: String,
    pub description: String,
    pub amount: String,
    pub kind: UangSakuKind,
    pub status: TransactionStatus,
    pub status_color: String,
    pub date: String,
    pub raw_amount: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceView {
    pub santri_id: u64,
    pub nis: String,
    pub santri_name: String,
    pub class_name: String,
    pub balance: String,
    pub raw_balance: i64,
}

impl Searchable for BalanceView {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.santri_name.as_str(), self.nis.as_str(), self.class_name.as_str()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPaymentView {
    pub month: Month,
    pub label: String,
    pub paid: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPaymentView {
    pub santri_id: u64,
    pub kind: FeeKind,
    pub months: Vec<MonthPaymentView>,
    pub yearly_payment: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_santri: usize,
    pub active_santri: usize,
    pub spp_lunas: usize,
    pub syahriah_lunas: usize,
    pub active_laundry_services: usize,
    pub pending_laundry_transactions: usize,
    pub total_uang_saku_balance: String,
    pub raw_total_uang_saku_balance: i64,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Response after a create or update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResponse<T> {
    pub item: T,
    pub success_message: String,
}

/// Error body returned by the REST layer; `errors` is keyed by form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors: BTreeMap<String, String>,
}
