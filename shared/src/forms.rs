//! Per-entity form fields and their validation rules.
//!
//! Every field is held as the raw text the user typed, exactly as an input box
//! would hold it. `validate` turns the text into a typed record or a set of
//! keyed [`FieldErrors`]. The backend deserializes request bodies straight into
//! these forms, so numbers may arrive either as JSON numbers or strings.
//!
//! Field-level rules (required text, NIS digits, email, amounts) are declared
//! with `validator` attributes and checked against a trimmed copy of the form;
//! choices, dates and references are then parsed into their typed values.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::currency::{format_rupiah, parse_rupiah, MAX_AMOUNT};
use crate::form_modal::{FieldErrors, FormFields, FormMode};
use crate::{
    FeeClass, LaundryPaymentClass, LaundryService, LaundryTransaction, PaymentMethod, PaymentStatus,
    Santri, ServiceStatus, TransactionStatus, UangSakuKind, User, UserRole,
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Deserialize)]
#[serde(untagged)]
enum RawField {
    Text(String),
    Int(i64),
    Float(f64),
}

/// Accept `"170000"`, `170000` or `2.5` for a text field
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Text(text)) => text,
        Some(RawField::Int(value)) => value.to_string(),
        Some(RawField::Float(value)) => value.to_string(),
        None => String::new(),
    })
}

/// Like [`lenient_string`] for rupiah fields: `170000.0` reads as `170000`,
/// while `2.5` keeps its fraction (as `2,5`) so the amount rule rejects it
fn lenient_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawField>::deserialize(deserializer)? {
        Some(RawField::Text(text)) => text,
        Some(RawField::Int(value)) => value.to_string(),
        Some(RawField::Float(value)) if value.is_finite() && value.fract() == 0.0 => format!("{:.0}", value),
        Some(RawField::Float(value)) => value.to_string().replace('.', ","),
        None => String::new(),
    })
}

fn rule_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

fn digits_only(value: &str) -> Result<(), ValidationError> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(rule_error("digits", "NIS hanya boleh berisi angka"))
    }
}

/// Blank passes; presence is a separate `length` rule where it is required
fn email_format(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_email() {
        Ok(())
    } else {
        Err(rule_error("email", "Format email tidak valid"))
    }
}

/// A whole rupiah amount in `1..=MAX_AMOUNT`; blank is left to `length`
fn rupiah_amount(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    match parse_rupiah(value) {
        Ok(amount) if amount <= 0 => Err(rule_error("amount", "Nominal harus lebih dari 0")),
        Ok(amount) if amount > MAX_AMOUNT => Err(rule_error(
            "amount",
            format!("Nominal maksimal {}", format_rupiah(MAX_AMOUNT)),
        )),
        Ok(_) => Ok(()),
        Err(e) => Err(rule_error("amount", format!("Nominal tidak valid: {}", e))),
    }
}

fn positive_weight(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_weight(value).is_some() {
        Ok(())
    } else {
        Err(rule_error("weight", "Berat harus berupa angka lebih dari 0"))
    }
}

fn password_length(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.chars().count() >= MIN_PASSWORD_LENGTH {
        Ok(())
    } else {
        Err(rule_error(
            "length",
            format!("Password minimal {} karakter", MIN_PASSWORD_LENGTH),
        ))
    }
}

/// Run the declared rules and fold each failing field's first message into `errors`
fn check_rules<F: validator::Validate>(form: &F, errors: &mut FieldErrors) {
    if let Err(report) = validator::Validate::validate(form) {
        collect_rule_errors(&report, errors);
    }
}

fn collect_rule_errors(report: &ValidationErrors, errors: &mut FieldErrors) {
    for (field, failures) in report.field_errors() {
        if let Some(failure) = failures.first() {
            let message = match &failure.message {
                Some(message) => message.to_string(),
                None => failure.code.to_string(),
            };
            errors.add(&field.to_string(), message);
        }
    }
}

fn trim_fields<const N: usize>(fields: [&mut String; N]) {
    for field in fields {
        let trimmed = field.trim();
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Only called once the amount rule has passed
fn amount(value: &str) -> i64 {
    parse_rupiah(value).unwrap_or_default()
}

fn reference_id(errors: &mut FieldErrors, field: &str, value: &str, message: &str) -> u64 {
    match value.parse::<u64>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.add(field, message);
            0
        }
    }
}

/// Parse an enum choice; a blank value falls back to `default` when there is one
fn choice<T: FromStr + Copy>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    default: Option<T>,
    message: &str,
) -> Option<T> {
    if value.is_empty() {
        if default.is_none() {
            errors.add(field, message);
        }
        return default;
    }
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            errors.add(field, message);
            None
        }
    }
}

/// Blank means today
fn date_or_today(errors: &mut FieldErrors, field: &str, value: &str) -> NaiveDate {
    if value.is_empty() {
        return chrono::Local::now().date_naive();
    }
    match NaiveDate::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => date,
        Err(_) => {
            errors.add(field, "Tanggal harus berformat YYYY-MM-DD");
            NaiveDate::default()
        }
    }
}

/// Weight in kilograms; `2,5` and `2.5 kg` are both accepted
pub fn parse_weight(input: &str) -> Option<f64> {
    let cleaned = input.trim().trim_end_matches("kg").trim().replace(',', ".");
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite() && *weight > 0.0)
}

// ---------------------------------------------------------------------------
// Santri
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct SantriForm {
    #[serde(deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "NIS wajib diisi"), custom(function = "digits_only"))]
    pub nis: String,
    #[validate(length(min = 1, message = "Nama wajib diisi"))]
    pub name: String,
    #[validate(length(min = 1, message = "Kelas wajib diisi"))]
    pub class_name: String,
    pub spp_status: String,
    pub syahriah_status: String,
    #[validate(custom(function = "email_format"))]
    pub email: String,
    #[serde(deserialize_with = "lenient_string")]
    pub phone: String,
    pub address: String,
    pub birth_date: String,
    pub status: String,
}

impl SantriForm {
    fn trimmed(&self) -> Self {
        let mut form = self.clone();
        trim_fields([
            &mut form.nis,
            &mut form.name,
            &mut form.class_name,
            &mut form.spp_status,
            &mut form.syahriah_status,
            &mut form.email,
            &mut form.phone,
            &mut form.address,
            &mut form.birth_date,
            &mut form.status,
        ]);
        form
    }
}

impl FormFields for SantriForm {
    type Source = Santri;
    type Output = Santri;

    fn from_source(santri: &Santri) -> Self {
        Self {
            nis: santri.nis.clone(),
            name: santri.name.clone(),
            class_name: santri.class_name.clone(),
            spp_status: santri.spp_status.as_str().to_string(),
            syahriah_status: santri.syahriah_status.as_str().to_string(),
            email: santri.email.clone().unwrap_or_default(),
            phone: santri.phone.clone().unwrap_or_default(),
            address: santri.address.clone().unwrap_or_default(),
            birth_date: santri
                .birth_date
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            status: santri.status.as_str().to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "nis" => &mut self.nis,
            "name" => &mut self.name,
            "class_name" => &mut self.class_name,
            "spp_status" => &mut self.spp_status,
            "syahriah_status" => &mut self.syahriah_status,
            "email" => &mut self.email,
            "phone" => &mut self.phone,
            "address" => &mut self.address,
            "birth_date" => &mut self.birth_date,
            "status" => &mut self.status,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<Santri, FieldErrors> {
        let form = self.trimmed();
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        let birth_date = match optional(&form.birth_date) {
            Some(text) => match NaiveDate::parse_from_str(&text, DATE_FORMAT) {
                Ok(date) => Some(date),
                Err(_) => {
                    errors.add("birth_date", "Tanggal lahir harus berformat YYYY-MM-DD");
                    None
                }
            },
            None => None,
        };

        let spp_status = choice(
            &mut errors,
            "spp_status",
            &form.spp_status,
            Some(PaymentStatus::BelumLunas),
            "Status SPP tidak valid",
        );
        let syahriah_status = choice(
            &mut errors,
            "syahriah_status",
            &form.syahriah_status,
            Some(PaymentStatus::BelumLunas),
            "Status Syahriah tidak valid",
        );
        let status = choice(
            &mut errors,
            "status",
            &form.status,
            Some(ServiceStatus::Active),
            "Status tidak valid",
        );

        errors.into_result(|| Santri {
            id: 0,
            email: optional(&form.email),
            phone: optional(&form.phone),
            address: optional(&form.address),
            birth_date,
            spp_status: spp_status.unwrap_or(PaymentStatus::BelumLunas),
            syahriah_status: syahriah_status.unwrap_or(PaymentStatus::BelumLunas),
            status: status.unwrap_or(ServiceStatus::Active),
            nis: form.nis,
            name: form.name,
            class_name: form.class_name,
        })
    }
}

// ---------------------------------------------------------------------------
// SPP / Syahriah classes
// ---------------------------------------------------------------------------

/// A validated fee class; the kind comes from the screen it was submitted on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeClassDraft {
    pub name: String,
    pub monthly: i64,
    pub term_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct FeeClassForm {
    #[validate(length(min = 1, message = "Nama kelas wajib diisi"))]
    pub name: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Nominal bulanan wajib diisi"), custom(function = "rupiah_amount"))]
    pub monthly: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Nominal periode wajib diisi"), custom(function = "rupiah_amount"))]
    pub term_amount: String,
}

impl FormFields for FeeClassForm {
    type Source = FeeClass;
    type Output = FeeClassDraft;

    fn from_source(class: &FeeClass) -> Self {
        Self {
            name: class.name.clone(),
            monthly: class.monthly.to_string(),
            term_amount: class.term_amount.to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "name" => self.name = value,
            "monthly" => self.monthly = value,
            "term_amount" => self.term_amount = value,
            _ => return false,
        }
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<FeeClassDraft, FieldErrors> {
        let mut form = self.clone();
        trim_fields([&mut form.name, &mut form.monthly, &mut form.term_amount]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        errors.into_result(|| FeeClassDraft {
            monthly: amount(&form.monthly),
            term_amount: amount(&form.term_amount),
            name: form.name,
        })
    }
}

// ---------------------------------------------------------------------------
// Laundry catalogue
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct LaundryServiceForm {
    #[validate(length(min = 1, message = "Nama layanan wajib diisi"))]
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Harga per kg wajib diisi"), custom(function = "rupiah_amount"))]
    pub price_per_kg: String,
    #[validate(length(min = 1, message = "Estimasi waktu wajib diisi"))]
    pub estimated_time: String,
    #[validate(length(min = 1, message = "Kategori wajib diisi"))]
    pub category: String,
    pub status: String,
}

impl FormFields for LaundryServiceForm {
    type Source = LaundryService;
    type Output = LaundryService;

    fn from_source(service: &LaundryService) -> Self {
        Self {
            name: service.name.clone(),
            description: service.description.clone(),
            price_per_kg: service.price_per_kg.to_string(),
            estimated_time: service.estimated_time.clone(),
            category: service.category.clone(),
            status: service.status.as_str().to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "description" => &mut self.description,
            "price_per_kg" => &mut self.price_per_kg,
            "estimated_time" => &mut self.estimated_time,
            "category" => &mut self.category,
            "status" => &mut self.status,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<LaundryService, FieldErrors> {
        let mut form = self.clone();
        trim_fields([
            &mut form.name,
            &mut form.description,
            &mut form.price_per_kg,
            &mut form.estimated_time,
            &mut form.category,
            &mut form.status,
        ]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        let status = choice(
            &mut errors,
            "status",
            &form.status,
            Some(ServiceStatus::Active),
            "Status tidak valid",
        );

        errors.into_result(|| LaundryService {
            id: 0,
            price_per_kg: amount(&form.price_per_kg),
            status: status.unwrap_or(ServiceStatus::Active),
            name: form.name,
            description: form.description,
            estimated_time: form.estimated_time,
            category: form.category,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct LaundryPaymentClassForm {
    #[validate(length(min = 1, message = "Nama kelas wajib diisi"))]
    pub name: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Harga bulanan wajib diisi"), custom(function = "rupiah_amount"))]
    pub monthly_price: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Harga tahunan wajib diisi"), custom(function = "rupiah_amount"))]
    pub yearly_price: String,
}

impl FormFields for LaundryPaymentClassForm {
    type Source = LaundryPaymentClass;
    type Output = LaundryPaymentClass;

    fn from_source(class: &LaundryPaymentClass) -> Self {
        Self {
            name: class.name.clone(),
            monthly_price: class.monthly_price.to_string(),
            yearly_price: class.yearly_price.to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "name" => self.name = value,
            "monthly_price" => self.monthly_price = value,
            "yearly_price" => self.yearly_price = value,
            _ => return false,
        }
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<LaundryPaymentClass, FieldErrors> {
        let mut form = self.clone();
        trim_fields([&mut form.name, &mut form.monthly_price, &mut form.yearly_price]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        errors.into_result(|| LaundryPaymentClass {
            id: 0,
            monthly_price: amount(&form.monthly_price),
            yearly_price: amount(&form.yearly_price),
            name: form.name,
        })
    }
}

// ---------------------------------------------------------------------------
// Laundry transactions
// ---------------------------------------------------------------------------

/// A validated laundry order before names and price are resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaundryTransactionDraft {
    pub santri_id: u64,
    pub service_id: u64,
    pub weight_kg: f64,
    pub date: NaiveDate,
    pub status: TransactionStatus,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct LaundryTransactionForm {
    #[serde(deserialize_with = "lenient_string")]
    pub santri_id: String,
    #[serde(deserialize_with = "lenient_string")]
    pub service_id: String,
    #[serde(deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Berat wajib diisi"), custom(function = "positive_weight"))]
    pub weight: String,
    pub date: String,
    pub status: String,
    pub payment_method: String,
}

impl FormFields for LaundryTransactionForm {
    type Source = LaundryTransaction;
    type Output = LaundryTransactionDraft;

    fn from_source(tx: &LaundryTransaction) -> Self {
        Self {
            santri_id: tx.santri_id.to_string(),
            service_id: tx.service_id.to_string(),
            weight: tx.weight_kg.to_string(),
            date: tx.date.format(DATE_FORMAT).to_string(),
            status: tx.status.as_str().to_string(),
            payment_method: tx.payment_method.as_str().to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "santri_id" => &mut self.santri_id,
            "service_id" => &mut self.service_id,
            "weight" => &mut self.weight,
            "date" => &mut self.date,
            "status" => &mut self.status,
            "payment_method" => &mut self.payment_method,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<LaundryTransactionDraft, FieldErrors> {
        let mut form = self.clone();
        trim_fields([
            &mut form.santri_id,
            &mut form.service_id,
            &mut form.weight,
            &mut form.date,
            &mut form.status,
            &mut form.payment_method,
        ]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        let santri_id = reference_id(&mut errors, "santri_id", &form.santri_id, "Pilih santri");
        let service_id = reference_id(&mut errors, "service_id", &form.service_id, "Pilih layanan laundry");
        let date = date_or_today(&mut errors, "date", &form.date);
        let status = choice(
            &mut errors,
            "status",
            &form.status,
            Some(TransactionStatus::Pending),
            "Status tidak valid",
        );
        let payment_method = choice::<PaymentMethod>(
            &mut errors,
            "payment_method",
            &form.payment_method,
            None,
            "Pilih metode pembayaran",
        );

        errors.into_result(|| LaundryTransactionDraft {
            santri_id,
            service_id,
            weight_kg: parse_weight(&form.weight).unwrap_or_default(),
            date,
            status: status.unwrap_or(TransactionStatus::Pending),
            payment_method: payment_method.unwrap_or(PaymentMethod::Cash),
        })
    }
}

// ---------------------------------------------------------------------------
// Uang Saku
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UangSakuDraft {
    pub santri_id: u64,
    pub description: String,
    pub amount: i64,
    pub kind: UangSakuKind,
    pub status: TransactionStatus,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct UangSakuForm {
    #[serde(deserialize_with = "lenient_string")]
    pub santri_id: String,
    #[validate(length(min = 1, message = "Keterangan wajib diisi"))]
    pub description: String,
    #[serde(deserialize_with = "lenient_amount")]
    #[validate(length(min = 1, message = "Nominal wajib diisi"), custom(function = "rupiah_amount"))]
    pub amount: String,
    pub kind: String,
    pub status: String,
    pub date: String,
}

impl FormFields for UangSakuForm {
    type Source = crate::UangSakuTransaction;
    type Output = UangSakuDraft;

    fn from_source(tx: &crate::UangSakuTransaction) -> Self {
        Self {
            santri_id: tx.santri_id.to_string(),
            description: tx.description.clone(),
            amount: tx.amount.to_string(),
            kind: tx.kind.as_str().to_string(),
            status: tx.status.as_str().to_string(),
            date: tx.date.format(DATE_FORMAT).to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "santri_id" => &mut self.santri_id,
            "description" => &mut self.description,
            "amount" => &mut self.amount,
            "kind" => &mut self.kind,
            "status" => &mut self.status,
            "date" => &mut self.date,
            _ => return false,
        };
        *slot = value;
        true
    }

    fn validate(&self, _mode: FormMode) -> Result<UangSakuDraft, FieldErrors> {
        let mut form = self.clone();
        trim_fields([
            &mut form.santri_id,
            &mut form.description,
            &mut form.amount,
            &mut form.kind,
            &mut form.status,
            &mut form.date,
        ]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        let santri_id = reference_id(&mut errors, "santri_id", &form.santri_id, "Pilih santri");
        let kind = choice::<UangSakuKind>(&mut errors, "kind", &form.kind, None, "Pilih jenis transaksi");
        let status = choice(
            &mut errors,
            "status",
            &form.status,
            Some(TransactionStatus::Completed),
            "Status tidak valid",
        );
        let date = date_or_today(&mut errors, "date", &form.date);

        errors.into_result(|| UangSakuDraft {
            santri_id,
            amount: amount(&form.amount),
            description: form.description,
            kind: kind.unwrap_or(UangSakuKind::Topup),
            status: status.unwrap_or(TransactionStatus::Completed),
            date,
        })
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// `password` is `None` when an edit leaves it blank (keep the stored one)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub password: Option<String>,
    pub phone: String,
    pub role: UserRole,
}

#[derive(Clone, Default, PartialEq, Serialize, Deserialize, validator::Validate)]
#[serde(default)]
pub struct UserForm {
    #[validate(length(min = 1, message = "Nama wajib diisi"))]
    pub name: String,
    #[validate(length(min = 1, message = "Email wajib diisi"), custom(function = "email_format"))]
    pub email: String,
    #[serde(skip_serializing)]
    #[validate(custom(function = "password_length"))]
    pub password: String,
    #[serde(deserialize_with = "lenient_string")]
    #[validate(length(min = 1, message = "Nomor telepon wajib diisi"))]
    pub phone: String,
    pub role: String,
}

impl fmt::Debug for UserForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"***")
            .field("phone", &self.phone)
            .field("role", &self.role)
            .finish()
    }
}

impl FormFields for UserForm {
    type Source = User;
    type Output = UserDraft;

    /// The stored password is never copied into the form
    fn from_source(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            password: String::new(),
            phone: user.phone.clone(),
            role: user.role.as_str().to_string(),
        }
    }

    fn set_field(&mut self, field: &str, value: String) -> bool {
        let slot = match field {
            "name" => &mut self.name,
            "email" => &mut self.email,
            "password" => &mut self.password,
            "phone" => &mut self.phone,
            "role" => &mut self.role,
            _ => return false,
        };
        *slot = value;
        true
    }

    /// The password is taken exactly as typed; every other field is trimmed
    fn validate(&self, mode: FormMode) -> Result<UserDraft, FieldErrors> {
        let mut form = self.clone();
        trim_fields([&mut form.name, &mut form.email, &mut form.phone, &mut form.role]);
        let mut errors = FieldErrors::new();
        check_rules(&form, &mut errors);

        let password = match (mode, form.password.is_empty()) {
            (FormMode::Edit(_), true) => None,
            (FormMode::Add, true) => {
                errors.add("password", "Password wajib diisi");
                None
            }
            (_, false) => Some(form.password.clone()),
        };
        let role = choice::<UserRole>(&mut errors, "role", &form.role, None, "Pilih role pengguna");

        errors.into_result(|| UserDraft {
            password,
            role: role.unwrap_or(UserRole::Santri),
            name: form.name,
            email: form.email,
            phone: form.phone,
        })
    }
}
