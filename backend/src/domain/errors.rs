use shared::FieldErrors;
use thiserror::Error;

use crate::storage::StorageError;

/// Everything a domain operation can fail with
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: u64 },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Saldo tidak mencukupi: saldo {balance}, penarikan {requested}")]
    InsufficientBalance { balance: i64, requested: i64 },

    /// Summing a santri's history left the `i64` range
    #[error("Saldo santri {santri_id} melampaui batas perhitungan")]
    BalanceOverflow { santri_id: u64 },

    #[error("{0} belum tersedia")]
    NotImplemented(&'static str),

    #[error("Export failed: {0}")]
    Export(String),
}

impl AdminError {
    /// Validation failure on a single field
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        AdminError::Validation(errors)
    }
}

impl From<StorageError> for AdminError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::NotFound { entity, id } => AdminError::NotFound { entity, id },
        }
    }
}

impl From<FieldErrors> for AdminError {
    fn from(errors: FieldErrors) -> Self {
        AdminError::Validation(errors)
    }
}

pub type AdminResult<T> = Result<T, AdminError>;
