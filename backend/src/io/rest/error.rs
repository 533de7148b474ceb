//! Translation of domain errors into HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use std::collections::BTreeMap;

use crate::domain::AdminError;

impl AdminError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AdminError::NotFound { .. } => StatusCode::NOT_FOUND,
            AdminError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AdminError::Conflict(_)
            | AdminError::InsufficientBalance { .. }
            | AdminError::BalanceOverflow { .. } => StatusCode::CONFLICT,
            AdminError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AdminError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AdminError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AdminError::Validation(errors) => ErrorResponse {
                message: "Data yang dikirim tidak valid".to_string(),
                errors: errors.into_map(),
            },
            other => ErrorResponse {
                message: other.to_string(),
                errors: BTreeMap::new(),
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FieldErrors;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AdminError::NotFound { entity: "Santri", id: 1 }.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(AdminError::Validation(FieldErrors::new()).status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(AdminError::Conflict("x".into()).status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AdminError::InsufficientBalance { balance: 0, requested: 1 }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(AdminError::BalanceOverflow { santri_id: 1 }.status_code(), StatusCode::CONFLICT);
        assert_eq!(AdminError::NotImplemented("x").status_code(), StatusCode::NOT_IMPLEMENTED);
    }

    #[tokio::test]
    async fn test_validation_body_is_keyed_by_field() {
        let response = AdminError::field("nis", "NIS wajib diisi").into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.errors.get("nis").map(String::as_str), Some("NIS wajib diisi"));
    }
}
