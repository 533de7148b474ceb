//! # REST API for SPP and Syahriah payment records
//!
//! Per-santri yearly payment grids and toggling of individual months.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{FeeKind, Month};
use tracing::{info, warn};

use super::mappers::PaymentMapper;
use crate::AppState;

/// Get a santri's monthly payment grid for SPP or Syahriah
pub async fn get_payment_record(
    State(state): State<AppState>,
    Path((santri_id, kind)): Path<(u64, FeeKind)>,
) -> impl IntoResponse {
    info!("GET /api/santri/{}/payments/{}", santri_id, kind.as_str());

    match state.payment_record_service.get_record(santri_id, kind).await {
        Ok(record) => (StatusCode::OK, Json(PaymentMapper::to_view(record))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Flip one month between paid and unpaid
pub async fn toggle_payment_month(
    State(state): State<AppState>,
    Path((santri_id, kind, month)): Path<(u64, FeeKind, Month)>,
) -> impl IntoResponse {
    info!(
        "POST /api/santri/{}/payments/{}/{}",
        santri_id,
        kind.as_str(),
        month.as_str()
    );

    match state.payment_record_service.toggle_month(santri_id, kind, month).await {
        Ok(record) => (StatusCode::OK, Json(PaymentMapper::to_view(record))).into_response(),
        Err(e) => {
            warn!("Payment toggle rejected: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;

    #[tokio::test]
    async fn test_record_for_unknown_santri_is_not_found() {
        let state = AppState::from_seed(&SampleSeed);
        let response = get_payment_record(State(state), Path((99, FeeKind::Spp)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_toggle_is_not_implemented() {
        let state = AppState::from_seed(&SampleSeed);
        let response = toggle_payment_month(State(state), Path((1, FeeKind::Syahriah, Month::March)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    }
}
