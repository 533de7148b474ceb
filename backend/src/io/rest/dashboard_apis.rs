//! # REST API for the dashboard
//!
//! Liveness check and the headline numbers shown on the landing page.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::AppState;

/// Liveness check
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Santri counts, payment progress, pending laundry and the total uang saku balance
pub async fn get_dashboard_summary(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/dashboard/summary");

    match state.dashboard_service.summary().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => {
            error!("Failed to build dashboard summary: {}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;
    use shared::DashboardSummary;

    #[tokio::test]
    async fn test_summary_counts_sample_data() {
        let state = AppState::from_seed(&SampleSeed);
        let response = get_dashboard_summary(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let summary: DashboardSummary = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(summary.total_santri, 8);
        assert_eq!(summary.active_santri, 7);
        assert_eq!(summary.pending_laundry_transactions, 2);
        assert_eq!(summary.total_uang_saku_balance, "Rp 400.000");
    }
}
