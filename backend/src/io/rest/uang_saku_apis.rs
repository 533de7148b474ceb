//! # REST API for Uang Saku
//!
//! Pocket-money transactions, per-santri balances and the CSV export.

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Json},
};
use shared::{list_page, BalanceView, ListQuery, UangSakuForm};
use tracing::{error, info};

use super::mappers::{map_mutation, UangSakuMapper};
use crate::AppState;

/// List uang saku transactions
pub async fn list_uang_saku_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/uang-saku/transactions - query: {:?}", query);
    let page = state.uang_saku_service.list_transactions(&query).await;
    Json(page.map(UangSakuMapper::to_view))
}

/// Get an uang saku transaction by ID
pub async fn get_uang_saku_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
) -> impl IntoResponse {
    info!("GET /api/uang-saku/transactions/{}", transaction_id);

    match state.uang_saku_service.get_transaction(transaction_id).await {
        Ok(tx) => (StatusCode::OK, Json(UangSakuMapper::to_view(tx))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a top-up or withdrawal
pub async fn create_uang_saku_transaction(
    State(state): State<AppState>,
    Json(form): Json<UangSakuForm>,
) -> impl IntoResponse {
    info!("POST /api/uang-saku/transactions - request: {:?}", form);

    match state.uang_saku_service.create_transaction(form).await {
        Ok(response) => {
            let response = map_mutation(response, UangSakuMapper::to_view);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create uang saku transaction: {}", e);
            e.into_response()
        }
    }
}

/// Delete an uang saku transaction
pub async fn delete_uang_saku_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
) -> impl IntoResponse {
    info!("DELETE /api/uang-saku/transactions/{}", transaction_id);

    match state.uang_saku_service.delete_transaction(transaction_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete uang saku transaction {}: {}", transaction_id, e);
            e.into_response()
        }
    }
}

/// Download the (search-filtered) transaction history as CSV
pub async fn export_uang_saku_csv(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/uang-saku/transactions/export - query: {:?}", query);

    match state.export_service.export_uang_saku_csv(&query).await {
        Ok(export) => {
            info!("Exported {} uang saku rows to {}", export.row_count, export.filename);
            let disposition = format!("attachment; filename=\"{}\"", export.filename);
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                export.content,
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to export uang saku transactions: {}", e);
            e.into_response()
        }
    }
}

/// Balances of every santri, searchable by name, NIS or class
pub async fn list_balances(State(state): State<AppState>, Query(query): Query<ListQuery>) -> impl IntoResponse {
    info!("GET /api/uang-saku/balances - query: {:?}", query);

    match state.balance_service.all_balances().await {
        Ok(balances) => {
            let views: Vec<BalanceView> = balances.into_iter().map(UangSakuMapper::balance_to_view).collect();
            (StatusCode::OK, Json(list_page(&views, &query))).into_response()
        }
        Err(e) => {
            error!("Failed to compute uang saku balances: {}", e);
            e.into_response()
        }
    }
}

/// Current balance of one santri
pub async fn get_balance(State(state): State<AppState>, Path(santri_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/uang-saku/balances/{}", santri_id);

    match state.balance_service.balance_for(santri_id).await {
        Ok(balance) => (StatusCode::OK, Json(UangSakuMapper::balance_to_view(balance))).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;
    use axum::body::to_bytes;
    use shared::Page;

    #[tokio::test]
    async fn test_topup_then_balance_grows() {
        let state = AppState::from_seed(&SampleSeed);
        let form = UangSakuForm {
            santri_id: "3".to_string(),
            description: "Kiriman orang tua".to_string(),
            amount: "50000".to_string(),
            kind: "topup".to_string(),
            ..Default::default()
        };

        let response = create_uang_saku_transaction(State(state.clone()), Json(form))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = get_balance(State(state), Path(3)).await.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let view: BalanceView = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(view.raw_balance, 150_000);
        assert_eq!(view.balance, "Rp 150.000");
    }

    #[tokio::test]
    async fn test_balances_are_searchable() {
        let state = AppState::from_seed(&SampleSeed);
        let query = ListQuery {
            search: Some("siti".to_string()),
            ..Default::default()
        };

        let response = list_balances(State(state), Query(query)).await.into_response();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page: Page<BalanceView> = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].santri_name, "Siti Aminah");
    }

    #[tokio::test]
    async fn test_export_sets_attachment_headers() {
        let state = AppState::from_seed(&SampleSeed);
        let response = export_uang_saku_csv(State(state), Query(ListQuery::default()))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap().to_string();
        assert!(disposition.starts_with("attachment; filename=\"uang_saku_"));
        assert!(disposition.ends_with(".csv\""));

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.starts_with("id,tanggal,id_santri"));
        assert_eq!(body.lines().count(), 7);
    }

    #[tokio::test]
    async fn test_delete_missing_transaction_is_not_found() {
        let state = AppState::from_seed(&SampleSeed);
        let response = delete_uang_saku_transaction(State(state), Path(99)).await.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
