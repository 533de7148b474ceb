//! # REST API for SPP and Syahriah classes
//!
//! Listing and add/edit/delete of the fee classes behind both payment screens.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{FeeClassForm, FeeKind, ListQuery};
use tracing::{error, info};

use super::mappers::{map_mutation, FeeClassMapper};
use crate::AppState;

/// List the SPP or Syahriah classes
pub async fn list_fee_classes(
    State(state): State<AppState>,
    Path(kind): Path<FeeKind>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/fee-classes/{} - query: {:?}", kind.as_str(), query);
    let page = state.fee_class_service.list_classes(kind, &query).await;
    Json(page.map(FeeClassMapper::to_view))
}

/// Get a fee class by ID
pub async fn get_fee_class(
    State(state): State<AppState>,
    Path((kind, class_id)): Path<(FeeKind, u64)>,
) -> impl IntoResponse {
    info!("GET /api/fee-classes/{}/{}", kind.as_str(), class_id);

    match state.fee_class_service.get_class(kind, class_id).await {
        Ok(class) => (StatusCode::OK, Json(FeeClassMapper::to_view(class))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new fee class
pub async fn create_fee_class(
    State(state): State<AppState>,
    Path(kind): Path<FeeKind>,
    Json(form): Json<FeeClassForm>,
) -> impl IntoResponse {
    info!("POST /api/fee-classes/{} - request: {:?}", kind.as_str(), form);

    match state.fee_class_service.create_class(kind, form).await {
        Ok(response) => {
            let response = map_mutation(response, FeeClassMapper::to_view);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create {} class: {}", kind.label(), e);
            e.into_response()
        }
    }
}

/// Update an existing fee class
pub async fn update_fee_class(
    State(state): State<AppState>,
    Path((kind, class_id)): Path<(FeeKind, u64)>,
    Json(form): Json<FeeClassForm>,
) -> impl IntoResponse {
    info!("PUT /api/fee-classes/{}/{} - request: {:?}", kind.as_str(), class_id, form);

    match state.fee_class_service.update_class(kind, class_id, form).await {
        Ok(response) => {
            let response = map_mutation(response, FeeClassMapper::to_view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update {} class {}: {}", kind.label(), class_id, e);
            e.into_response()
        }
    }
}

/// Delete a fee class
pub async fn delete_fee_class(
    State(state): State<AppState>,
    Path((kind, class_id)): Path<(FeeKind, u64)>,
) -> impl IntoResponse {
    info!("DELETE /api/fee-classes/{}/{}", kind.as_str(), class_id);

    match state.fee_class_service.delete_class(kind, class_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete {} class {}: {}", kind.label(), class_id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;

    #[tokio::test]
    async fn test_syahriah_class_is_not_reachable_as_spp() {
        let state = AppState::from_seed(&SampleSeed);
        let response = get_fee_class(State(state.clone()), Path((FeeKind::Spp, 4)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = get_fee_class(State(state), Path((FeeKind::Syahriah, 4)))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_with_zero_amount_is_rejected() {
        let state = AppState::from_seed(&SampleSeed);
        let form = FeeClassForm {
            name: "Class XIII".to_string(),
            monthly: "0".to_string(),
            term_amount: "900000".to_string(),
        };
        let response = create_fee_class(State(state), Path(FeeKind::Spp), Json(form))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
