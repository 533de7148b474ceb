//! # REST API for Santri Management
//!
//! Endpoints for listing, creating, retrieving, updating and deleting santri.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{ListQuery, SantriForm};
use tracing::{error, info};

use crate::AppState;

/// List santri
pub async fn list_santri(State(state): State<AppState>, Query(query): Query<ListQuery>) -> impl IntoResponse {
    info!("GET /api/santri - query: {:?}", query);
    Json(state.santri_service.list_santri(&query).await)
}

/// Get a santri by ID
pub async fn get_santri(State(state): State<AppState>, Path(santri_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/santri/{}", santri_id);

    match state.santri_service.get_santri(santri_id).await {
        Ok(santri) => (StatusCode::OK, Json(santri)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new santri
pub async fn create_santri(State(state): State<AppState>, Json(form): Json<SantriForm>) -> impl IntoResponse {
    info!("POST /api/santri - request: {:?}", form);

    match state.santri_service.create_santri(form).await {
        Ok(response) => {
            info!("Santri created with id {}", response.item.id);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create santri: {}", e);
            e.into_response()
        }
    }
}

/// Update an existing santri
pub async fn update_santri(
    State(state): State<AppState>,
    Path(santri_id): Path<u64>,
    Json(form): Json<SantriForm>,
) -> impl IntoResponse {
    info!("PUT /api/santri/{} - request: {:?}", santri_id, form);

    match state.santri_service.update_santri(santri_id, form).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update santri {}: {}", santri_id, e);
            e.into_response()
        }
    }
}

/// Delete a santri
pub async fn delete_santri(State(state): State<AppState>, Path(santri_id): Path<u64>) -> impl IntoResponse {
    info!("DELETE /api/santri/{}", santri_id);

    match state.santri_service.delete_santri(santri_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete santri {}: {}", santri_id, e);
            e.into_response()
        }
    }
}
