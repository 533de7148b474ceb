//! # REST API for Laundry
//!
//! Endpoints for the laundry service catalogue, laundry payment classes and
//! laundry orders.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{LaundryPaymentClassForm, LaundryServiceForm, LaundryTransactionForm, ListQuery};
use tracing::{error, info};

use super::mappers::{map_mutation, LaundryMapper};
use crate::AppState;

// Services

/// List laundry services
pub async fn list_laundry_services(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/laundry/services - query: {:?}", query);
    let page = state.laundry_catalog_service.list_services(&query).await;
    Json(page.map(LaundryMapper::service_to_view))
}

/// Get a laundry service by ID
pub async fn get_laundry_service(State(state): State<AppState>, Path(service_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/laundry/services/{}", service_id);

    match state.laundry_catalog_service.get_service(service_id).await {
        Ok(service) => (StatusCode::OK, Json(LaundryMapper::service_to_view(service))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new laundry service
pub async fn create_laundry_service(
    State(state): State<AppState>,
    Json(form): Json<LaundryServiceForm>,
) -> impl IntoResponse {
    info!("POST /api/laundry/services - request: {:?}", form);

    match state.laundry_catalog_service.create_service(form).await {
        Ok(response) => {
            let response = map_mutation(response, LaundryMapper::service_to_view);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create laundry service: {}", e);
            e.into_response()
        }
    }
}

/// Update an existing laundry service
pub async fn update_laundry_service(
    State(state): State<AppState>,
    Path(service_id): Path<u64>,
    Json(form): Json<LaundryServiceForm>,
) -> impl IntoResponse {
    info!("PUT /api/laundry/services/{} - request: {:?}", service_id, form);

    match state.laundry_catalog_service.update_service(service_id, form).await {
        Ok(response) => {
            let response = map_mutation(response, LaundryMapper::service_to_view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update laundry service {}: {}", service_id, e);
            e.into_response()
        }
    }
}

/// Delete a laundry service
pub async fn delete_laundry_service(State(state): State<AppState>, Path(service_id): Path<u64>) -> impl IntoResponse {
    info!("DELETE /api/laundry/services/{}", service_id);

    match state.laundry_catalog_service.delete_service(service_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete laundry service {}: {}", service_id, e);
            e.into_response()
        }
    }
}

// Payment classes

/// List laundry payment classes
pub async fn list_laundry_payment_classes(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/laundry/payment-classes - query: {:?}", query);
    let page = state.laundry_catalog_service.list_payment_classes(&query).await;
    Json(page.map(LaundryMapper::payment_class_to_view))
}

/// Get a laundry payment class by ID
pub async fn get_laundry_payment_class(
    State(state): State<AppState>,
    Path(class_id): Path<u64>,
) -> impl IntoResponse {
    info!("GET /api/laundry/payment-classes/{}", class_id);

    match state.laundry_catalog_service.get_payment_class(class_id).await {
        Ok(class) => (StatusCode::OK, Json(LaundryMapper::payment_class_to_view(class))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new laundry payment class
pub async fn create_laundry_payment_class(
    State(state): State<AppState>,
    Json(form): Json<LaundryPaymentClassForm>,
) -> impl IntoResponse {
    info!("POST /api/laundry/payment-classes - request: {:?}", form);

    match state.laundry_catalog_service.create_payment_class(form).await {
        Ok(response) => {
            let response = map_mutation(response, LaundryMapper::payment_class_to_view);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create laundry payment class: {}", e);
            e.into_response()
        }
    }
}

/// Update an existing laundry payment class
pub async fn update_laundry_payment_class(
    State(state): State<AppState>,
    Path(class_id): Path<u64>,
    Json(form): Json<LaundryPaymentClassForm>,
) -> impl IntoResponse {
    info!("PUT /api/laundry/payment-classes/{} - request: {:?}", class_id, form);

    match state.laundry_catalog_service.update_payment_class(class_id, form).await {
        Ok(response) => {
            let response = map_mutation(response, LaundryMapper::payment_class_to_view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update laundry payment class {}: {}", class_id, e);
            e.into_response()
        }
    }
}

/// Delete a laundry payment class
pub async fn delete_laundry_payment_class(
    State(state): State<AppState>,
    Path(class_id): Path<u64>,
) -> impl IntoResponse {
    info!("DELETE /api/laundry/payment-classes/{}", class_id);

    match state.laundry_catalog_service.delete_payment_class(class_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete laundry payment class {}: {}", class_id, e);
            e.into_response()
        }
    }
}

// Transactions

/// List laundry orders
pub async fn list_laundry_transactions(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> impl IntoResponse {
    info!("GET /api/laundry/transactions - query: {:?}", query);
    let page = state.laundry_transaction_service.list_transactions(&query).await;
    Json(page.map(LaundryMapper::transaction_to_view))
}

/// Get a laundry order by ID
pub async fn get_laundry_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
) -> impl IntoResponse {
    info!("GET /api/laundry/transactions/{}", transaction_id);

    match state.laundry_transaction_service.get_transaction(transaction_id).await {
        Ok(tx) => (StatusCode::OK, Json(LaundryMapper::transaction_to_view(tx))).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Record a new laundry order
pub async fn create_laundry_transaction(
    State(state): State<AppState>,
    Json(form): Json<LaundryTransactionForm>,
) -> impl IntoResponse {
    info!("POST /api/laundry/transactions - request: {:?}", form);

    match state.laundry_transaction_service.create_transaction(form).await {
        Ok(response) => {
            info!(
                "Laundry transaction {} recorded: {}",
                response.item.id, response.item.total_price
            );
            let response = map_mutation(response, LaundryMapper::transaction_to_view);
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to create laundry transaction: {}", e);
            e.into_response()
        }
    }
}

/// Update an existing laundry order
pub async fn update_laundry_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
    Json(form): Json<LaundryTransactionForm>,
) -> impl IntoResponse {
    info!("PUT /api/laundry/transactions/{} - request: {:?}", transaction_id, form);

    match state
        .laundry_transaction_service
        .update_transaction(transaction_id, form)
        .await
    {
        Ok(response) => {
            let response = map_mutation(response, LaundryMapper::transaction_to_view);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to update laundry transaction {}: {}", transaction_id, e);
            e.into_response()
        }
    }
}

/// Delete a laundry order
pub async fn delete_laundry_transaction(
    State(state): State<AppState>,
    Path(transaction_id): Path<u64>,
) -> impl IntoResponse {
    info!("DELETE /api/laundry/transactions/{}", transaction_id);

    match state.laundry_transaction_service.delete_transaction(transaction_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete laundry transaction {}: {}", transaction_id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;

    #[tokio::test]
    async fn test_transaction_for_unknown_service_is_unprocessable() {
        let state = AppState::from_seed(&SampleSeed);
        let form = LaundryTransactionForm {
            santri_id: "1".to_string(),
            service_id: "42".to_string(),
            weight: "2".to_string(),
            payment_method: "cash".to_string(),
            ..Default::default()
        };

        let response = create_laundry_transaction(State(state), Json(form))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_create_transaction_returns_created() {
        let state = AppState::from_seed(&SampleSeed);
        let form = LaundryTransactionForm {
            santri_id: "2".to_string(),
            service_id: "1".to_string(),
            weight: "3".to_string(),
            date: "2024-02-01".to_string(),
            payment_method: "cash".to_string(),
            ..Default::default()
        };

        let response = create_laundry_transaction(State(state), Json(form))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }
}
