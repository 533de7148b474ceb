//! # REST API for User Management
//!
//! Endpoints for the admin and bendahara accounts.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use shared::{ListQuery, UserForm};
use tracing::{error, info};

use crate::AppState;

/// List users
pub async fn list_users(State(state): State<AppState>, Query(query): Query<ListQuery>) -> impl IntoResponse {
    info!("GET /api/users - query: {:?}", query);
    Json(state.user_service.list_users(&query).await)
}

/// Get a user by ID
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/users/{}", user_id);

    match state.user_service.get_user(user_id).await {
        Ok(user) => (StatusCode::OK, Json(user)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Create a new user
pub async fn create_user(State(state): State<AppState>, Json(form): Json<UserForm>) -> impl IntoResponse {
    info!("POST /api/users - request: {:?}", form);

    match state.user_service.create_user(form).await {
        Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to create user: {}", e);
            e.into_response()
        }
    }
}

/// Update an existing user
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<u64>,
    Json(form): Json<UserForm>,
) -> impl IntoResponse {
    info!("PUT /api/users/{} - request: {:?}", user_id, form);

    match state.user_service.update_user(user_id, form).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => {
            error!("Failed to update user {}: {}", user_id, e);
            e.into_response()
        }
    }
}

/// Delete a user
pub async fn delete_user(State(state): State<AppState>, Path(user_id): Path<u64>) -> impl IntoResponse {
    info!("DELETE /api/users/{}", user_id);

    match state.user_service.delete_user(user_id).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => {
            error!("Failed to delete user {}: {}", user_id, e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SampleSeed;

    fn form(email: &str) -> UserForm {
        UserForm {
            name: "Bendahara Baru".to_string(),
            email: email.to_string(),
            password: "rahasia123".to_string(),
            phone: "081299990000".to_string(),
            role: "bendahara-smp".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let state = AppState::from_seed(&SampleSeed);
        let response = create_user(State(state), Json(form("ADMIN@pesantren.id")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_create_user_returns_created() {
        let state = AppState::from_seed(&SampleSeed);
        let response = create_user(State(state), Json(form("baru@pesantren.id")))
            .await
            .into_response();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[test]
    fn test_form_debug_hides_password() {
        let rendered = format!("{:?}", form("baru@pesantren.id"));
        assert!(!rendered.contains("rahasia123"));
    }
}
