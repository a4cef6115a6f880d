use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::api::view::error_response;
use crate::infrastructure::AppState;
use crate::services::catalog_service;

#[utoipa::path(
    get,
    path = "/forests",
    responses((status = 200, description = "All forests, ordered by name"))
)]
pub async fn list_forests(State(state): State<AppState>) -> impl IntoResponse {
    match catalog_service::list_forests(&state).await {
        Ok(forests) => (StatusCode::OK, Json(json!({ "forests": forests }))).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error: {}", e),
        ),
    }
}

#[utoipa::path(
    get,
    path = "/mushrooms",
    responses((status = 200, description = "All mushrooms, ordered by name"))
)]
pub async fn list_mushrooms(State(state): State<AppState>) -> impl IntoResponse {
    match catalog_service::list_mushrooms(&state).await {
        Ok(mushrooms) => (StatusCode::OK, Json(json!({ "mushrooms": mushrooms }))).into_response(),
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Database error: {}", e),
        ),
    }
}
