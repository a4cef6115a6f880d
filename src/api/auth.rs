use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::api::view::error_response;
use crate::infrastructure::{AppState, Session};
use crate::services::hunter_service;

#[derive(Deserialize)]
pub struct LoginRequest {
    nickname: String,
    password: String,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    responses(
        (status = 200, description = "Hunter stored in the session"),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> impl IntoResponse {
    tracing::info!("Login attempt for hunter: {}", payload.nickname);

    let hunter =
        match hunter_service::authenticate(&state, &payload.nickname, &payload.password).await {
            Ok(Some(hunter)) => hunter,
            Ok(None) => {
                return error_response(StatusCode::UNAUTHORIZED, "Invalid credentials");
            }
            Err(e) => {
                tracing::error!("Login failed for {}: {}", payload.nickname, e);
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
            }
        };

    if let Err(e) = session.log_in(&hunter).await {
        tracing::error!("Failed to store hunter in session: {}", e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
    }

    tracing::info!("Hunter {} logged in", hunter.nickname);
    (StatusCode::OK, Json(json!({ "hunter": hunter }))).into_response()
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    responses((status = 200, description = "Hunter removed from the session"))
)]
pub async fn logout(session: Session) -> impl IntoResponse {
    if let Some(hunter) = session.user().await {
        tracing::info!("Hunter {} logged out", hunter.nickname);
    }
    session.clear_user().await;
    (StatusCode::OK, Json(json!({ "message": "Logged out" })))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    responses(
        (status = 200, description = "The logged-in hunter"),
        (status = 401, description = "No hunter is logged in")
    )
)]
pub async fn get_me(session: Session) -> impl IntoResponse {
    match session.user().await {
        Some(hunter) => (StatusCode::OK, Json(json!({ "hunter": hunter }))).into_response(),
        None => error_response(StatusCode::UNAUTHORIZED, "Authentication required"),
    }
}
