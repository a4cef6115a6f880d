pub mod auth;
pub mod catalog;
pub mod forms;
pub mod health;
pub mod view;
pub mod visit;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::infrastructure::session::{flash_middleware, session_layer};
use crate::infrastructure::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Auth
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::get_me))
        // Visits
        .route("/visits", get(visit::list_visits))
        .route(
            "/visits/create",
            get(visit::create_form).post(visit::create_visit),
        )
        .route("/visits/read/:id", get(visit::read_visit))
        .route("/visits/delete/:id", post(visit::delete_visit))
        .route(
            "/visits/edit/:id",
            get(visit::edit_form).post(visit::update_visit),
        )
        // Catalogs
        .route("/forests", get(catalog::list_forests))
        .route("/mushrooms", get(catalog::list_mushrooms))
        .layer(middleware::from_fn(flash_middleware))
        .layer(session_layer(state.session_ttl))
        .with_state(state)
}
