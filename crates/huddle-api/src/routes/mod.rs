//! Route definitions
//!
//! API routes are mounted under /api/v1; health checks live at the root.

use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::handlers::{devices, health, keys, typing};
use crate::state::AppState;

/// Create the API router (health routes are separate so they skip rate limiting)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(typing_routes())
        .merge(key_routes())
        .merge(device_routes())
}

/// Typing indicator routes
fn typing_routes() -> Router<AppState> {
    Router::new().route(
        "/channels/:channel_id/typing",
        post(typing::start_typing)
            .delete(typing::stop_typing)
            .get(typing::list_typing),
    )
}

/// Conversation key routes
fn key_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/keys/:scope/:scope_id",
            get(keys::get_key).put(keys::save_keys),
        )
        .route("/keys/:scope/:scope_id/devices", get(keys::list_scope_devices))
}

/// Device directory routes
fn device_routes() -> Router<AppState> {
    Router::new()
        .route("/devices", post(devices::register_device))
        .route("/devices/:device_id", delete(devices::remove_device))
        .route("/users/@me/devices", get(devices::list_my_devices))
        .route("/users/:user_id/devices", get(devices::list_user_devices))
}
