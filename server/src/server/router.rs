use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::cors::CorsLayer;

use super::{api, websocket};
use crate::app::SharedState;

/// Create the axum router with all routes.
pub fn create_router(state: SharedState) -> Router {
    Router::new()
        // --- Core ---
        .route("/status", get(status_handler))
        .route("/ws", get(websocket::ws_handler))
        // --- Settings ---
        .route("/api/settings", get(api::settings::get_settings).put(api::settings::update_settings))
        // --- Participants ---
        .route("/api/participants", get(api::wheel::get_participants).post(api::wheel::add_participant))
        .route("/api/participants/{id}", delete(api::wheel::remove_participant))
        // --- Selection ---
        .route("/api/wheel/selection", get(api::wheel::get_selection))
        .route("/api/wheel/selection/all", post(api::wheel::select_all))
        .route("/api/wheel/selection/clear", post(api::wheel::clear_selection))
        .route("/api/wheel/selection/{id}/toggle", post(api::wheel::toggle_selected))
        // --- Wheel ---
        .route("/api/wheel", get(api::wheel::get_wheel))
        .route("/api/wheel/spin", post(api::wheel::spin))
        .route("/api/wheel/ack", post(api::wheel::acknowledge_winner))
        .route("/api/wheel/settings", get(api::wheel::get_wheel_settings).put(api::wheel::update_wheel_settings))
        // --- History & leaderboard ---
        .route("/api/history", get(api::wheel::get_history).delete(api::wheel::clear_week_history))
        .route("/api/history/{id}", delete(api::wheel::delete_history_entry))
        .route("/api/leaderboard", get(api::wheel::get_leaderboard))
        // --- Middleware ---
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn status_handler() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": "1.0.0"
    }))
}
