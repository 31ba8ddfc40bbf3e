use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use crate::app::SharedState;

use super::{ApiResult, err_json};

#[derive(Debug, Deserialize)]
pub struct WheelSettingsUpdateRequest {
    pub decay: Option<f64>,
    pub rotations: Option<i32>,
    pub spin_duration_ms: Option<i64>,
    pub item_width: Option<f64>,
    pub item_gap: Option<f64>,
    pub viewport_max_width: Option<f64>,
}

/// GET /api/wheel/settings
pub async fn get_wheel_settings(State(state): State<SharedState>) -> ApiResult {
    let settings = state
        .db()
        .get_wheel_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(
        serde_json::to_value(settings).unwrap_or_else(|_| serde_json::json!({})),
    ))
}

/// PUT /api/wheel/settings
pub async fn update_wheel_settings(
    State(state): State<SharedState>,
    Json(body): Json<WheelSettingsUpdateRequest>,
) -> ApiResult {
    let mut settings = state
        .db()
        .get_wheel_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;

    if let Some(decay) = body.decay {
        if !(decay > 0.0 && decay < 1.0) {
            return Err(err_json(400, "decay must be between 0 and 1 exclusive"));
        }
        settings.decay = decay;
    }
    if let Some(rotations) = body.rotations {
        if rotations < 1 {
            return Err(err_json(400, "rotations must be at least 1"));
        }
        settings.rotations = rotations;
    }
    if let Some(spin_duration_ms) = body.spin_duration_ms {
        if !(500..=60_000).contains(&spin_duration_ms) {
            return Err(err_json(400, "spin_duration_ms must be between 500 and 60000"));
        }
        settings.spin_duration_ms = spin_duration_ms;
    }
    if let Some(item_width) = body.item_width {
        if item_width <= 0.0 {
            return Err(err_json(400, "item_width must be positive"));
        }
        settings.item_width = item_width;
    }
    if let Some(item_gap) = body.item_gap {
        if item_gap < 0.0 {
            return Err(err_json(400, "item_gap must not be negative"));
        }
        settings.item_gap = item_gap;
    }
    if let Some(viewport_max_width) = body.viewport_max_width {
        if viewport_max_width < settings.item_step() {
            return Err(err_json(400, "viewport_max_width must fit at least one item"));
        }
        settings.viewport_max_width = viewport_max_width;
    }

    state
        .db()
        .update_wheel_settings(&settings)
        .map_err(|e| err_json(500, &e.to_string()))?;

    let updated = state
        .db()
        .get_wheel_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;

    Ok(Json(
        serde_json::to_value(updated).unwrap_or_else(|_| serde_json::json!({})),
    ))
}
