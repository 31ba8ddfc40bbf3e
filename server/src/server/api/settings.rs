//! Settings management API:
//!   GET /api/settings – all settings with defaults filled in
//!   PUT /api/settings – update settings and reload runtime config

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::app::SharedState;
use crate::config::{SettingInfo, SettingsManager};

use super::err_json;

/// GET /api/settings
pub async fn get_settings(
    State(state): State<SharedState>,
) -> Result<Json<Value>, (axum::http::StatusCode, Json<Value>)> {
    let sm = SettingsManager::new(state.db().clone());

    let all = sm
        .get_all_settings()
        .map_err(|e| err_json(500, &format!("Failed to get settings: {e}")))?;

    Ok(Json(json!({ "settings": settings_to_json(all) })))
}

/// PUT /api/settings
pub async fn update_settings(
    State(state): State<SharedState>,
    Json(body): Json<HashMap<String, String>>,
) -> Result<Json<Value>, (axum::http::StatusCode, Json<Value>)> {
    let sm = SettingsManager::new(state.db().clone());

    let mut updated = 0u32;
    for (key, value) in &body {
        sm.set_setting(key, value)
            .map_err(|e| err_json(400, &format!("{key}: {e}")))?;
        updated += 1;
    }

    // Reload runtime config
    state
        .reload_config()
        .await
        .map_err(|e| err_json(500, &format!("Failed to reload config: {e}")))?;

    let all = sm
        .get_all_settings()
        .map_err(|e| err_json(500, &format!("Failed to get settings: {e}")))?;

    Ok(Json(json!({
        "success": true,
        "updated": updated,
        "settings": settings_to_json(all),
    })))
}

fn settings_to_json(all: HashMap<String, SettingInfo>) -> HashMap<String, Value> {
    all.into_iter()
        .map(|(key, info)| {
            let val = json!({
                "key": info.key,
                "value": info.value,
                "type": info.setting_type,
                "required": info.required,
                "description": info.description,
                "has_value": info.has_value,
            });
            (key, val)
        })
        .collect()
}
