use std::collections::HashMap;

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;
use wheel_db::leaderboard::UNKNOWN_NAME;
use wheel_db::week;

use super::broadcast::broadcast_history_updated;
use super::{ApiResult, err_json, get_active_participants};

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

/// GET /api/history?limit=N — current scoring window, newest first.
pub async fn get_history(
    State(state): State<SharedState>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult {
    let default_limit = state.config().await.history_fetch_limit;
    let limit = query.limit.unwrap_or(default_limit);
    if limit < 0 {
        return Err(err_json(400, "Invalid limit"));
    }

    let window = week::current_window();
    let records = state
        .db()
        .wins_between(
            &window.start_utc().to_rfc3339(),
            &window.end_utc().to_rfc3339(),
            limit,
        )
        .map_err(|e| err_json(500, &e.to_string()))?;

    let participants = get_active_participants(&state)?;
    let by_id: HashMap<&str, _> = participants.iter().map(|p| (p.id.as_str(), p)).collect();

    let entries: Vec<_> = records
        .iter()
        .map(|record| {
            let participant = by_id.get(record.participant_id.as_str());
            json!({
                "id": record.id,
                "participant_id": record.participant_id,
                "name": participant.map_or(UNKNOWN_NAME, |p| p.name.as_str()),
                "image": participant.map_or("", |p| p.image.as_str()),
                "created_at": record.created_at,
            })
        })
        .collect();

    Ok(Json(json!({
        "window": { "start": window.start, "end": window.end },
        "history": entries,
        "count": entries.len(),
    })))
}

/// DELETE /api/history/{id}
pub async fn delete_history_entry(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ApiResult {
    if id <= 0 {
        return Err(err_json(400, "Invalid history ID"));
    }

    let changed = state
        .db()
        .deactivate_win(id)
        .map_err(|e| err_json(500, &e.to_string()))?;
    if changed == 0 {
        return Err(err_json(404, "History record not found"));
    }

    broadcast_history_updated(&state);
    Ok(Json(json!({ "success": true, "id": id })))
}

/// DELETE /api/history — soft delete the current week.
pub async fn clear_week_history(State(state): State<SharedState>) -> ApiResult {
    let window = week::current_window();
    let removed = state
        .db()
        .deactivate_wins_between(
            &window.start_utc().to_rfc3339(),
            &window.end_utc().to_rfc3339(),
        )
        .map_err(|e| err_json(500, &e.to_string()))?;

    broadcast_history_updated(&state);
    Ok(Json(json!({ "success": true, "removed": removed })))
}
