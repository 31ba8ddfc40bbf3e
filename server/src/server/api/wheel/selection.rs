use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;
use crate::selection::filter_by_name;

use super::broadcast::broadcast_selection_updated;
use super::{ApiResult, err_json, get_active_participants};

#[derive(Debug, Deserialize)]
pub struct SelectionQuery {
    pub q: Option<String>,
}

/// GET /api/wheel/selection?q=name
pub async fn get_selection(
    State(state): State<SharedState>,
    Query(query): Query<SelectionQuery>,
) -> ApiResult {
    let participants = get_active_participants(&state)?;
    let filtered = filter_by_name(&participants, query.q.as_deref().unwrap_or(""));
    let selection = state.selection().read().await;

    Ok(Json(json!({
        "participants": filtered,
        "matched": filtered.len(),
        "selected_ids": selection.ids(),
        "selected_count": selection.len(),
    })))
}

/// POST /api/wheel/selection/{id}/toggle
pub async fn toggle_selected(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult {
    let known = state
        .db()
        .get_participant(&id)
        .map_err(|e| err_json(500, &e.to_string()))?;
    if known.is_none() {
        return Err(err_json(404, "Participant not found"));
    }

    let (selected, selected_ids) = {
        let mut selection = state.selection().write().await;
        let selected = selection.toggle(&id);
        (selected, selection.ids())
    };

    broadcast_selection_updated(&state, &selected_ids);

    Ok(Json(json!({
        "success": true,
        "id": id,
        "selected": selected,
        "selected_count": selected_ids.len(),
    })))
}

/// POST /api/wheel/selection/all
pub async fn select_all(State(state): State<SharedState>) -> ApiResult {
    let participants = get_active_participants(&state)?;

    let selected_ids = {
        let mut selection = state.selection().write().await;
        selection.select_all(&participants);
        selection.ids()
    };

    broadcast_selection_updated(&state, &selected_ids);

    Ok(Json(json!({
        "success": true,
        "selected_count": selected_ids.len(),
    })))
}

/// POST /api/wheel/selection/clear
pub async fn clear_selection(State(state): State<SharedState>) -> ApiResult {
    {
        let mut selection = state.selection().write().await;
        selection.clear();
    }

    broadcast_selection_updated(&state, &[]);

    Ok(Json(json!({ "success": true, "selected_count": 0 })))
}
