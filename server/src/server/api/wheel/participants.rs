use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;
use wheel_db::participants::Participant;

use super::broadcast::{broadcast_participant_added, broadcast_participants_updated};
use super::{ApiResult, err_json, get_active_participants};

/// GET /api/participants
pub async fn get_participants(State(state): State<SharedState>) -> ApiResult {
    let participants = get_active_participants(&state)?;

    Ok(Json(json!({
        "participants": participants,
        "count": participants.len(),
    })))
}

#[derive(Debug, Deserialize)]
pub struct AddParticipantRequest {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub id: Option<String>,
    /// Ad-hoc players join the current selection immediately.
    #[serde(default)]
    pub temporary: bool,
}

/// POST /api/participants
pub async fn add_participant(
    State(state): State<SharedState>,
    Json(body): Json<AddParticipantRequest>,
) -> ApiResult {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(err_json(400, "Enter a player name"));
    }

    let id = body
        .id
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.temporary {
                format!("temp-{}", uuid::Uuid::new_v4())
            } else {
                uuid::Uuid::new_v4().to_string()
            }
        });

    let image = if body.image.trim().is_empty() {
        state.config().await.default_avatar_url.clone()
    } else {
        body.image.trim().to_string()
    };

    let participant = Participant {
        id,
        name: name.to_string(),
        image,
    };

    state
        .db()
        .add_participant(&participant)
        .map_err(|e| err_json(500, &e.to_string()))?;

    if body.temporary {
        state.selection().write().await.select(&participant.id);
    }

    let latest = get_active_participants(&state)?;
    broadcast_participant_added(&state, &participant);
    broadcast_participants_updated(&state, &latest);

    Ok(Json(json!({
        "success": true,
        "participant": participant,
    })))
}

/// DELETE /api/participants/{id}
pub async fn remove_participant(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult {
    state
        .db()
        .remove_participant(&id)
        .map_err(|e| err_json(500, &e.to_string()))?;

    state.selection().write().await.deselect(&id);

    let latest = get_active_participants(&state)?;
    broadcast_participants_updated(&state, &latest);

    Ok(Json(json!({ "success": true })))
}
