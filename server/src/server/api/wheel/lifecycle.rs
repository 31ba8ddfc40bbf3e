use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::json;

use crate::app::{DrawPhase, SharedState};

use wheel_db::engine;
use wheel_db::participants::Participant;
use wheel_db::strip;
use wheel_db::week;

use super::broadcast::{broadcast_spin_started, broadcast_wheel_landed, broadcast_winner_ack};
use super::{ApiResult, err_json, get_active_participants, selected_participants};

/// Extra wait past the scroll transition before the strip counts as landed.
const SETTLE_MS: u64 = 200;

#[derive(Debug, Default, Deserialize)]
pub struct SpinRequest {
    /// Visible strip width on the triggering client; clamped to the
    /// configured maximum.
    pub viewport_width: Option<f64>,
}

/// GET /api/wheel
pub async fn get_wheel(State(state): State<SharedState>) -> ApiResult {
    let participants = get_active_participants(&state)?;
    let settings = state
        .db()
        .get_wheel_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;

    let selected_ids = state.selection().read().await.ids();
    let draw = state.draw().read().await;

    Ok(Json(json!({
        "participants": participants,
        "count": participants.len(),
        "selected_ids": selected_ids,
        "phase": draw.phase,
        "winner": draw.winner,
        "settings": settings,
    })))
}

/// POST /api/wheel/spin
pub async fn spin(
    State(state): State<SharedState>,
    body: Option<Json<SpinRequest>>,
) -> ApiResult {
    let Json(request) = body.unwrap_or_default();

    let items = selected_participants(&state).await?;
    if items.is_empty() {
        return Err(err_json(400, "Select at least one participant before spinning"));
    }

    let settings = state
        .db()
        .get_wheel_settings()
        .map_err(|e| err_json(500, &e.to_string()))?;

    let window = week::current_window();
    let win_counts = state
        .db()
        .win_counts_between(
            &window.start_utc().to_rfc3339(),
            &window.end_utc().to_rfc3339(),
        )
        .map_err(|e| err_json(500, &e.to_string()))?;

    let outcome = engine::pick_winner(&items, &win_counts, settings.decay)
        .map_err(|e| err_json(400, &e.to_string()))?;

    let repeat = strip::repeat_factor(items.len());
    let item_step = settings.item_step();
    let viewport_width = request
        .viewport_width
        .unwrap_or(settings.viewport_max_width)
        .min(settings.viewport_max_width)
        .max(item_step);
    let plan = strip::plan_spin(
        outcome.winner_index,
        items.len(),
        repeat,
        settings.rotations.max(1) as usize,
        item_step,
        viewport_width,
    );
    let sequence = strip::build_sequence(&items, repeat);
    let landing_index = strip::landing_index(plan.final_index, sequence.len());

    let spin_seq = {
        let mut draw = state.draw().write().await;
        if draw.phase == DrawPhase::Spinning {
            return Err(err_json(409, "A draw is already in progress"));
        }
        draw.phase = DrawPhase::Spinning;
        draw.winner = None;
        draw.spin_seq += 1;
        draw.spin_seq
    };

    broadcast_spin_started(&state, &sequence, &plan, settings.spin_duration_ms);

    let landing_state = state.clone();
    let winner = outcome.winner.clone();
    let rest_offset_px = plan.rest_offset_px;
    let duration_ms = settings.spin_duration_ms.max(0) as u64 + SETTLE_MS;
    tokio::spawn(async move {
        land_after(landing_state, winner, rest_offset_px, spin_seq, duration_ms).await;
    });

    Ok(Json(json!({
        "success": true,
        "winner": outcome.winner,
        "winner_index": outcome.winner_index,
        "landing_index": landing_index,
        "total_weight": outcome.total_weight,
        "weights": outcome.weights,
        "plan": plan,
        "sequence_len": sequence.len(),
        "duration_ms": settings.spin_duration_ms,
        "easing": strip::SPIN_EASING,
    })))
}

/// Timer half of a spin: marks the draw landed, persists the win record, and
/// tells clients to apply the silent offset reset.
async fn land_after(
    state: SharedState,
    winner: Participant,
    rest_offset_px: f64,
    spin_seq: u64,
    duration_ms: u64,
) {
    tokio::time::sleep(std::time::Duration::from_millis(duration_ms)).await;

    {
        let mut draw = state.draw().write().await;
        if draw.spin_seq != spin_seq {
            // A newer spin superseded this timer.
            return;
        }
        draw.phase = DrawPhase::Landed;
        draw.winner = Some(winner.clone());
    }

    let landed_at = chrono::Utc::now().to_rfc3339();
    // The in-memory result stands even if the write fails; no rollback.
    if let Err(error) = state.db().record_win(&winner.id, &landed_at) {
        tracing::warn!(%error, participant_id = %winner.id, "Failed to persist win record");
    }

    broadcast_wheel_landed(&state, &winner, rest_offset_px, &landed_at);
}

/// POST /api/wheel/ack
pub async fn acknowledge_winner(State(state): State<SharedState>) -> ApiResult {
    {
        let mut draw = state.draw().write().await;
        if draw.phase != DrawPhase::Landed {
            return Err(err_json(400, "No landed draw to acknowledge"));
        }
        draw.phase = DrawPhase::Idle;
        draw.winner = None;
    }

    broadcast_winner_ack(&state);
    Ok(Json(json!({ "success": true })))
}
