use serde_json::json;

use crate::app::SharedState;

use wheel_db::participants::Participant;
use wheel_db::strip::{SPIN_EASING, SpinPlan, StripCell};

pub(super) fn broadcast_participant_added(state: &SharedState, participant: &Participant) {
    let msg = json!({ "type": "wheel_participant_added", "data": participant });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_participants_updated(state: &SharedState, participants: &[Participant]) {
    let msg = json!({
        "type": "wheel_participants_updated",
        "data": { "participants": participants }
    });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_selection_updated(state: &SharedState, selected_ids: &[String]) {
    let msg = json!({
        "type": "wheel_selection_updated",
        "data": { "selected_ids": selected_ids }
    });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_spin_started(
    state: &SharedState,
    sequence: &[StripCell],
    plan: &SpinPlan,
    duration_ms: i64,
) {
    let msg = json!({
        "type": "wheel_spin_started",
        "data": {
            "sequence": sequence,
            "plan": plan,
            "duration_ms": duration_ms,
            "easing": SPIN_EASING,
            "started_at": chrono::Utc::now().to_rfc3339(),
        }
    });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_wheel_landed(
    state: &SharedState,
    winner: &Participant,
    rest_offset_px: f64,
    landed_at: &str,
) {
    let msg = json!({
        "type": "wheel_landed",
        "data": {
            "winner": winner,
            "rest_offset_px": rest_offset_px,
            "landed_at": landed_at,
        }
    });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_winner_ack(state: &SharedState) {
    let msg = json!({ "type": "wheel_winner_ack", "data": null });
    let _ = state.ws_sender().send(msg.to_string());
}

pub(super) fn broadcast_history_updated(state: &SharedState) {
    let msg = json!({
        "type": "wheel_history_updated",
        "data": { "updated_at": chrono::Utc::now().to_rfc3339() }
    });
    let _ = state.ws_sender().send(msg.to_string());
}
