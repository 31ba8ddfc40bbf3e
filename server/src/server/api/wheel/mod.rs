//! Wheel draw API.

use axum::Json;
use serde_json::Value;

use crate::app::SharedState;
use wheel_db::participants::Participant;

use super::err_json;

mod broadcast;
mod history;
mod leaderboard;
mod lifecycle;
mod participants;
mod selection;
mod settings;
#[cfg(test)]
mod tests;

pub use history::{clear_week_history, delete_history_entry, get_history};
pub use leaderboard::get_leaderboard;
pub use lifecycle::{acknowledge_winner, get_wheel, spin};
pub use participants::{add_participant, get_participants, remove_participant};
pub use selection::{clear_selection, get_selection, select_all, toggle_selected};
pub use settings::{get_wheel_settings, update_wheel_settings};

type ApiResult = Result<Json<Value>, (axum::http::StatusCode, Json<Value>)>;

fn get_active_participants(
    state: &SharedState,
) -> Result<Vec<Participant>, (axum::http::StatusCode, Json<Value>)> {
    state
        .db()
        .get_participants()
        .map_err(|e| err_json(500, &e.to_string()))
}

/// The selected subset of the directory, in directory order.
async fn selected_participants(
    state: &SharedState,
) -> Result<Vec<Participant>, (axum::http::StatusCode, Json<Value>)> {
    let participants = get_active_participants(state)?;
    let selection = state.selection().read().await;
    Ok(selection.selected(&participants))
}
