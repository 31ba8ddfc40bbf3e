use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use serde::Deserialize;
use serde_json::json;

use crate::app::SharedState;
use wheel_db::leaderboard::{Standing, UNKNOWN_NAME, rank_standings};

use super::{ApiResult, err_json, get_active_participants};

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub limit: Option<usize>,
}

/// GET /api/leaderboard?limit=N — all-time standings, best first.
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    Query(query): Query<LeaderboardQuery>,
) -> ApiResult {
    let counts = state
        .db()
        .win_counts_all_time()
        .map_err(|e| err_json(500, &e.to_string()))?;

    let participants = get_active_participants(&state)?;
    let by_id: HashMap<&str, _> = participants.iter().map(|p| (p.id.as_str(), p)).collect();

    let standings: Vec<Standing> = counts
        .into_iter()
        .map(|(participant_id, wins)| {
            let participant = by_id.get(participant_id.as_str());
            Standing {
                name: participant.map_or(UNKNOWN_NAME.to_string(), |p| p.name.clone()),
                image: participant.map_or(String::new(), |p| p.image.clone()),
                participant_id,
                wins,
                rank: 0,
            }
        })
        .collect();

    let mut ranked = rank_standings(standings);
    if let Some(limit) = query.limit {
        ranked.truncate(limit);
    }

    Ok(Json(json!({
        "leaderboard": ranked,
        "count": ranked.len(),
    })))
}
