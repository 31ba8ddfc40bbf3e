//! Periodic maintenance tasks.

use std::time::Duration;

use crate::app::SharedState;
use wheel_db::week;

/// Purges win records that were soft-deleted and have aged out of the
/// current scoring window. Active records are never touched, so the
/// all-time leaderboard keeps its history.
pub async fn history_rollover_loop(state: SharedState) {
    let interval_secs = state.config().await.rollover_interval_secs.max(60);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));

    loop {
        tokio::select! {
            _ = state.shutdown_token().cancelled() => break,
            _ = ticker.tick() => {}
        }

        let cutoff = week::current_window().start_utc().to_rfc3339();
        match state.db().purge_inactive_before(&cutoff) {
            Ok(0) => {}
            Ok(purged) => tracing::info!(purged, "Purged expired win records"),
            Err(error) => tracing::warn!(%error, "History rollover failed"),
        }
    }
}
