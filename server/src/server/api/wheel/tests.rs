use std::path::PathBuf;
use std::time::Duration;

use axum::extract::{Path, State};

use crate::app::{DrawPhase, SharedState};
use crate::config::AppConfig;
use wheel_db::Database;
use wheel_db::participants::Participant;
use wheel_db::wheel_settings::WheelSettings;

use super::lifecycle::{acknowledge_winner, spin};
use super::selection::{select_all, toggle_selected};

fn test_state() -> SharedState {
    let db = Database::open_in_memory().expect("failed to create test db");
    SharedState::new(db, AppConfig::default(), PathBuf::from("."))
}

fn seed_participants(state: &SharedState, count: usize) {
    for i in 0..count {
        state
            .db()
            .add_participant(&Participant {
                id: format!("u{i}"),
                name: format!("Player {i}"),
                image: String::new(),
            })
            .unwrap();
    }
}

fn shorten_spin(state: &SharedState) {
    let settings = WheelSettings {
        spin_duration_ms: 500,
        ..WheelSettings::default()
    };
    state.db().update_wheel_settings(&settings).unwrap();
}

#[tokio::test]
async fn spin_requires_a_selection() {
    let state = test_state();
    seed_participants(&state, 2);

    let err = spin(State(state), None).await.unwrap_err();
    assert_eq!(err.0, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn toggle_rejects_unknown_participants() {
    let state = test_state();
    seed_participants(&state, 1);

    let err = toggle_selected(State(state.clone()), Path("nope".to_string()))
        .await
        .unwrap_err();
    assert_eq!(err.0, axum::http::StatusCode::NOT_FOUND);

    let ok = toggle_selected(State(state), Path("u0".to_string()))
        .await
        .unwrap();
    assert_eq!(ok.0["selected"], serde_json::json!(true));
}

#[tokio::test]
async fn spin_walks_the_state_machine_and_persists_the_win() {
    let state = test_state();
    seed_participants(&state, 3);
    shorten_spin(&state);
    select_all(State(state.clone())).await.unwrap();

    let response = spin(State(state.clone()), None).await.unwrap();
    assert_eq!(response.0["success"], serde_json::json!(true));
    let winner_id = response.0["winner"]["id"].as_str().unwrap().to_string();

    // A second spin while the first is in flight is rejected
    assert_eq!(state.draw().read().await.phase, DrawPhase::Spinning);
    let err = spin(State(state.clone()), None).await.unwrap_err();
    assert_eq!(err.0, axum::http::StatusCode::CONFLICT);

    // Wait out the landing timer (500ms transition + settle margin)
    tokio::time::sleep(Duration::from_millis(1200)).await;

    {
        let draw = state.draw().read().await;
        assert_eq!(draw.phase, DrawPhase::Landed);
        assert_eq!(draw.winner.as_ref().unwrap().id, winner_id);
    }

    let counts = state.db().win_counts_all_time().unwrap();
    assert_eq!(counts, vec![(winner_id, 1)]);

    // Acknowledge returns the machine to idle; a second ack has nothing to do
    acknowledge_winner(State(state.clone())).await.unwrap();
    assert_eq!(state.draw().read().await.phase, DrawPhase::Idle);
    let err = acknowledge_winner(State(state)).await.unwrap_err();
    assert_eq!(err.0, axum::http::StatusCode::BAD_REQUEST);
}
