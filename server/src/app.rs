use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;
use wheel_db::Database;
use wheel_db::participants::Participant;

use crate::config::{AppConfig, SettingsManager};
use crate::selection::SelectionSet;

/// Draw lifecycle. A spin is accepted from `Idle` or `Landed`; `Spinning`
/// rejects a new draw until the landing timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    Idle,
    Spinning,
    Landed,
}

/// Mutable draw state, owned by [`SharedState`].
#[derive(Debug, Clone)]
pub struct DrawRuntime {
    pub phase: DrawPhase,
    pub winner: Option<Participant>,
    /// Monotonic spin counter; a landing timer only applies if its spin is
    /// still the latest one.
    pub spin_seq: u64,
}

impl Default for DrawRuntime {
    fn default() -> Self {
        Self {
            phase: DrawPhase::Idle,
            winner: None,
            spin_seq: 0,
        }
    }
}

/// Application shared state accessible from all axum handlers and tasks.
#[derive(Clone)]
pub struct SharedState {
    inner: Arc<SharedStateInner>,
}

struct SharedStateInner {
    /// Broadcast channel for WebSocket messages
    ws_tx: broadcast::Sender<String>,
    /// Application configuration (reloadable)
    config: RwLock<AppConfig>,
    /// Database handle
    db: Database,
    /// Data directory path
    data_dir: PathBuf,
    /// Participants picked for the next spin
    selection: RwLock<SelectionSet>,
    /// Draw state machine
    draw: RwLock<DrawRuntime>,
    /// Cooperative shutdown signal
    shutdown: CancellationToken,
}

impl SharedState {
    /// Create shared state from an already-opened database and loaded config.
    pub fn new(db: Database, config: AppConfig, data_dir: PathBuf) -> Self {
        let (ws_tx, _) = broadcast::channel(2048);

        Self {
            inner: Arc::new(SharedStateInner {
                ws_tx,
                config: RwLock::new(config),
                db,
                data_dir,
                selection: RwLock::new(SelectionSet::default()),
                draw: RwLock::new(DrawRuntime::default()),
                shutdown: CancellationToken::new(),
            }),
        }
    }

    pub fn server_port(&self) -> u16 {
        // Read from config; fallback to 8080.
        self.inner
            .config
            .try_read()
            .map(|c| c.server_port)
            .unwrap_or(8080)
    }

    pub fn ws_sender(&self) -> &broadcast::Sender<String> {
        &self.inner.ws_tx
    }

    pub fn subscribe_ws(&self) -> broadcast::Receiver<String> {
        self.inner.ws_tx.subscribe()
    }

    pub fn db(&self) -> &Database {
        &self.inner.db
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.inner.data_dir
    }

    pub fn selection(&self) -> &RwLock<SelectionSet> {
        &self.inner.selection
    }

    pub fn draw(&self) -> &RwLock<DrawRuntime> {
        &self.inner.draw
    }

    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.inner.shutdown
    }

    /// Get a read lock on the current config.
    pub async fn config(&self) -> tokio::sync::RwLockReadGuard<'_, AppConfig> {
        self.inner.config.read().await
    }

    /// Reload config from the database.
    pub async fn reload_config(&self) -> Result<(), anyhow::Error> {
        let sm = SettingsManager::new(self.inner.db.clone());
        let mut config = self.inner.config.write().await;
        config.reload(&sm)?;
        Ok(())
    }
}
