use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use crate::service::question_runtime::GuessingGame;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Failed to convert game state: {0}")]
    Json(#[from] serde_json::Error),
}

/// Save/load port for game state. The engine only hands over plain
/// serializable data; where it ends up is up to the adapter.
pub trait SessionStore: Send + Sync {
    fn save(&self, session_id: Uuid, game: &GuessingGame) -> Result<(), StoreError>;

    fn load(&self, session_id: Uuid) -> Result<Option<GuessingGame>, StoreError>;

    fn remove(&self, session_id: Uuid) -> bool;
}

#[derive(Debug, Clone)]
pub struct SavedGame {
    pub(crate) last_updated: DateTime<Utc>,
    pub(crate) value: serde_json::Value,
}

/// In-memory store keeping games as JSON snapshots. Games not touched within
/// the retention window are treated as gone.
#[derive(Debug)]
pub struct MemorySessionStore {
    games: Arc<DashMap<Uuid, SavedGame>>,
    retention: TimeDelta,
    cleanup_task: Option<JoinHandle<()>>,
}

impl MemorySessionStore {
    pub fn from_retention(retention: TimeDelta) -> Self {
        Self {
            games: Arc::new(DashMap::new()),
            retention,
            cleanup_task: None,
        }
    }

    pub(crate) fn save_at(
        &self,
        session_id: Uuid,
        game: &GuessingGame,
        now: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        let saved = SavedGame {
            last_updated: now,
            value: serde_json::to_value(game)?,
        };
        self.games.insert(session_id, saved);
        Ok(())
    }

    pub(crate) fn load_at(
        &self,
        session_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<Option<GuessingGame>, StoreError> {
        let value = match self.games.get(&session_id) {
            None => return Ok(None),
            Some(entry) if entry.last_updated + self.retention < now => None,
            Some(entry) => Some(entry.value.clone()),
        };

        let Some(value) = value else {
            debug!("Saved game {} expired", session_id);
            self.games.remove(&session_id);
            return Ok(None);
        };

        Ok(Some(serde_json::from_value(value)?))
    }

    /// Removes every expired game and returns how many were dropped.
    #[cfg(test)]
    pub(crate) fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        purge(&self.games, self.retention, now)
    }

    pub fn spawn_cleanup(&mut self, interval: Duration) {
        let games = self.games.clone();
        let retention = self.retention;
        let mut ticker = tokio::time::interval(interval);

        self.cleanup_task = Some(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let removed = purge(&games, retention, Utc::now());
                if removed > 0 {
                    debug!("Purged {} expired games", removed);
                }
            }
        }));
    }
}

impl Drop for MemorySessionStore {
    fn drop(&mut self) {
        if let Some(task) = self.cleanup_task.take() {
            task.abort();
        }
    }
}

fn purge(games: &DashMap<Uuid, SavedGame>, retention: TimeDelta, now: DateTime<Utc>) -> usize {
    let before = games.len();
    games.retain(|_, saved| saved.last_updated + retention >= now);
    before - games.len()
}

impl SessionStore for MemorySessionStore {
    fn save(&self, session_id: Uuid, game: &GuessingGame) -> Result<(), StoreError> {
        self.save_at(session_id, game, Utc::now())
    }

    fn load(&self, session_id: Uuid) -> Result<Option<GuessingGame>, StoreError> {
        self.load_at(session_id, Utc::now())
    }

    fn remove(&self, session_id: Uuid) -> bool {
        self.games.remove(&session_id).is_some()
    }
}
