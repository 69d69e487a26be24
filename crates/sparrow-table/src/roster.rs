//! The lobby-side roster document.
//!
//! Roster mutations (joins, the start flag, pre-start deletion) are
//! unrelated to the table engine but share the same store, so they go
//! through the same compare-and-swap guard — a second consumer of the
//! version protocol, exercised here so the guard is not special-cased
//! to game state.

use serde::{Deserialize, Serialize};
use sparrow_engine::SEATS;
use sparrow_store::{Document, KeyValueStore, StoreExt};

use crate::TableError;

/// Who is gathered at a table that has not necessarily started.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRoster {
    pub game_id: String,
    /// The connection that created the game. Only the host can delete
    /// it before start.
    pub host: String,
    /// Joined connections, host first, at most [`SEATS`].
    pub players: Vec<String>,
    pub started: bool,
    #[serde(default)]
    pub version: u64,
}

impl Document for GameRoster {
    const COLLECTION: &'static str = "game_roster";

    fn id(&self) -> &str {
        &self.game_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Creates a roster with the host seated.
pub async fn create_game<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    host: &str,
) -> Result<GameRoster, TableError> {
    let roster = GameRoster {
        game_id: game_id.to_string(),
        host: host.to_string(),
        players: vec![host.to_string()],
        started: false,
        version: 0,
    };
    let stored = store.insert(&roster).await?;
    tracing::info!(%game_id, %host, "game created");
    Ok(stored)
}

/// Adds a connection to the roster.
pub async fn join_game<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    connection_id: &str,
) -> Result<GameRoster, TableError> {
    let mut roster: GameRoster = store.fetch(game_id).await?;
    if roster.started {
        return Err(TableError::AlreadyStarted(game_id.to_string()));
    }
    if roster.players.iter().any(|p| p == connection_id) {
        return Err(TableError::AlreadyJoined {
            game_id: game_id.to_string(),
            connection_id: connection_id.to_string(),
        });
    }
    if roster.players.len() >= SEATS {
        return Err(TableError::GameFull(game_id.to_string()));
    }

    roster.players.push(connection_id.to_string());
    let stored = store.commit(&roster).await?;
    tracing::info!(%game_id, %connection_id, players = stored.players.len(), "player joined");
    Ok(stored)
}

/// Flips the start flag once the table is full.
pub async fn mark_started<S: KeyValueStore>(
    store: &S,
    game_id: &str,
) -> Result<GameRoster, TableError> {
    let mut roster: GameRoster = store.fetch(game_id).await?;
    if roster.started {
        return Err(TableError::AlreadyStarted(game_id.to_string()));
    }

    roster.started = true;
    let stored = store.commit(&roster).await?;
    tracing::info!(%game_id, "game started");
    Ok(stored)
}

/// Deletes a roster before start — the host-disconnect path.
pub async fn delete_game<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    connection_id: &str,
) -> Result<(), TableError> {
    let roster: GameRoster = store.fetch(game_id).await?;
    if roster.host != connection_id {
        return Err(TableError::NotHost {
            game_id: game_id.to_string(),
            connection_id: connection_id.to_string(),
        });
    }
    if roster.started {
        return Err(TableError::AlreadyStarted(game_id.to_string()));
    }

    store.remove::<GameRoster>(game_id).await?;
    tracing::info!(%game_id, "game deleted before start");
    Ok(())
}
