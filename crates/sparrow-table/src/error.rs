//! Error types for the handler layer.
//!
//! Everything a handler can fail with is typed so the transport above
//! can translate it into a client-visible failure message. Nothing is
//! swallowed: store conflicts and engine protocol errors pass through
//! unchanged.

use sparrow_engine::EngineError;
use sparrow_store::StoreError;

/// Errors that can occur while handling a player action.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// Store failure — including the expected-under-contention
    /// [`StoreError::VersionConflict`], which the caller resolves by
    /// re-invoking the action against a fresh read.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Engine failure — deal exhaustion, duplicate claims, unknown seats.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The discarding seat does not hold the tile it tried to discard.
    #[error("connection {connection_id} does not hold {tile} in game {game_id}")]
    TileNotInHand {
        game_id: String,
        connection_id: String,
        tile: String,
    },

    /// A roster operation arrived after the game started.
    #[error("game {0} has already started")]
    AlreadyStarted(String),

    /// The connection is already on the roster.
    #[error("connection {connection_id} already joined game {game_id}")]
    AlreadyJoined {
        game_id: String,
        connection_id: String,
    },

    /// The roster has no free seat.
    #[error("game {0} is full")]
    GameFull(String),

    /// Only the host may perform this roster operation.
    #[error("connection {connection_id} is not the host of game {game_id}")]
    NotHost {
        game_id: String,
        connection_id: String,
    },
}
