//! Per-action request handlers for the Sparrow mahjong backend.
//!
//! Each public function here models one stateless invocation — a game
//! start, a draw, a discard, one seat's claim — the way a serverless
//! runtime would invoke them: no shared memory, one short-lived task
//! per inbound message, unbounded parallelism across seats. The only
//! shared resource is the game document, and every mutation goes
//! through the store's compare-and-swap; a
//! [`StoreError::VersionConflict`](sparrow_store::StoreError) is
//! surfaced to the caller, never retried here.
//!
//! Transport is an external collaborator: handlers return typed
//! broadcast payloads ([`DiscardBroadcast`], [`Resolution`]) for the
//! fan-out layer and never touch a socket.

mod error;
mod handlers;
mod messages;
mod roster;

pub use error::TableError;
pub use handlers::{discard_tile, draw_tile, init_game_state, submit_claim};
pub use messages::{ClaimMessage, ClaimOutcome, DiscardBroadcast, DrawOutcome};
pub use roster::{GameRoster, create_game, delete_game, join_game, mark_started};
// The resolution broadcast payload is the engine's resolution verbatim.
pub use sparrow_engine::Resolution;
