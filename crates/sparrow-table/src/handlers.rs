//! The per-action handlers: game start, draw, discard, claim.
//!
//! Each handler is one read-mutate-commit pass over the game document.
//! Two handlers racing on the same version lose deterministically: the
//! second commit returns `VersionConflict` and the transport re-invokes
//! it against a fresh read. Handlers therefore keep their mutations
//! idempotent-per-invocation and never hold state across calls.

use rand::Rng;
use sparrow_engine::{GameState, InteractionPhase, SEATS, apply_resolution, record_claim, resolve};
use sparrow_store::{KeyValueStore, StoreExt};
use sparrow_tiles::Tile;

use crate::messages::{ClaimMessage, ClaimOutcome, DiscardBroadcast, DrawOutcome};
use crate::TableError;

/// Creates the game document for a table of four.
///
/// Builds a shuffled wall, deals four hands (bonus tiles substituted),
/// and persists the document at version 1. Fails with
/// `AlreadyExists` if the game id is taken.
pub async fn init_game_state<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    connection_ids: [String; SEATS],
    rng: &mut impl Rng,
) -> Result<GameState, TableError> {
    let state = GameState::start(game_id, connection_ids, rng)?;
    let stored = store.insert(&state).await?;
    tracing::info!(
        game_id = %stored.game_id,
        cursor = stored.wall.current_index(),
        "game state created"
    );
    Ok(stored)
}

/// Draws the next wall tile for the calling seat.
///
/// Bonus tiles go to the seat's `bonus_tiles` and are replaced by the
/// next draw, the same substitution the dealer applies. The advanced
/// cursor, the hand append, and any bonus routing are committed in one
/// guarded write. The tile is returned to the caller only — nothing
/// here is broadcast.
///
/// An exhausted wall is [`DrawOutcome::WallExhausted`], a normal
/// terminal condition, not an error.
pub async fn draw_tile<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    connection_id: &str,
) -> Result<DrawOutcome, TableError> {
    let mut state: GameState = store.fetch(game_id).await?;
    let seat = state.require_seat(connection_id)?;

    let mut bonus_tiles = Vec::new();
    let tile = loop {
        match state.wall.draw() {
            Some(tile) if tile.is_bonus() => bonus_tiles.push(tile),
            other => break other,
        }
    };

    let Some(tile) = tile else {
        if bonus_tiles.is_empty() {
            // Nothing moved: the cursor was already at the end.
            return Ok(DrawOutcome::WallExhausted);
        }
        // The trailing bonus draws still advanced the cursor.
        state.hands[seat].bonus_tiles.extend(bonus_tiles.iter().copied());
        store.commit(&state).await?;
        return Ok(DrawOutcome::WallExhausted);
    };

    state.hands[seat].hand.push(tile);
    state.hands[seat].bonus_tiles.extend(bonus_tiles.iter().copied());
    let committed = store.commit(&state).await?;
    tracing::debug!(
        %game_id,
        seat,
        cursor = committed.wall.current_index(),
        bonus = bonus_tiles.len(),
        "tile drawn"
    );

    Ok(DrawOutcome::Drawn { tile, bonus_tiles })
}

/// Removes a tile from the calling seat's hand and exposes it for
/// external fan-out.
///
/// The discarder keeps `current_turn` while the other seats' claims
/// are collected; resolution is what moves the turn on.
pub async fn discard_tile<S: KeyValueStore>(
    store: &S,
    game_id: &str,
    connection_id: &str,
    tile: Tile,
) -> Result<DiscardBroadcast, TableError> {
    let mut state: GameState = store.fetch(game_id).await?;
    let seat = state.require_seat(connection_id)?;

    let pos = state.hands[seat]
        .hand
        .iter()
        .position(|t| *t == tile)
        .ok_or_else(|| TableError::TileNotInHand {
            game_id: game_id.to_string(),
            connection_id: connection_id.to_string(),
            tile: tile.code(),
        })?;
    state.hands[seat].hand.remove(pos);
    state.current_turn = seat;

    store.commit(&state).await?;
    tracing::debug!(%game_id, seat, tile = %tile, "tile discarded");

    Ok(DiscardBroadcast {
        game_id: game_id.to_string(),
        connection_id: connection_id.to_string(),
        tile,
    })
}

/// Records one seat's claim on the current discard; resolves the round
/// when the claim is the third.
///
/// The append and the count bump ride one compare-and-swap write, so
/// concurrent claims serialize into a store-accepted arrival order —
/// the order the priority scan uses. On the third claim, resolution,
/// the winning meld movement, and the interaction-state reset are all
/// part of the same guarded write.
///
/// A second claim from a seat that already claimed is
/// [`EngineError::DuplicateClaim`](sparrow_engine::EngineError) and
/// leaves the round intact for the other seats.
pub async fn submit_claim<S: KeyValueStore>(
    store: &S,
    message: ClaimMessage,
) -> Result<ClaimOutcome, TableError> {
    let game_id = message.game_id.clone();
    let mut state: GameState = store.fetch(&game_id).await?;
    state.require_seat(&message.connection_id)?;

    let phase = record_claim(&mut state, message.into())?;
    match phase {
        InteractionPhase::Collecting => {
            let committed = store.commit(&state).await?;
            tracing::debug!(
                %game_id,
                received = committed.interaction_count,
                "claim recorded"
            );
            Ok(ClaimOutcome::Pending {
                received: committed.interaction_count,
            })
        }
        InteractionPhase::Resolving => {
            let resolution = resolve(
                &state.played_tile_interactions,
                state.current_turn,
                |id| state.seat_of(id),
            );
            apply_resolution(&mut state, &resolution)?;
            store.commit(&state).await?;
            tracing::info!(
                %game_id,
                winner = resolution.connection_id.as_deref().unwrap_or("-"),
                skipped = resolution.skip_interaction,
                "interaction round resolved"
            );
            Ok(ClaimOutcome::Resolved(resolution))
        }
    }
}
