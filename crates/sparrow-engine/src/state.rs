//! The shared game document.
//!
//! One [`GameState`] per table, jointly owned by all four seats'
//! request handlers — no single owner. Every mutation is persisted
//! through the store's compare-and-swap on [`GameState::version`], so
//! two racing handlers can never both win the same version slot.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sparrow_store::Document;
use sparrow_tiles::Tile;

use crate::arbiter::PlayedTileInteraction;
use crate::{EngineError, Wall, deal_hands};

/// Seats at a table.
pub const SEATS: usize = 4;

/// One seat's persisted view: who sits there and what they hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatHand {
    /// The connection occupying this seat.
    pub connection_id: String,
    /// Playable tiles: 13 steady-state, transiently 14 after a draw.
    pub hand: Vec<Tile>,
    /// Face-up melds claimed from discards.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub played_tiles: Vec<Tile>,
    /// Flowers and seasons collected during dealing and self-play.
    #[serde(default)]
    pub bonus_tiles: Vec<Tile>,
}

/// The authoritative game document, persisted and wire-visible.
///
/// `interaction_count` stays in `[0, 3]`: it counts claims recorded on
/// the current discard and is zeroed, together with
/// `played_tile_interactions`, in the same guarded write that resolves
/// the round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub game_id: String,
    pub wall: Wall,
    /// Always [`SEATS`] entries, seat order fixed at game start.
    pub hands: Vec<SeatHand>,
    /// Seat index of the dealer.
    pub dealer: usize,
    /// Prevailing wind, 0 = East.
    pub current_wind: u8,
    /// Seat whose action window is open. Stays on the discarder while
    /// claims are collected; resolution moves it.
    pub current_turn: usize,
    /// Claims recorded on the current discard, in store-accepted order.
    #[serde(default)]
    pub played_tile_interactions: Vec<PlayedTileInteraction>,
    #[serde(default)]
    pub interaction_count: usize,
    /// Store-owned compare-and-swap counter.
    #[serde(default)]
    pub version: u64,
}

impl GameState {
    /// Builds a fresh table: shuffled wall, four dealt hands (bonus
    /// tiles substituted), dealer at seat 0, East wind, dealer to act.
    ///
    /// # Errors
    /// Propagates [`EngineError::WallExhaustedDuringDeal`]; impossible
    /// for the standard 144-tile wall.
    pub fn start(
        game_id: impl Into<String>,
        connection_ids: [String; SEATS],
        rng: &mut impl Rng,
    ) -> Result<Self, EngineError> {
        Self::start_with_wall(game_id, connection_ids, Wall::build(rng))
    }

    /// [`start`](Self::start) against a caller-supplied wall. Fixture
    /// path for deterministic deals.
    pub fn start_with_wall(
        game_id: impl Into<String>,
        connection_ids: [String; SEATS],
        mut wall: Wall,
    ) -> Result<Self, EngineError> {
        let dealt = deal_hands(&mut wall)?;
        let hands = connection_ids
            .into_iter()
            .zip(dealt)
            .map(|(connection_id, d)| SeatHand {
                connection_id,
                hand: d.tiles,
                played_tiles: Vec::new(),
                bonus_tiles: d.bonus_tiles,
            })
            .collect();

        Ok(Self {
            game_id: game_id.into(),
            wall,
            hands,
            dealer: 0,
            current_wind: 0,
            current_turn: 0,
            played_tile_interactions: Vec::new(),
            interaction_count: 0,
            version: 0,
        })
    }

    /// Seat index for a connection, if it is at this table.
    pub fn seat_of(&self, connection_id: &str) -> Option<usize> {
        self.hands
            .iter()
            .position(|h| h.connection_id == connection_id)
    }

    /// Seat index for a connection, as an error otherwise.
    pub fn require_seat(&self, connection_id: &str) -> Result<usize, EngineError> {
        self.seat_of(connection_id)
            .ok_or_else(|| EngineError::UnknownSeat {
                game_id: self.game_id.clone(),
                connection_id: connection_id.to_string(),
            })
    }

    /// The seat after `seat` in turn order.
    pub fn next_seat(seat: usize) -> usize {
        (seat + 1) % SEATS
    }
}

impl Document for GameState {
    const COLLECTION: &'static str = "game_state";

    fn id(&self) -> &str {
        &self.game_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}
