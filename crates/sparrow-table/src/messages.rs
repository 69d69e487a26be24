//! Wire payloads consumed and produced by the handlers.
//!
//! These are the shapes the transport layer sees; they are persisted
//! nowhere. Field names follow the document/wire convention
//! (`camelCase`, tile codes as plain strings, `meldType: ""` on skips).

use serde::{Deserialize, Serialize};
use sparrow_engine::{MeldType, PlayedTileInteraction, Resolution, meld_code};
use sparrow_tiles::Tile;

/// One seat's claim submission on the current discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimMessage {
    pub game_id: String,
    pub connection_id: String,
    /// The full meld the claimant would lay down, discard included.
    #[serde(default)]
    pub played_tiles: Vec<Tile>,
    /// `"TRIPLET" | "QUAD" | "CONSECUTIVE"`, or `""` when skipping.
    #[serde(with = "meld_code", default)]
    pub meld_type: Option<MeldType>,
    pub skip_interaction: bool,
}

impl From<ClaimMessage> for PlayedTileInteraction {
    fn from(message: ClaimMessage) -> Self {
        Self {
            connection_id: message.connection_id,
            played_tiles: message.played_tiles,
            meld_type: message.meld_type,
            skip_interaction: message.skip_interaction,
        }
    }
}

/// Result of a draw, returned to the calling seat only — never
/// broadcast by this layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// A playable tile landed in the seat's hand. Any bonus tiles
    /// drawn on the way were routed to the seat's side list.
    Drawn { tile: Tile, bonus_tiles: Vec<Tile> },
    /// The wall is empty — the normal end-of-round condition.
    WallExhausted,
}

/// A discard exposed for external fan-out, the tile's encoding
/// unchanged so claims can reference it verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardBroadcast {
    pub game_id: String,
    pub connection_id: String,
    pub tile: Tile,
}

/// Result of recording one claim.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// Still collecting; `received` claims are in so far.
    Pending { received: usize },
    /// Third claim landed: the round resolved and the interaction
    /// state was cleared in the same write. Broadcast to all seats.
    Resolved(Resolution),
}
