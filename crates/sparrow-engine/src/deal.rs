//! Dealing: four 13-tile starting hands with bonus-tile substitution.

use sparrow_tiles::Tile;

use crate::state::SEATS;
use crate::{EngineError, Wall};

/// Tiles in a steady-state playable hand.
pub const HAND_SIZE: usize = 13;

/// One seat's dealt tiles.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DealtHand {
    /// Exactly [`HAND_SIZE`] non-bonus tiles, in draw order.
    pub tiles: Vec<Tile>,
    /// Bonus tiles encountered while dealing this seat, in draw order.
    /// They never occupy the playable hand.
    pub bonus_tiles: Vec<Tile>,
}

/// Deals four hands in strict seat order 0→3 from the shared cursor.
///
/// Per seat: draw until 13 non-bonus tiles are in hand. A drawn bonus
/// tile goes to the seat's side list and does not count toward the 13;
/// the next wall tile takes its place — which can itself be a bonus
/// tile, so the substitution cascades. A seat's replacement draws come
/// off the same monotonic cursor, so later seats simply start wherever
/// it stands; nothing is borrowed back.
///
/// After a successful deal the cursor equals `52 + total bonus tiles
/// drawn`.
///
/// # Errors
/// [`EngineError::WallExhaustedDuringDeal`] if the wall runs dry before
/// four full hands exist. The fixed 144-tile set makes this impossible
/// for a real wall, but short fixture walls hit it.
pub fn deal_hands(wall: &mut Wall) -> Result<[DealtHand; SEATS], EngineError> {
    let mut hands: [DealtHand; SEATS] = Default::default();

    for (seat, dealt) in hands.iter_mut().enumerate() {
        let mut wanted = HAND_SIZE;
        while wanted > 0 {
            let Some(tile) = wall.draw() else {
                return Err(EngineError::WallExhaustedDuringDeal {
                    seat,
                    missing: wanted,
                });
            };
            if tile.is_bonus() {
                // Replacement comes from the next draw.
                dealt.bonus_tiles.push(tile);
            } else {
                dealt.tiles.push(tile);
                wanted -= 1;
            }
        }
    }

    Ok(hands)
}
