//! The wall: an ordered, shuffled tile sequence behind a draw cursor.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use sparrow_tiles::{HONG_KONG, Tile};

/// The draw pile for one game.
///
/// Content is fixed once shuffled; only the cursor moves, and it never
/// decreases except on [`reset`](Self::reset). Tiles before the cursor
/// are drawn, tiles at or after it are available. Keeping drawn tiles
/// in place (instead of popping them) leaves the whole wall inspectable
/// for replay, and lets the deal algorithm's bonus substitution simply
/// keep drawing past the cursor.
///
/// Serializes as the persisted document shape:
/// `{ "tiles": [...144 codes...], "currentIndex": n }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wall {
    tiles: Vec<Tile>,
    current_index: usize,
}

impl Wall {
    /// Builds a freshly shuffled Hong Kong wall with the cursor at 0.
    ///
    /// The canonical 144-tile set is laid out in catalog order, then
    /// shuffled in place (Fisher–Yates via [`SliceRandom::shuffle`],
    /// unbiased given a uniform `rng`). The RNG is injected so tests
    /// can seed it and production callers pass `rand::rng()`.
    pub fn build(rng: &mut impl Rng) -> Self {
        let mut tiles = HONG_KONG.tiles();
        tiles.shuffle(rng);
        Self {
            tiles,
            current_index: 0,
        }
    }

    /// A wall with known content and the cursor at 0.
    ///
    /// Fixture constructor for deterministic deals; production walls
    /// come from [`build`](Self::build).
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self {
            tiles,
            current_index: 0,
        }
    }

    /// Draws the tile at the cursor and advances it.
    ///
    /// Returns `None` once the wall is exhausted — the normal
    /// end-of-round condition, not an error.
    pub fn draw(&mut self) -> Option<Tile> {
        let tile = self.tiles.get(self.current_index).copied()?;
        self.current_index += 1;
        Some(tile)
    }

    /// Rebuilds and reshuffles from scratch, cursor back to 0.
    pub fn reset(&mut self, rng: &mut impl Rng) {
        *self = Self::build(rng);
    }

    /// The draw cursor: tiles before it are drawn.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Tiles not yet drawn.
    pub fn remaining(&self) -> usize {
        self.tiles.len().saturating_sub(self.current_index)
    }

    /// The drawn prefix, in draw order.
    pub fn drawn(&self) -> &[Tile] {
        &self.tiles[..self.current_index.min(self.tiles.len())]
    }

    /// The full wall content, drawn and available.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }
}
