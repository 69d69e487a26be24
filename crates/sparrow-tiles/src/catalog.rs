//! The tile inventory, declared as data.
//!
//! A ruleset is a table: which suits and ranks exist, which honors,
//! which bonus families, and how many copies of each. A different
//! ruleset is a different [`TileSet`] value, not a different type.

use std::ops::RangeInclusive;

use crate::{BonusKind, HonorKind, Suit, Tile};

/// A ruleset's tile inventory.
#[derive(Debug, Clone)]
pub struct TileSet {
    /// Suits present, in canonical order.
    pub simple_suits: &'static [Suit],
    /// Rank range for every suited tile.
    pub simple_ranks: RangeInclusive<u8>,
    /// Honor tiles present, in canonical order.
    pub honors: &'static [HonorKind],
    /// Bonus families present, in canonical order.
    pub bonus_kinds: &'static [BonusKind],
    /// Rank range for every bonus tile.
    pub bonus_ranks: RangeInclusive<u8>,
    /// Copies of each distinct simple and honor tile.
    pub copies: usize,
    /// Copies of each distinct bonus tile. Flowers and seasons are
    /// unique in a physical set, so Hong Kong uses 1.
    pub bonus_copies: usize,
}

/// The Hong Kong set: 108 simples + 28 honors + 8 unique bonus tiles
/// = 144.
pub const HONG_KONG: TileSet = TileSet {
    simple_suits: &[Suit::Dot, Suit::Bamboo, Suit::Character],
    simple_ranks: 1..=9,
    honors: &[
        HonorKind::East,
        HonorKind::South,
        HonorKind::West,
        HonorKind::North,
        HonorKind::RedDragon,
        HonorKind::GreenDragon,
        HonorKind::WhiteDragon,
    ],
    bonus_kinds: &[BonusKind::Flower, BonusKind::Season],
    bonus_ranks: 1..=4,
    copies: 4,
    bonus_copies: 1,
};

impl TileSet {
    /// Every distinct tile in canonical order: simples by suit then
    /// rank, then honors, then bonus tiles by family then rank.
    pub fn distinct(&self) -> impl Iterator<Item = Tile> + '_ {
        let simples = self.simple_suits.iter().flat_map(|&suit| {
            self.simple_ranks
                .clone()
                .map(move |rank| Tile::Simple { suit, rank })
        });
        let honors = self.honors.iter().map(|&kind| Tile::Honor(kind));
        let bonus = self.bonus_kinds.iter().flat_map(|&kind| {
            self.bonus_ranks
                .clone()
                .map(move |rank| Tile::Bonus { kind, rank })
        });
        simples.chain(honors).chain(bonus)
    }

    /// Every physical tile in canonical order, each distinct tile
    /// repeated by its family's copy count. This is the pre-shuffle
    /// wall content.
    pub fn tiles(&self) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(self.size());
        for tile in self.distinct() {
            let copies = if tile.is_bonus() {
                self.bonus_copies
            } else {
                self.copies
            };
            for _ in 0..copies {
                tiles.push(tile);
            }
        }
        tiles
    }

    /// Total physical tiles in the set.
    pub fn size(&self) -> usize {
        let ranks = range_len(&self.simple_ranks);
        let bonus_ranks = range_len(&self.bonus_ranks);
        self.simple_suits.len() * ranks * self.copies
            + self.honors.len() * self.copies
            + self.bonus_kinds.len() * bonus_ranks * self.bonus_copies
    }
}

fn range_len(range: &RangeInclusive<u8>) -> usize {
    (*range.end() as usize + 1).saturating_sub(*range.start() as usize)
}
