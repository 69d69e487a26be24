//! The [`Tile`] sum type and its string encoding.
//!
//! Every tile encodes to exactly one string and every valid string
//! decodes to exactly one tile:
//!
//! - Simple: `"<rank>_<SUIT>"` — `"5_CHARACTER"`, `"1_DOT"`
//! - Honor: `"<KIND>"` — `"EAST"`, `"REDDRAGON"`
//! - Bonus: `"<rank>_<KIND>"` — `"2_FLOWER"`, `"4_SEASON"`
//!
//! These codes are persisted in game documents and visible on the wire,
//! so [`Tile`] serializes as its code (a plain JSON string), not as a
//! tagged object.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::TileError;

/// Valid ranks for simple tiles.
pub(crate) const SIMPLE_RANK_MIN: u8 = 1;
pub(crate) const SIMPLE_RANK_MAX: u8 = 9;

/// Valid ranks for bonus tiles.
pub(crate) const BONUS_RANK_MIN: u8 = 1;
pub(crate) const BONUS_RANK_MAX: u8 = 4;

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// The three suited tile categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Dot,
    Bamboo,
    Character,
}

impl Suit {
    /// The suit's segment in the tile code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Dot => "DOT",
            Self::Bamboo => "BAMBOO",
            Self::Character => "CHARACTER",
        }
    }
}

/// The seven honor tiles: four winds and three dragons. Honors carry
/// no rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HonorKind {
    East,
    South,
    West,
    North,
    RedDragon,
    GreenDragon,
    WhiteDragon,
}

impl HonorKind {
    /// The honor's tile code (the full code — honors have no rank prefix).
    pub fn code(self) -> &'static str {
        match self {
            Self::East => "EAST",
            Self::South => "SOUTH",
            Self::West => "WEST",
            Self::North => "NORTH",
            Self::RedDragon => "REDDRAGON",
            Self::GreenDragon => "GREENDRAGON",
            Self::WhiteDragon => "WHITEDRAGON",
        }
    }
}

/// The two bonus tile families. Bonus tiles never occupy a playable
/// hand — the wall and deal layers route them to a seat's side list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BonusKind {
    Flower,
    Season,
}

impl BonusKind {
    /// The family's segment in the tile code.
    pub fn code(self) -> &'static str {
        match self {
            Self::Flower => "FLOWER",
            Self::Season => "SEASON",
        }
    }
}

// ---------------------------------------------------------------------------
// Tile
// ---------------------------------------------------------------------------

/// One physical mahjong tile.
///
/// A closed sum type: every tile is a ranked simple, an unranked honor,
/// or a ranked bonus tile. The derived `Ord` gives tiles a total order
/// (suit/kind first, then rank), used for deterministic iteration in
/// the catalog and in tests.
///
/// Rank bounds are enforced by the [`Tile::simple`] and [`Tile::bonus`]
/// constructors and by the decoder — an out-of-range rank is a
/// [`TileError::RangeViolation`], never a clamped value.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub enum Tile {
    /// A suited tile, rank 1–9.
    Simple { suit: Suit, rank: u8 },
    /// A wind or dragon.
    Honor(HonorKind),
    /// A flower or season, rank 1–4.
    Bonus { kind: BonusKind, rank: u8 },
}

impl Tile {
    /// Constructs a simple tile, validating the rank.
    pub fn simple(suit: Suit, rank: u8) -> Result<Self, TileError> {
        if !(SIMPLE_RANK_MIN..=SIMPLE_RANK_MAX).contains(&rank) {
            return Err(TileError::RangeViolation {
                family: "simple",
                rank,
                min: SIMPLE_RANK_MIN,
                max: SIMPLE_RANK_MAX,
            });
        }
        Ok(Self::Simple { suit, rank })
    }

    /// Constructs an honor tile. Total — honors have no rank to validate.
    pub fn honor(kind: HonorKind) -> Self {
        Self::Honor(kind)
    }

    /// Constructs a bonus tile, validating the rank.
    pub fn bonus(kind: BonusKind, rank: u8) -> Result<Self, TileError> {
        if !(BONUS_RANK_MIN..=BONUS_RANK_MAX).contains(&rank) {
            return Err(TileError::RangeViolation {
                family: "bonus",
                rank,
                min: BONUS_RANK_MIN,
                max: BONUS_RANK_MAX,
            });
        }
        Ok(Self::Bonus { kind, rank })
    }

    /// Returns `true` for flower and season tiles.
    pub fn is_bonus(self) -> bool {
        matches!(self, Self::Bonus { .. })
    }

    /// The tile's rank, or `None` for honors.
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::Simple { rank, .. } | Self::Bonus { rank, .. } => Some(rank),
            Self::Honor(_) => None,
        }
    }

    /// The canonical string code for this tile.
    ///
    /// Alias for the `Display` implementation; kept as a named method so
    /// call sites that build documents read as intent, not formatting.
    pub fn code(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple { suit, rank } => write!(f, "{}_{}", rank, suit.code()),
            Self::Honor(kind) => f.write_str(kind.code()),
            Self::Bonus { kind, rank } => write!(f, "{}_{}", rank, kind.code()),
        }
    }
}

impl FromStr for Tile {
    type Err = TileError;

    /// Decodes a canonical tile code.
    ///
    /// Decoding is strict: codes are upper-case, ranks are decimal with
    /// no sign or leading whitespace, and anything that matches no
    /// pattern is [`TileError::MalformedTileCode`]. A code that parses
    /// but carries an out-of-range rank (e.g. `"0_DOT"`) surfaces the
    /// constructor's [`TileError::RangeViolation`] instead.
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        let malformed = || TileError::MalformedTileCode(code.to_string());

        match code.split_once('_') {
            Some((rank_part, kind_part)) => {
                // Reject "+1_DOT", " 1_DOT", "01_DOT" — the encoder never
                // produces them, so the decoder must not accept them.
                if rank_part.len() != 1 {
                    return Err(malformed());
                }
                let rank: u8 = rank_part.parse().map_err(|_| malformed())?;
                match kind_part {
                    "DOT" => Tile::simple(Suit::Dot, rank),
                    "BAMBOO" => Tile::simple(Suit::Bamboo, rank),
                    "CHARACTER" => Tile::simple(Suit::Character, rank),
                    "FLOWER" => Tile::bonus(BonusKind::Flower, rank),
                    "SEASON" => Tile::bonus(BonusKind::Season, rank),
                    _ => Err(malformed()),
                }
            }
            None => match code {
                "EAST" => Ok(Tile::honor(HonorKind::East)),
                "SOUTH" => Ok(Tile::honor(HonorKind::South)),
                "WEST" => Ok(Tile::honor(HonorKind::West)),
                "NORTH" => Ok(Tile::honor(HonorKind::North)),
                "REDDRAGON" => Ok(Tile::honor(HonorKind::RedDragon)),
                "GREENDRAGON" => Ok(Tile::honor(HonorKind::GreenDragon)),
                "WHITEDRAGON" => Ok(Tile::honor(HonorKind::WhiteDragon)),
                _ => Err(malformed()),
            },
        }
    }
}

// serde bridges: `#[serde(into = "String", try_from = "String")]` makes
// a Tile serialize as its bare code.

impl From<Tile> for String {
    fn from(tile: Tile) -> Self {
        tile.to_string()
    }
}

impl TryFrom<String> for Tile {
    type Error = TileError;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        code.parse()
    }
}

// =========================================================================
// Tests
// =========================================================================
