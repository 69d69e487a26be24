//! Tile taxonomy and string codec for the Sparrow mahjong backend.
//!
//! Tiles are a closed sum type with a stable, bijective string encoding
//! (`"5_CHARACTER"`, `"2_FLOWER"`, `"EAST"`). The encoding is what gets
//! persisted in game documents and sent over the wire, so it is covered
//! by round-trip tests rather than left to convention.
//!
//! # Key types
//!
//! - [`Tile`] — one physical tile (simple, honor, or bonus)
//! - [`TileSet`] — a ruleset's tile inventory, declared as data
//! - [`HONG_KONG`] — the 144-tile Hong Kong set
//! - [`TileError`] — construction and decode failures

mod catalog;
mod error;
mod tile;

pub use catalog::{HONG_KONG, TileSet};
pub use error::TileError;
pub use tile::{BonusKind, HonorKind, Suit, Tile};
