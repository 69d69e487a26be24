//! Core table engine for four-player Hong Kong mahjong.
//!
//! This crate is the rules layer: the shuffled wall and its draw
//! cursor, the deal algorithm with its cascading bonus-tile
//! substitution, the shared game document, and the arbiter that turns
//! three independent claims on a discarded tile into one deterministic
//! outcome. Everything here is pure state-in/state-out — persistence of
//! a mutated [`GameState`] goes through `sparrow-store`'s
//! compare-and-swap, driven by the handlers in `sparrow-table`.
//!
//! # Key types
//!
//! - [`Wall`] — 144 shuffled tiles behind a monotonic cursor
//! - [`deal_hands`] — four 13-tile hands, bonus tiles substituted
//! - [`GameState`] — the persisted, wire-visible game document
//! - [`PlayedTileInteraction`] / [`resolve`] — the claim round
//! - [`EngineError`] — deal and claim-protocol failures

mod arbiter;
mod deal;
mod error;
mod state;
mod wall;

pub use arbiter::{
    INTERACTION_QUORUM, InteractionPhase, MeldType, PlayedTileInteraction, Resolution,
    apply_resolution, meld_code, record_claim, resolve,
};
pub use deal::{DealtHand, HAND_SIZE, deal_hands};
pub use error::EngineError;
pub use state::{GameState, SEATS, SeatHand};
pub use wall::Wall;
