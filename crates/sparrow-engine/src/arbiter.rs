//! Claim arbitration over one discarded tile.
//!
//! After a discard, each of the other three seats sends exactly one
//! claim: take the tile for a meld, or skip. Claims arrive as
//! independent invocations and are appended to the game document one
//! compare-and-swap write at a time, so "arrival order" means the order
//! the store accepted the writes, not the order messages were sent.
//! Once the third claim lands the round resolves deterministically and
//! the interaction state is cleared in the same guarded write that
//! applies the outcome.
//!
//! There is no deadline in this layer: a round with a silent seat stays
//! in [`InteractionPhase::Collecting`] until the transport above it
//! decides to force skips.

use serde::{Deserialize, Serialize};
use sparrow_tiles::Tile;

use crate::state::GameState;
use crate::EngineError;

/// Claims required before a round resolves: one per non-discarding seat.
pub const INTERACTION_QUORUM: usize = 3;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// The meld a claim asks to build from the discarded tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MeldType {
    /// Three equal tiles.
    Triplet,
    /// Four equal tiles.
    Quad,
    /// Three sequential tiles of one suit.
    Consecutive,
}

/// Wire bridge for `meldType` fields, which are `""` on skip claims.
/// Use with `#[serde(with = "...", default)]` on an `Option<MeldType>`.
pub mod meld_code {
    use serde::de::value::StrDeserializer;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::MeldType;

    pub fn serialize<S: Serializer>(
        value: &Option<MeldType>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(meld) => meld.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<MeldType>, D::Error> {
        let code = String::deserialize(deserializer)?;
        if code.is_empty() {
            return Ok(None);
        }
        MeldType::deserialize(StrDeserializer::<D::Error>::new(&code)).map(Some)
    }
}

/// One seat's claim on the current discard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayedTileInteraction {
    /// The claiming seat's connection.
    pub connection_id: String,
    /// The full meld the claimant would lay down, discard included.
    #[serde(default)]
    pub played_tiles: Vec<Tile>,
    /// Requested meld; `None` (wire `""`) on skip claims.
    #[serde(with = "meld_code", default)]
    pub meld_type: Option<MeldType>,
    /// `true` if the seat passes on this discard.
    pub skip_interaction: bool,
}

/// The outcome broadcast to all seats when a round resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    #[serde(with = "meld_code", default)]
    pub meld_type: Option<MeldType>,
    #[serde(default)]
    pub played_tiles: Vec<Tile>,
    pub skip_interaction: bool,
    /// The winning seat's connection; absent when everyone skipped or
    /// no claim was valid.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub connection_id: Option<String>,
}

impl Resolution {
    /// The synthetic result when no claim takes the tile: everyone
    /// skipped, or the only claims present were invalid.
    pub fn skipped() -> Self {
        Self {
            meld_type: None,
            played_tiles: Vec::new(),
            skip_interaction: true,
            connection_id: None,
        }
    }

    fn winner(claim: &PlayedTileInteraction) -> Self {
        Self {
            meld_type: claim.meld_type,
            played_tiles: claim.played_tiles.clone(),
            skip_interaction: false,
            connection_id: Some(claim.connection_id.clone()),
        }
    }

    /// Whether a seat won the discard.
    pub fn has_winner(&self) -> bool {
        self.connection_id.is_some()
    }
}

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// Where the current interaction round stands.
///
/// `Collecting` (0–2 claims) moves to `Resolving` on the third; the
/// resolution write clears the round, which is the terminal "resolved"
/// state — an empty round is simply `Collecting` for the next discard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionPhase {
    Collecting,
    Resolving,
}

/// Records one claim on the game document.
///
/// Appends the claim and bumps `interaction_count` — the caller
/// persists both through one compare-and-swap write, which is what
/// serializes concurrent claims into a single arrival order. At most
/// one claim per seat: a second claim from the same connection before
/// resolution is [`EngineError::DuplicateClaim`] and leaves the round
/// untouched for the other seats.
pub fn record_claim(
    state: &mut GameState,
    claim: PlayedTileInteraction,
) -> Result<InteractionPhase, EngineError> {
    if state
        .played_tile_interactions
        .iter()
        .any(|c| c.connection_id == claim.connection_id)
    {
        return Err(EngineError::DuplicateClaim {
            connection_id: claim.connection_id,
        });
    }

    state.played_tile_interactions.push(claim);
    state.interaction_count += 1;

    Ok(if state.interaction_count >= INTERACTION_QUORUM {
        InteractionPhase::Resolving
    } else {
        InteractionPhase::Collecting
    })
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Picks the winning claim once collection is complete.
///
/// Skip claims are dropped first; if nothing remains the result is the
/// synthetic all-skip. Otherwise, in arrival order:
///
/// 1. the first Triplet or Quad claim wins outright — when several
///    arrive (possible under the rules only through duplicate tiles in
///    flight), first-in-order is the documented tie-break;
/// 2. failing that, a Consecutive claim wins only if its claimant is
///    the seat immediately after the discarder — Consecutive claims
///    from the other two seats are ignored even when present;
/// 3. failing both, nobody takes the tile.
pub fn resolve(
    claims: &[PlayedTileInteraction],
    discarder_seat: usize,
    seat_of: impl Fn(&str) -> Option<usize>,
) -> Resolution {
    let takers: Vec<&PlayedTileInteraction> =
        claims.iter().filter(|c| !c.skip_interaction).collect();
    if takers.is_empty() {
        return Resolution::skipped();
    }

    if let Some(claim) = takers
        .iter()
        .find(|c| matches!(c.meld_type, Some(MeldType::Triplet | MeldType::Quad)))
    {
        return Resolution::winner(claim);
    }

    let next_seat = GameState::next_seat(discarder_seat);
    if let Some(claim) = takers.iter().find(|c| {
        c.meld_type == Some(MeldType::Consecutive)
            && seat_of(&c.connection_id) == Some(next_seat)
    }) {
        return Resolution::winner(claim);
    }

    Resolution::skipped()
}

/// Applies a resolution to the game document.
///
/// For a winner: the meld tiles leave the winner's concealed hand for
/// their face-up `played_tiles` (the discarded tile itself was never in
/// that hand, so it is appended without a matching removal) and the
/// turn passes to the winner. For a skip: the turn passes to the seat
/// after the discarder. Either way the interaction list and count are
/// cleared — the caller commits this together with the meld change in
/// one guarded write, so a re-applied resolution after a version
/// conflict re-read starts from clean state.
pub fn apply_resolution(
    state: &mut GameState,
    resolution: &Resolution,
) -> Result<(), EngineError> {
    match &resolution.connection_id {
        Some(connection_id) => {
            let seat = state.require_seat(connection_id)?;
            let hand = &mut state.hands[seat];
            for tile in &resolution.played_tiles {
                if let Some(pos) = hand.hand.iter().position(|t| t == tile) {
                    hand.hand.remove(pos);
                }
            }
            hand.played_tiles.extend(resolution.played_tiles.iter().copied());
            state.current_turn = seat;
        }
        None => {
            state.current_turn = GameState::next_seat(state.current_turn);
        }
    }

    state.played_tile_interactions.clear();
    state.interaction_count = 0;
    Ok(())
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SEATS, SeatHand};
    use crate::Wall;

    fn tile(code: &str) -> Tile {
        code.parse().unwrap()
    }

    fn tiles(codes: &[&str]) -> Vec<Tile> {
        codes.iter().map(|c| tile(c)).collect()
    }

    fn claim(
        connection_id: &str,
        meld_type: Option<MeldType>,
        played: &[&str],
    ) -> PlayedTileInteraction {
        PlayedTileInteraction {
            connection_id: connection_id.to_string(),
            played_tiles: tiles(played),
            meld_type,
            skip_interaction: false,
        }
    }

    fn skip(connection_id: &str) -> PlayedTileInteraction {
        PlayedTileInteraction {
            connection_id: connection_id.to_string(),
            played_tiles: Vec::new(),
            meld_type: None,
            skip_interaction: true,
        }
    }

    /// A bare table: four seats c0..c3, empty wall, no tiles dealt.
    fn table() -> GameState {
        GameState {
            game_id: "G1".into(),
            wall: Wall::from_tiles(Vec::new()),
            hands: (0..SEATS)
                .map(|i| SeatHand {
                    connection_id: format!("c{i}"),
                    hand: Vec::new(),
                    played_tiles: Vec::new(),
                    bonus_tiles: Vec::new(),
                })
                .collect(),
            dealer: 0,
            current_wind: 0,
            current_turn: 0,
            played_tile_interactions: Vec::new(),
            interaction_count: 0,
            version: 0,
        }
    }

    fn seat_lookup(state: &GameState) -> impl Fn(&str) -> Option<usize> + '_ {
        move |id| state.seat_of(id)
    }

    // ---------------------------------------------------------------
    // record_claim
    // ---------------------------------------------------------------

    #[test]
    fn test_record_claim_counts_to_quorum() {
        let mut state = table();

        assert_eq!(
            record_claim(&mut state, skip("c1")).unwrap(),
            InteractionPhase::Collecting
        );
        assert_eq!(
            record_claim(&mut state, skip("c2")).unwrap(),
            InteractionPhase::Collecting
        );
        assert_eq!(
            record_claim(&mut state, skip("c3")).unwrap(),
            InteractionPhase::Resolving
        );
        assert_eq!(state.interaction_count, 3);
        assert_eq!(state.played_tile_interactions.len(), 3);
    }

    #[test]
    fn test_duplicate_claim_rejected_without_corrupting_round() {
        let mut state = table();
        record_claim(&mut state, skip("c1")).unwrap();

        let err = record_claim(
            &mut state,
            claim("c1", Some(MeldType::Triplet), &["5_DOT", "5_DOT", "5_DOT"]),
        )
        .unwrap_err();
        assert_eq!(
            err,
            EngineError::DuplicateClaim {
                connection_id: "c1".into()
            }
        );

        // The original claim survives untouched and the count is honest.
        assert_eq!(state.interaction_count, 1);
        assert_eq!(state.played_tile_interactions.len(), 1);
        assert!(state.played_tile_interactions[0].skip_interaction);

        // Other seats still get through.
        record_claim(&mut state, skip("c2")).unwrap();
        assert_eq!(state.interaction_count, 2);
    }

    // ---------------------------------------------------------------
    // resolve — the priority table
    // ---------------------------------------------------------------

    #[test]
    fn test_triplet_beats_consecutive_regardless_of_arrival() {
        // Discarder is seat 0; seat 1 (next) asks Consecutive first,
        // seat 2's Triplet still wins.
        let state = table();
        let claims = vec![
            claim("c1", Some(MeldType::Consecutive), &["1_DOT", "2_DOT", "3_DOT"]),
            claim("c2", Some(MeldType::Triplet), &["3_DOT", "3_DOT", "3_DOT"]),
            skip("c3"),
        ];

        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution.connection_id.as_deref(), Some("c2"));
        assert_eq!(resolution.meld_type, Some(MeldType::Triplet));
        assert!(!resolution.skip_interaction);
    }

    #[test]
    fn test_quad_wins_like_a_triplet() {
        let state = table();
        let claims = vec![
            skip("c1"),
            skip("c3"),
            claim(
                "c2",
                Some(MeldType::Quad),
                &["9_BAMBOO", "9_BAMBOO", "9_BAMBOO", "9_BAMBOO"],
            ),
        ];

        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution.connection_id.as_deref(), Some("c2"));
        assert_eq!(resolution.meld_type, Some(MeldType::Quad));
    }

    #[test]
    fn test_consecutive_wins_only_from_the_next_seat() {
        let state = table();
        let chow = ["4_CHARACTER", "5_CHARACTER", "6_CHARACTER"];

        // Seat 1 follows seat 0: allowed.
        let claims = vec![
            claim("c1", Some(MeldType::Consecutive), &chow),
            skip("c2"),
            skip("c3"),
        ];
        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution.connection_id.as_deref(), Some("c1"));
        assert_eq!(resolution.meld_type, Some(MeldType::Consecutive));

        // The same claim from seat 3 is ignored: nobody wins.
        let claims = vec![
            claim("c3", Some(MeldType::Consecutive), &chow),
            skip("c1"),
            skip("c2"),
        ];
        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution, Resolution::skipped());
    }

    #[test]
    fn test_consecutive_next_seat_wraps_around_the_table() {
        // Discarder is seat 3, so the eligible chow seat is 0.
        let state = table();
        let claims = vec![
            claim("c0", Some(MeldType::Consecutive), &["1_DOT", "2_DOT", "3_DOT"]),
            skip("c1"),
            skip("c2"),
        ];

        let resolution = resolve(&claims, 3, seat_lookup(&state));
        assert_eq!(resolution.connection_id.as_deref(), Some("c0"));
    }

    #[test]
    fn test_all_skips_resolve_to_synthetic_skip() {
        let state = table();
        let claims = vec![skip("c1"), skip("c2"), skip("c3")];

        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution, Resolution::skipped());
        assert!(resolution.skip_interaction);
        assert!(resolution.played_tiles.is_empty());
        assert_eq!(resolution.meld_type, None);
    }

    #[test]
    fn test_two_triplet_claims_first_arrival_wins() {
        // Documented tie-break: first in store-accepted order, no
        // fairness inference beyond that.
        let state = table();
        let trip = ["7_DOT", "7_DOT", "7_DOT"];
        let claims = vec![
            claim("c3", Some(MeldType::Triplet), &trip),
            claim("c1", Some(MeldType::Triplet), &trip),
            skip("c2"),
        ];

        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution.connection_id.as_deref(), Some("c3"));
    }

    #[test]
    fn test_unseated_consecutive_claimant_is_ignored() {
        let state = table();
        let claims = vec![
            claim("ghost", Some(MeldType::Consecutive), &["1_DOT", "2_DOT", "3_DOT"]),
            skip("c2"),
            skip("c3"),
        ];

        let resolution = resolve(&claims, 0, seat_lookup(&state));
        assert_eq!(resolution, Resolution::skipped());
    }

    // ---------------------------------------------------------------
    // apply_resolution
    // ---------------------------------------------------------------

    #[test]
    fn test_apply_winner_moves_meld_and_turn() {
        let mut state = table();
        state.current_turn = 0;
        // Seat 2 holds two matching tiles; the third is the discard.
        state.hands[2].hand = tiles(&["3_DOT", "3_DOT", "8_BAMBOO"]);
        record_claim(
            &mut state,
            claim("c2", Some(MeldType::Triplet), &["3_DOT", "3_DOT", "3_DOT"]),
        )
        .unwrap();
        record_claim(&mut state, skip("c1")).unwrap();
        record_claim(&mut state, skip("c3")).unwrap();

        let resolution = resolve(
            &state.played_tile_interactions,
            state.current_turn,
            |id| state.seat_of(id),
        );
        apply_resolution(&mut state, &resolution).unwrap();

        // Two copies left the hand, the full meld is face-up.
        assert_eq!(state.hands[2].hand, tiles(&["8_BAMBOO"]));
        assert_eq!(
            state.hands[2].played_tiles,
            tiles(&["3_DOT", "3_DOT", "3_DOT"])
        );
        assert_eq!(state.current_turn, 2);

        // Interaction state cleared atomically with the meld change.
        assert!(state.played_tile_interactions.is_empty());
        assert_eq!(state.interaction_count, 0);
    }

    #[test]
    fn test_apply_skip_passes_turn_to_next_seat() {
        let mut state = table();
        state.current_turn = 3;
        record_claim(&mut state, skip("c0")).unwrap();
        record_claim(&mut state, skip("c1")).unwrap();
        record_claim(&mut state, skip("c2")).unwrap();

        apply_resolution(&mut state, &Resolution::skipped()).unwrap();

        assert_eq!(state.current_turn, 0);
        assert!(state.played_tile_interactions.is_empty());
        assert_eq!(state.interaction_count, 0);
    }

    #[test]
    fn test_apply_with_unknown_winner_is_an_error() {
        let mut state = table();
        let resolution = Resolution {
            meld_type: Some(MeldType::Triplet),
            played_tiles: tiles(&["3_DOT", "3_DOT", "3_DOT"]),
            skip_interaction: false,
            connection_id: Some("ghost".into()),
        };

        assert!(matches!(
            apply_resolution(&mut state, &resolution),
            Err(EngineError::UnknownSeat { .. })
        ));
    }

    // ---------------------------------------------------------------
    // Wire shapes
    // ---------------------------------------------------------------

    #[test]
    fn test_claim_wire_shape() {
        let c = claim("c1", Some(MeldType::Triplet), &["5_DOT", "5_DOT", "5_DOT"]);
        let json: serde_json::Value = serde_json::to_value(&c).unwrap();

        assert_eq!(json["connectionId"], "c1");
        assert_eq!(json["meldType"], "TRIPLET");
        assert_eq!(json["skipInteraction"], false);
        assert_eq!(
            json["playedTiles"],
            serde_json::json!(["5_DOT", "5_DOT", "5_DOT"])
        );

        let back: PlayedTileInteraction = serde_json::from_value(json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn test_skip_claim_serializes_meld_type_as_empty_string() {
        let json: serde_json::Value = serde_json::to_value(skip("c3")).unwrap();
        assert_eq!(json["meldType"], "");
        assert_eq!(json["skipInteraction"], true);

        let back: PlayedTileInteraction = serde_json::from_value(json).unwrap();
        assert_eq!(back.meld_type, None);
    }

    #[test]
    fn test_meld_type_wire_names() {
        for (meld, name) in [
            (MeldType::Triplet, "\"TRIPLET\""),
            (MeldType::Quad, "\"QUAD\""),
            (MeldType::Consecutive, "\"CONSECUTIVE\""),
        ] {
            assert_eq!(serde_json::to_string(&meld).unwrap(), name);
        }
    }

    #[test]
    fn test_resolution_omits_connection_id_when_skipped() {
        let json: serde_json::Value =
            serde_json::to_value(Resolution::skipped()).unwrap();
        assert!(json.get("connectionId").is_none());
        assert_eq!(json["skipInteraction"], true);
        assert_eq!(json["meldType"], "");
    }
}
