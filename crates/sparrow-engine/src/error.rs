//! Error types for the engine layer.

/// Errors that can occur in the table engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Bonus replacement draws emptied the wall before four full hands
    /// were dealt. Fatal: the fixed Hong Kong tile counts guarantee
    /// 144 ≥ 52 + 8, so this only fires on a corrupted or undersized
    /// wall — checked, never assumed.
    #[error("wall exhausted during deal: seat {seat} still needs {missing} tiles")]
    WallExhaustedDuringDeal { seat: usize, missing: usize },

    /// A seat submitted a second claim on the same discard before the
    /// round resolved. Rejected, never silently overwritten; other
    /// seats' claims are unaffected.
    #[error("duplicate claim from {connection_id} on this discard")]
    DuplicateClaim { connection_id: String },

    /// The connection is not seated at this game.
    #[error("connection {connection_id} is not seated at game {game_id}")]
    UnknownSeat {
        game_id: String,
        connection_id: String,
    },
}
