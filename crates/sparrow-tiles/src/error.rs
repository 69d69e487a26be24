//! Error types for the tile layer.

/// Errors raised where tile data enters the system.
///
/// Both variants are fatal at the boundary that produced them: a rank
/// outside its range or a code that matches no pattern is never clamped
/// or defaulted, it is surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TileError {
    /// A Simple or Bonus tile was constructed with a rank outside the
    /// range its category allows.
    #[error("rank {rank} out of range {min}..={max} for {family} tile")]
    RangeViolation {
        family: &'static str,
        rank: u8,
        min: u8,
        max: u8,
    },

    /// A tile code matched no known encoding pattern.
    #[error("malformed tile code: {0:?}")]
    MalformedTileCode(String),
}
