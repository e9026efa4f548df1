//! Bracket engine error types.

use thiserror::Error;

use super::entities::{CompetitorId, Side};

/// Contract violations raised by the bracket engine.
///
/// None of these are retryable: each one means the caller handed the engine
/// coordinates or slot arrays that did not come from a well-formed bracket.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BracketError {
    /// Slot count is not a power of two, or is below the minimum capacity
    #[error("Invalid capacity {len}: seed slots must be a power of two and at least 2")]
    InvalidCapacity { len: usize },

    /// More competitors than slots in the range being seeded
    #[error("Cannot seed {teams} competitors into {width} slots")]
    OverCapacity { teams: usize, width: usize },

    /// Round index past the final
    #[error("Round index out of range: {round} (bracket has {rounds} rounds)")]
    RoundOutOfRange { round: usize, rounds: usize },

    /// Match index past the end of its round
    #[error("Match index out of range: round {round} match {index} (round has {matches} matches)")]
    MatchOutOfRange {
        round: usize,
        index: usize,
        matches: usize,
    },

    /// Seed slot index past the end of the slot array
    #[error("Seed slot index out of range: {index} (bracket has {len} slots)")]
    SlotOutOfRange { index: usize, len: usize },

    /// A result was recorded for a side with nobody on it
    #[error("No competitor on side {side} of round {round} match {index}")]
    VacantSide {
        round: usize,
        index: usize,
        side: Side,
    },

    /// A decoded bracket does not have the shape of a single-elimination tree
    #[error("Malformed bracket: {0}")]
    MalformedBracket(String),

    /// Competitor id not present where it was expected
    #[error("Unknown competitor: {0}")]
    UnknownCompetitor(CompetitorId),
}

/// Result type for bracket engine operations
pub type BracketResult<T> = Result<T, BracketError>;
