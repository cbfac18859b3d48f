//! Error types for move requests and saved matches.

use crate::rules::Ruleset;
use crate::types::Player;

/// Why a move request was turned down. The match is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("pit {pit} is outside the {ring_size}-slot board")]
    InvalidPitIndex { pit: usize, ring_size: usize },
    #[error("pit {pit} is not in player {player}'s row")]
    WrongRow { pit: usize, player: Player },
    #[error("pit {0} is empty")]
    EmptyPit(usize),
    #[error("match is already over")]
    MatchAlreadyOver,
    #[error("previous move is still being played out")]
    MoveInProgress,
}

impl MoveError {
    /// Stable code handed to the page.
    pub fn code(&self) -> &'static str {
        match self {
            MoveError::InvalidPitIndex { .. } => "invalid_pit_index",
            MoveError::WrongRow { .. } => "wrong_row",
            MoveError::EmptyPit(_) => "empty_pit",
            MoveError::MatchAlreadyOver => "match_already_over",
            MoveError::MoveInProgress => "move_in_progress",
        }
    }
}

/// A board or match that breaks the rules of play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    #[error("a board has 12 or 14 slots, got {0}")]
    RingSize(usize),
    #[error("{ruleset} board needs {expected} slots, got {actual}")]
    SlotCount {
        ruleset: Ruleset,
        expected: usize,
        actual: usize,
    },
    #[error("Kalah keeps its scores in the stores, not a treasury")]
    TreasuryInKalah,
    #[error("stone count must be {expected}, got {actual}")]
    StoneCount { expected: u32, actual: u32 },
    #[error("player {0}'s row is empty but the match is still running")]
    RowEmptyInProgress(Player),
    #[error("finished match still has stones in play")]
    StonesLeftAfterEnd,
    #[error("recorded winner does not match the scores")]
    WinnerMismatch,
}

/// Failure to decode a saved match.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot too short: expected at least {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("invalid snapshot magic (expected MNGL)")]
    BadMagic,
    #[error("unsupported snapshot version: expected {expected}, got {actual}")]
    UnsupportedVersion { expected: u32, actual: u32 },
    #[error("CRC32 mismatch: expected {expected:#010x}, got {actual:#010x}")]
    CrcMismatch { expected: u32, actual: u32 },
    #[error("invalid snapshot: {0}")]
    Invalid(String),
    #[error("invalid snapshot: {0}")]
    State(#[from] StateError),
}
