use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rules::Ruleset;

/// One of the two sides of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub const ALL: [Player; 2] = [Player::One, Player::Two];

    pub fn opponent(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// 1 or 2, as shown to players.
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Player::One => 0,
            Player::Two => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Public match state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchView {
    pub ruleset: Ruleset,
    /// Pit counts in ring order; Kalah includes both stores.
    pub board: Vec<u8>,
    pub current_player: u8,
    /// Store contents for Kalah, treasury for Turkish.
    pub player1_score: u32,
    pub player2_score: u32,
    pub is_game_over: bool,
    /// Contract:
    /// - `None` while the match is running.
    /// - `Some(0)` for a draw, `Some(1)` / `Some(2)` for the winner.
    pub winner: Option<u8>,
    pub is_animating: bool,
    /// Pits the current player may pick; empty while animating or after the end.
    pub selectable: Vec<u8>,
}

/// Result of a move request returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveReport {
    pub accepted: bool,
    /// Stable error code when `accepted` is false.
    pub reject_reason: Option<String>,
    /// Human-readable rejection message.
    pub message: Option<String>,
    /// Stones taken by a capture, 0 when none.
    pub captured: u32,
    pub extra_turn: bool,
    /// Contract: same encoding as [`MatchView::winner`].
    pub winner: Option<u8>,
    /// Slot of every deposited stone, in sowing order.
    pub path: Vec<u8>,
}

impl MoveReport {
    pub fn rejected(code: &str, message: String) -> Self {
        Self {
            accepted: false,
            reject_reason: Some(code.to_string()),
            message: Some(message),
            captured: 0,
            extra_turn: false,
            winner: None,
            path: Vec::new(),
        }
    }
}
