use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

use crate::board::Board;
use crate::config::MatchConfig;
use crate::error::{MoveError, StateError};
use crate::rules::{CaptureRule, Ruleset, TOTAL_STONES};
use crate::types::{MatchView, MoveReport, Player};

/// How a finished match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win(Player),
    Draw,
}

impl Outcome {
    fn from_scores(player1: u32, player2: u32) -> Self {
        match player1.cmp(&player2) {
            std::cmp::Ordering::Greater => Outcome::Win(Player::One),
            std::cmp::Ordering::Less => Outcome::Win(Player::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// 0 for a draw, otherwise the winner's number.
    pub fn code(self) -> u8 {
        match self {
            Outcome::Win(player) => player.number(),
            Outcome::Draw => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    InProgress,
    Finished(Outcome),
}

/// Stones taken off the opponent by a capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    /// Emptied pits, landing pit first.
    pub pits: Vec<usize>,
    pub stones: u32,
}

/// Everything that happened during one accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveResolution {
    pub mover: Player,
    pub origin: usize,
    pub path: Vec<u8>,
    pub last_pit: usize,
    pub extra_turn: bool,
    pub capture: Option<Capture>,
    /// Set when this move ended the match.
    pub outcome: Option<Outcome>,
}

impl MoveResolution {
    pub fn captured(&self) -> u32 {
        self.capture.as_ref().map_or(0, |c| c.stones)
    }

    pub fn to_report(&self) -> MoveReport {
        MoveReport {
            accepted: true,
            reject_reason: None,
            message: None,
            captured: self.captured(),
            extra_turn: self.extra_turn,
            winner: self.outcome.map(Outcome::code),
            path: self.path.clone(),
        }
    }
}

/// A full match: board, scores, whose turn it is and whether it is over.
///
/// Decoding goes through [`MatchState::from_parts`], so a deserialized match
/// always satisfies the same invariants as one reached by play.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatchState")]
pub struct MatchState {
    config: MatchConfig,
    board: Board,
    current: Player,
    /// Off-board scores; only Turkish uses them.
    treasury: [u32; 2],
    status: Status,
}

#[derive(Deserialize)]
struct RawMatchState {
    config: MatchConfig,
    board: Board,
    current: Player,
    treasury: [u32; 2],
    status: Status,
}

impl TryFrom<RawMatchState> for MatchState {
    type Error = StateError;

    fn try_from(raw: RawMatchState) -> Result<Self, Self::Error> {
        Self::from_parts(raw.config, raw.board, raw.current, raw.treasury, raw.status)
    }
}

impl MatchState {
    pub fn new(config: MatchConfig) -> Self {
        Self {
            config,
            board: Board::new(config.ruleset),
            current: Player::One,
            treasury: [0, 0],
            status: Status::InProgress,
        }
    }

    pub fn for_ruleset(ruleset: Ruleset) -> Self {
        Self::new(MatchConfig::new(ruleset))
    }

    /// Assembles a state from its parts, checking every board invariant.
    pub fn from_parts(
        config: MatchConfig,
        board: Board,
        current: Player,
        treasury: [u32; 2],
        status: Status,
    ) -> Result<Self, StateError> {
        let ruleset = config.ruleset;
        if board.len() != ruleset.ring_size() {
            return Err(StateError::SlotCount {
                ruleset,
                expected: ruleset.ring_size(),
                actual: board.len(),
            });
        }
        if ruleset.has_stores() && treasury != [0, 0] {
            return Err(StateError::TreasuryInKalah);
        }
        let total = board.total() + treasury[0] + treasury[1];
        if total != TOTAL_STONES {
            return Err(StateError::StoneCount {
                expected: TOTAL_STONES,
                actual: total,
            });
        }

        let state = Self {
            config,
            board,
            current,
            treasury,
            status,
        };
        let empty_row = Player::ALL
            .into_iter()
            .find(|&p| board.row_is_empty(ruleset, p));
        match status {
            Status::InProgress => {
                if let Some(player) = empty_row {
                    return Err(StateError::RowEmptyInProgress(player));
                }
            }
            Status::Finished(outcome) => {
                if Player::ALL
                    .into_iter()
                    .any(|p| !board.row_is_empty(ruleset, p))
                {
                    return Err(StateError::StonesLeftAfterEnd);
                }
                let expected =
                    Outcome::from_scores(state.score(Player::One), state.score(Player::Two));
                if outcome != expected {
                    return Err(StateError::WinnerMismatch);
                }
            }
        }
        Ok(state)
    }

    pub fn config(&self) -> MatchConfig {
        self.config
    }

    pub fn ruleset(&self) -> Ruleset {
        self.config.ruleset
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.status, Status::Finished(_))
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Finished(outcome) => Some(outcome),
            Status::InProgress => None,
        }
    }

    pub fn treasury(&self, player: Player) -> u32 {
        self.treasury[player.index()]
    }

    /// Store contents for Kalah, treasury for Turkish.
    pub fn score(&self, player: Player) -> u32 {
        match self.ruleset().store_of(player) {
            Some(store) => u32::from(self.board.get(store)),
            None => self.treasury(player),
        }
    }

    /// Checks a move for the current player without playing it.
    pub fn check_move(&self, pit: usize) -> Result<(), MoveError> {
        let ruleset = self.ruleset();
        if self.is_game_over() {
            return Err(MoveError::MatchAlreadyOver);
        }
        if pit >= ruleset.ring_size() {
            return Err(MoveError::InvalidPitIndex {
                pit,
                ring_size: ruleset.ring_size(),
            });
        }
        if !ruleset.is_own_row(pit, self.current) {
            return Err(MoveError::WrongRow {
                pit,
                player: self.current,
            });
        }
        if self.board.get(pit) == 0 {
            return Err(MoveError::EmptyPit(pit));
        }
        Ok(())
    }

    pub fn is_legal_move(&self, pit: usize) -> bool {
        self.check_move(pit).is_ok()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_game_over() {
            return Vec::new();
        }
        self.ruleset()
            .row(self.current)
            .filter(|&pit| self.board.get(pit) > 0)
            .collect()
    }

    /// Plays `pit` for the current player and returns the resulting state.
    /// `self` is left unchanged either way.
    pub fn play(&self, pit: usize) -> Result<(MatchState, MoveResolution), MoveError> {
        let mut next = self.clone();
        let resolution = next.apply(pit)?;
        Ok((next, resolution))
    }

    #[instrument(level = "debug", skip(self), fields(ruleset = ?self.config.ruleset, player = %self.current))]
    fn apply(&mut self, pit: usize) -> Result<MoveResolution, MoveError> {
        if let Err(err) = self.check_move(pit) {
            trace!(%err, "move rejected");
            return Err(err);
        }

        let ruleset = self.ruleset();
        let mover = self.current;
        let sowing = self
            .board
            .sow(ruleset, mover, pit, self.config.sows_into_origin());
        let last_pit = sowing.last_pit;

        let extra_turn = ruleset.grants_extra_turn(last_pit, mover);
        let capture = self.capture(last_pit, mover);
        if let Some(capture) = &capture {
            trace!(pits = ?capture.pits, stones = capture.stones, "captured");
        }

        let outcome = self.finish_if_row_empty();
        if outcome.is_none() && !extra_turn {
            self.current = mover.opponent();
        }

        debug!(last_pit, extra_turn, ?outcome, "move applied");
        Ok(MoveResolution {
            mover,
            origin: pit,
            path: sowing.path,
            last_pit,
            extra_turn,
            capture,
            outcome,
        })
    }

    fn capture(&mut self, last_pit: usize, mover: Player) -> Option<Capture> {
        let ruleset = self.ruleset();
        match ruleset.layout().capture {
            CaptureRule::OppositeOfEmptyOwnPit => {
                if !ruleset.is_own_row(last_pit, mover) || self.board.get(last_pit) != 1 {
                    return None;
                }
                let opposite = ruleset.opposite(last_pit)?;
                let store = ruleset.store_of(mover)?;
                if self.board.get(opposite) == 0 {
                    return None;
                }
                let stones =
                    u32::from(self.board.take(last_pit)) + u32::from(self.board.take(opposite));
                // At most 48 stones exist, so a store always fits in u8.
                self.board.add(store, stones as u8);
                Some(Capture {
                    pits: vec![last_pit, opposite],
                    stones,
                })
            }
            CaptureRule::EvenOpponentPit => {
                if !ruleset.is_own_row(last_pit, mover.opponent()) {
                    return None;
                }
                let count = self.board.get(last_pit);
                if count == 0 || count % 2 != 0 {
                    return None;
                }
                let stones = u32::from(self.board.take(last_pit));
                self.treasury[mover.index()] += stones;
                Some(Capture {
                    pits: vec![last_pit],
                    stones,
                })
            }
        }
    }

    fn finish_if_row_empty(&mut self) -> Option<Outcome> {
        let ruleset = self.ruleset();
        if !Player::ALL
            .into_iter()
            .any(|p| self.board.row_is_empty(ruleset, p))
        {
            return None;
        }

        let swept = self.board.sweep_rows(ruleset);
        for player in Player::ALL {
            let stones = swept[player.index()];
            match ruleset.store_of(player) {
                Some(store) => self.board.add(store, stones as u8),
                None => self.treasury[player.index()] += stones,
            }
        }

        let outcome = Outcome::from_scores(self.score(Player::One), self.score(Player::Two));
        self.status = Status::Finished(outcome);
        Some(outcome)
    }

    /// Same match with a different board, used to show a move mid-sowing.
    pub(crate) fn with_board(&self, board: Board) -> Self {
        Self {
            board,
            ..self.clone()
        }
    }

    pub fn to_view(&self) -> MatchView {
        MatchView {
            ruleset: self.ruleset(),
            board: self.board.slots().to_vec(),
            current_player: self.current.number(),
            player1_score: self.score(Player::One),
            player2_score: self.score(Player::Two),
            is_game_over: self.is_game_over(),
            winner: self.outcome().map(Outcome::code),
            is_animating: false,
            selectable: self.legal_moves().into_iter().map(|p| p as u8).collect(),
        }
    }
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}

/// Result of [`apply_move`]: the next state plus what the page needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub state: MatchState,
    pub accepted: bool,
    pub reject_reason: Option<MoveError>,
    pub captured: Option<u32>,
    pub extra_turn: bool,
    pub winner: Option<Outcome>,
    pub path: Vec<u8>,
}

impl MoveOutcome {
    pub fn to_report(&self) -> MoveReport {
        match self.reject_reason {
            Some(err) => MoveReport::rejected(err.code(), err.to_string()),
            None => MoveReport {
                accepted: true,
                reject_reason: None,
                message: None,
                captured: self.captured.unwrap_or(0),
                extra_turn: self.extra_turn,
                winner: self.winner.map(Outcome::code),
                path: self.path.clone(),
            },
        }
    }
}

/// Plays `pit` on `state`. A rejected move returns the state unchanged with
/// `accepted == false`.
pub fn apply_move(state: &MatchState, pit: usize) -> MoveOutcome {
    match state.play(pit) {
        Ok((next, resolution)) => MoveOutcome {
            state: next,
            accepted: true,
            reject_reason: None,
            captured: resolution.capture.as_ref().map(|c| c.stones),
            extra_turn: resolution.extra_turn,
            winner: resolution.outcome,
            path: resolution.path,
        },
        Err(err) => MoveOutcome {
            state: state.clone(),
            accepted: false,
            reject_reason: Some(err),
            captured: None,
            extra_turn: false,
            winner: None,
            path: Vec::new(),
        },
    }
}
