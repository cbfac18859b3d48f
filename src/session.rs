use tracing::debug;

use crate::board::Board;
use crate::config::MatchConfig;
use crate::error::MoveError;
use crate::game::{MatchState, MoveResolution};
use crate::rules::Ruleset;
use crate::types::MatchView;

/// A move that has been committed but is still being shown stone by stone.
#[derive(Debug, Clone)]
struct Animation {
    before: MatchState,
    frame: Board,
    path: Vec<u8>,
    shown: usize,
}

/// Interactive match holder for the page.
///
/// Moves are committed immediately; the sowing is then replayed one stone at
/// a time through [`Session::advance`]. No other move is accepted until the
/// replay has finished.
#[derive(Debug, Clone)]
pub struct Session {
    state: MatchState,
    animation: Option<Animation>,
}

impl Session {
    pub fn new(config: MatchConfig) -> Self {
        Self::resume(MatchState::new(config))
    }

    /// Continues an existing match, e.g. one restored from a snapshot.
    pub fn resume(state: MatchState) -> Self {
        Self {
            state,
            animation: None,
        }
    }

    /// The committed match, ignoring any replay in progress.
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    pub fn is_legal_move(&self, pit: usize) -> bool {
        !self.is_animating() && self.state.is_legal_move(pit)
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        if self.is_animating() {
            return Vec::new();
        }
        self.state.legal_moves()
    }

    pub fn play(&mut self, pit: usize) -> Result<MoveResolution, MoveError> {
        if self.is_animating() {
            return Err(MoveError::MoveInProgress);
        }

        let (next, resolution) = self.state.play(pit)?;
        let mut frame = *self.state.board();
        frame.take(pit);
        self.animation = Some(Animation {
            before: std::mem::replace(&mut self.state, next),
            frame,
            path: resolution.path.clone(),
            shown: 0,
        });
        Ok(resolution)
    }

    /// Drops the next stone of the replay. Returns `true` while stones remain.
    pub fn advance(&mut self) -> bool {
        let Some(animation) = self.animation.as_mut() else {
            return false;
        };
        if let Some(&slot) = animation.path.get(animation.shown) {
            animation.frame.add(slot as usize, 1);
            animation.shown += 1;
        }
        if animation.shown >= animation.path.len() {
            self.animation = None;
            return false;
        }
        true
    }

    /// Skips the rest of the replay.
    pub fn finish(&mut self) {
        self.animation = None;
    }

    /// Starts a fresh match with the same options.
    pub fn reset(&mut self) {
        debug!(ruleset = ?self.state.ruleset(), "match reset");
        self.animation = None;
        self.state = MatchState::new(self.state.config());
    }

    /// Starts a fresh match under `ruleset`. Switching to the active ruleset
    /// keeps the current match.
    pub fn switch_ruleset(&mut self, ruleset: Ruleset) -> Result<(), MoveError> {
        if self.is_animating() {
            return Err(MoveError::MoveInProgress);
        }
        if self.state.ruleset() == ruleset {
            return Ok(());
        }
        debug!(?ruleset, "ruleset switched");
        let config = MatchConfig {
            ruleset,
            ..self.state.config()
        };
        self.state = MatchState::new(config);
        Ok(())
    }

    /// What the page should draw right now. Mid-replay this is the pre-move
    /// match with the partly sown board.
    pub fn view(&self) -> MatchView {
        match &self.animation {
            Some(animation) => MatchView {
                is_animating: true,
                selectable: Vec::new(),
                ..animation.before.with_board(animation.frame).to_view()
            },
            None => self.state.to_view(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(MatchConfig::default())
    }
}
