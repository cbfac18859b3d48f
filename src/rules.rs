use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::Player;

pub const PITS_PER_ROW: usize = 6;
pub const STONES_PER_PIT: u8 = 4;
pub const TOTAL_STONES: u32 = (PITS_PER_ROW as u32) * 2 * (STONES_PER_PIT as u32);
/// Largest ring of any ruleset (Kalah: 12 pits + 2 stores).
pub const MAX_SLOTS: usize = 14;

/// Which rule set a match is played under.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ruleset {
    #[default]
    #[serde(rename = "kalah")]
    Kalah,
    #[serde(rename = "turk", alias = "turkish")]
    Turkish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRule {
    /// Last stone in an own empty pit takes that pit and the one across it.
    OppositeOfEmptyOwnPit,
    /// Last stone turning an opponent pit even takes the whole pit.
    EvenOpponentPit,
}

/// Per-ruleset board geometry and rule switches.
#[derive(Debug)]
pub struct Layout {
    pub ring_size: usize,
    row_start: [usize; 2],
    stores: Option<[usize; 2]>,
    pub capture: CaptureRule,
    pub extra_turn_in_store: bool,
    pub self_sow: bool,
}

static KALAH: Layout = Layout {
    ring_size: 14,
    row_start: [0, 7],
    stores: Some([6, 13]),
    capture: CaptureRule::OppositeOfEmptyOwnPit,
    extra_turn_in_store: true,
    self_sow: false,
};

static TURKISH: Layout = Layout {
    ring_size: 12,
    row_start: [0, 6],
    stores: None,
    capture: CaptureRule::EvenOpponentPit,
    extra_turn_in_store: false,
    self_sow: true,
};

impl Ruleset {
    pub const ALL: [Ruleset; 2] = [Ruleset::Kalah, Ruleset::Turkish];

    pub fn layout(self) -> &'static Layout {
        match self {
            Ruleset::Kalah => &KALAH,
            Ruleset::Turkish => &TURKISH,
        }
    }

    /// Parses a page attribute the way the browser page does: anything other
    /// than a Turkish tag selects Kalah.
    pub fn from_tag_or_default(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }

    pub fn ring_size(self) -> usize {
        self.layout().ring_size
    }

    pub fn has_stores(self) -> bool {
        self.layout().stores.is_some()
    }

    /// Pit indices of `player`'s row, stores excluded.
    pub fn row(self, player: Player) -> Range<usize> {
        let start = self.layout().row_start[player.index()];
        start..start + PITS_PER_ROW
    }

    pub fn is_own_row(self, pit: usize, player: Player) -> bool {
        self.row(player).contains(&pit)
    }

    /// Owner of a pit. Stores and out-of-range indices have none.
    pub fn owner_of(self, pit: usize) -> Option<Player> {
        Player::ALL.into_iter().find(|&p| self.is_own_row(pit, p))
    }

    pub fn store_of(self, player: Player) -> Option<usize> {
        self.layout().stores.map(|s| s[player.index()])
    }

    pub fn is_own_store(self, pit: usize, player: Player) -> bool {
        self.store_of(player) == Some(pit)
    }

    pub fn is_opponent_store(self, pit: usize, player: Player) -> bool {
        self.store_of(player.opponent()) == Some(pit)
    }

    /// The pit across the board from `pit`.
    pub fn opposite(self, pit: usize) -> Option<usize> {
        self.owner_of(pit)?;
        match self {
            Ruleset::Kalah => Some(12 - pit),
            Ruleset::Turkish => Some(self.ring_size() - 1 - pit),
        }
    }

    /// Next slot a stone sown by `player` lands in after `pit`.
    pub fn next_pit(self, pit: usize, player: Player) -> usize {
        let ring = self.ring_size();
        let mut next = (pit + 1) % ring;
        if self.is_opponent_store(next, player) {
            next = (next + 1) % ring;
        }
        next
    }

    pub fn grants_extra_turn(self, last_pit: usize, player: Player) -> bool {
        self.layout().extra_turn_in_store && self.is_own_store(last_pit, player)
    }
}

impl FromStr for Ruleset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kalah" => Ok(Ruleset::Kalah),
            "turk" | "turkish" => Ok(Ruleset::Turkish),
            other => Err(format!("unknown ruleset: {other:?}")),
        }
    }
}

impl fmt::Display for Ruleset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ruleset::Kalah => f.write_str("Kalah"),
            Ruleset::Turkish => f.write_str("Turkish Mangala"),
        }
    }
}
