use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::rules::{MAX_SLOTS, Ruleset, STONES_PER_PIT};
use crate::types::Player;

/// Mangala board: a ring of pit counts, stores included for Kalah.
///
/// Serialized as the plain slot list; decoding goes through [`Board::from_slots`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct Board {
    slots: [u8; MAX_SLOTS],
    len: usize,
}

/// Where the stones of one move went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sowing {
    /// Slot of every deposited stone, in order.
    pub path: Vec<u8>,
    pub last_pit: usize,
}

impl Board {
    /// Creates the opening board: 4 stones per pit, empty stores.
    pub fn new(ruleset: Ruleset) -> Self {
        let mut board = Self {
            slots: [0; MAX_SLOTS],
            len: ruleset.ring_size(),
        };
        for player in Player::ALL {
            for pit in ruleset.row(player) {
                board.slots[pit] = STONES_PER_PIT;
            }
        }
        board
    }

    /// Builds a board from raw slot counts in ring order.
    /// Returns `None` when the slot count does not fit the ruleset.
    pub fn from_slots(ruleset: Ruleset, slots: &[u8]) -> Option<Self> {
        if slots.len() != ruleset.ring_size() {
            return None;
        }
        let mut board = Self {
            slots: [0; MAX_SLOTS],
            len: slots.len(),
        };
        board.slots[..slots.len()].copy_from_slice(slots);
        Some(board)
    }

    pub fn slots(&self) -> &[u8] {
        &self.slots[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn get(&self, slot: usize) -> u8 {
        self.slots().get(slot).copied().unwrap_or(0)
    }

    /// Stones on the board, stores included.
    pub fn total(&self) -> u32 {
        self.slots().iter().map(|&s| u32::from(s)).sum()
    }

    pub fn row_is_empty(&self, ruleset: Ruleset, player: Player) -> bool {
        self.slots[ruleset.row(player)].iter().all(|&s| s == 0)
    }

    /// Empties a slot and returns what it held.
    pub fn take(&mut self, slot: usize) -> u8 {
        std::mem::take(&mut self.slots[slot])
    }

    pub fn add(&mut self, slot: usize, stones: u8) {
        self.slots[slot] += stones;
    }

    /// Picks up every stone in `origin` and deposits them one by one around
    /// the ring on behalf of `player`.
    ///
    /// With `into_origin` the first stone drops back into `origin` before the
    /// rest move on. The opponent's store, if any, never receives a stone.
    /// Caller contract: `origin` holds at least one stone.
    pub fn sow(
        &mut self,
        ruleset: Ruleset,
        player: Player,
        origin: usize,
        into_origin: bool,
    ) -> Sowing {
        let stones = self.take(origin);
        debug_assert!(stones > 0, "sow() requires a non-empty pit");

        let mut pit = origin;
        let mut path = Vec::with_capacity(stones as usize);
        for i in 0..stones {
            if !(into_origin && i == 0) {
                pit = ruleset.next_pit(pit, player);
            }
            self.slots[pit] += 1;
            path.push(pit as u8);
        }

        Sowing {
            path,
            last_pit: pit,
        }
    }

    /// Moves every stone left in each row into its owner's bucket and returns
    /// the amounts swept for player 1 and player 2.
    pub fn sweep_rows(&mut self, ruleset: Ruleset) -> [u32; 2] {
        let mut swept = [0u32; 2];
        for player in Player::ALL {
            for pit in ruleset.row(player) {
                swept[player.index()] += u32::from(self.take(pit));
            }
        }
        swept
    }
}

impl TryFrom<Vec<u8>> for Board {
    type Error = StateError;

    fn try_from(slots: Vec<u8>) -> Result<Self, Self::Error> {
        Ruleset::ALL
            .into_iter()
            .find_map(|ruleset| Board::from_slots(ruleset, &slots))
            .ok_or(StateError::RingSize(slots.len()))
    }
}

impl From<Board> for Vec<u8> {
    fn from(board: Board) -> Self {
        board.slots().to_vec()
    }
}
