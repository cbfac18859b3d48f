use wasm_bindgen::prelude::*;

pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod rules;
pub mod session;
pub mod snapshot;
pub mod types;
pub mod wasm;

pub use config::MatchConfig;
pub use error::{MoveError, SnapshotError, StateError};
pub use game::{MatchState, MoveOutcome, Outcome, apply_move};
pub use rules::Ruleset;
pub use session::Session;
pub use types::Player;

#[wasm_bindgen]
pub fn wasm_ready() -> bool {
    true
}
