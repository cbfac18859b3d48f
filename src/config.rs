use serde::{Deserialize, Serialize};

use crate::rules::Ruleset;

/// Options a match is started with.
///
/// Deserialized from the page's options object, e.g. `{ ruleset: "turk" }`.
/// Missing fields take their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MatchConfig {
    pub ruleset: Ruleset,
    /// Turkish only: the first picked-up stone goes back into its own pit.
    pub self_sow: bool,
}

impl MatchConfig {
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            ruleset,
            ..Self::default()
        }
    }

    /// Whether sowing starts by dropping a stone back into the origin pit.
    pub fn sows_into_origin(&self) -> bool {
        self.ruleset.layout().self_sow && self.self_sow
    }
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            ruleset: Ruleset::Kalah,
            self_sow: true,
        }
    }
}
