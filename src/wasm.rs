use wasm_bindgen::prelude::*;

use crate::config::MatchConfig;
use crate::rules::Ruleset;
use crate::session::Session;
use crate::snapshot;
use crate::types::MoveReport;

/// Match handle exported to the page.
#[wasm_bindgen]
pub struct MangalaGame {
    session: Session,
}

#[wasm_bindgen]
impl MangalaGame {
    /// `options` may be `undefined` or an object like `{ ruleset: "turk", selfSow: true }`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<MangalaGame, JsError> {
        let config: MatchConfig = if options.is_undefined() || options.is_null() {
            MatchConfig::default()
        } else {
            serde_wasm_bindgen::from_value(options)?
        };
        Ok(Self {
            session: Session::new(config),
        })
    }

    /// Starts a match from a page attribute such as `data-ruleset`.
    #[wasm_bindgen(js_name = fromTag)]
    pub fn from_tag(tag: &str) -> MangalaGame {
        Self {
            session: Session::new(MatchConfig::new(Ruleset::from_tag_or_default(tag))),
        }
    }

    /// Plays a pit. Rejected moves come back with `accepted: false`.
    #[wasm_bindgen(js_name = makeMove)]
    pub fn make_move(&mut self, pit: usize) -> Result<JsValue, JsError> {
        let report = match self.session.play(pit) {
            Ok(resolution) => resolution.to_report(),
            Err(err) => MoveReport::rejected(err.code(), err.to_string()),
        };
        Ok(serde_wasm_bindgen::to_value(&report)?)
    }

    #[wasm_bindgen(js_name = isLegalMove)]
    pub fn is_legal_move(&self, pit: usize) -> bool {
        self.session.is_legal_move(pit)
    }

    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Vec<u8> {
        self.session
            .legal_moves()
            .into_iter()
            .map(|pit| pit as u8)
            .collect()
    }

    pub fn state(&self) -> Result<JsValue, JsError> {
        Ok(serde_wasm_bindgen::to_value(&self.session.view())?)
    }

    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.session.is_animating()
    }

    /// Reveals the next sown stone; `false` once the move is fully shown.
    #[wasm_bindgen(js_name = stepAnimation)]
    pub fn step_animation(&mut self) -> bool {
        self.session.advance()
    }

    #[wasm_bindgen(js_name = finishAnimation)]
    pub fn finish_animation(&mut self) {
        self.session.finish();
    }

    pub fn reset(&mut self) {
        self.session.reset();
    }

    #[wasm_bindgen(js_name = setRuleset)]
    pub fn set_ruleset(&mut self, tag: &str) -> Result<(), JsError> {
        let ruleset: Ruleset = tag.parse().map_err(|e: String| JsError::new(&e))?;
        self.session.switch_ruleset(ruleset)?;
        Ok(())
    }

    /// Current match as a checksummed blob (e.g. for localStorage).
    pub fn save(&self) -> Vec<u8> {
        snapshot::to_bytes(self.session.state())
    }

    pub fn load(bytes: &[u8]) -> Result<MangalaGame, JsError> {
        let state = snapshot::from_bytes(bytes)?;
        Ok(Self {
            session: Session::resume(state),
        })
    }
}
