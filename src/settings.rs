//! Card tuning
//!
//! Every timing and size the card uses, with defaults from `consts`. A page can
//! override any subset through a JSON block:
//!
//! ```html
//! <script id="card-config" type="application/json">{ "cooldown_ms": 400 }</script>
//! ```

use serde::{Deserialize, Serialize};

use crate::CardError;
use crate::consts::*;

/// Card settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// RNG seed; `None` seeds from the clock at startup
    pub seed: Option<u64>,

    // === Decline button evasion ===
    pub trigger_distance: f32,
    pub cooldown_ms: f64,
    pub evade_tries: u32,
    pub zone_padding: f32,

    // === Confetti ===
    pub confetti_count: usize,
    pub celebration_confetti_ms: f64,

    // === Stage timing ===
    pub envelope_fade_delay_ms: f64,
    pub letter_reveal_delay_ms: f64,
    pub question_fade_ms: f64,
    pub letter_fade_ms: f64,

    // === Hearts ===
    pub heart_count: usize,
    pub heart_lifetime_ms: f64,

    // === Accept button ===
    pub accept_scale_step: f32,
    pub accept_scale_max: f32,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            seed: None,

            trigger_distance: TRIGGER_DISTANCE,
            cooldown_ms: COOLDOWN_MS,
            evade_tries: EVADE_TRIES,
            zone_padding: ZONE_PADDING,

            confetti_count: CONFETTI_COUNT,
            celebration_confetti_ms: CELEBRATION_CONFETTI_MS,

            envelope_fade_delay_ms: ENVELOPE_FADE_DELAY_MS,
            letter_reveal_delay_ms: LETTER_REVEAL_DELAY_MS,
            question_fade_ms: QUESTION_FADE_MS,
            letter_fade_ms: LETTER_FADE_MS,

            heart_count: HEART_COUNT,
            heart_lifetime_ms: HEART_LIFETIME_MS,

            accept_scale_step: ACCEPT_SCALE_STEP,
            accept_scale_max: ACCEPT_SCALE_MAX,
        }
    }
}

impl CardConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, CardError> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    /// Clamp values that would break the card into something usable
    pub fn validated(mut self) -> Self {
        fn non_negative(v: f64) -> f64 {
            if v.is_finite() { v.max(0.0) } else { 0.0 }
        }

        self.trigger_distance = self.trigger_distance.max(0.0);
        self.zone_padding = self.zone_padding.max(0.0);
        self.cooldown_ms = non_negative(self.cooldown_ms);
        self.celebration_confetti_ms = non_negative(self.celebration_confetti_ms);
        self.envelope_fade_delay_ms = non_negative(self.envelope_fade_delay_ms);
        self.letter_reveal_delay_ms = non_negative(self.letter_reveal_delay_ms);
        self.question_fade_ms = non_negative(self.question_fade_ms);
        self.letter_fade_ms = non_negative(self.letter_fade_ms);
        self.heart_lifetime_ms = non_negative(self.heart_lifetime_ms);
        self.accept_scale_step = self.accept_scale_step.max(0.0);
        self.accept_scale_max = self.accept_scale_max.max(1.0);
        self
    }

    /// Accept button scale after `rejections` declines
    pub fn accept_scale(&self, rejections: u32) -> f32 {
        (1.0 + rejections as f32 * self.accept_scale_step).min(self.accept_scale_max)
    }

    /// DOM id of the optional JSON override block
    pub const ELEMENT_ID: &'static str = "card-config";

    /// Read the override block from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load(document: &web_sys::Document) -> Self {
        let Some(json) = document
            .get_element_by_id(Self::ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            log::info!("Using default card config");
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded card config from #{}", Self::ELEMENT_ID);
                config
            }
            Err(e) => {
                log::warn!("{e}; using defaults");
                Self::default()
            }
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
