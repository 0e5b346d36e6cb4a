//! Card state
//!
//! Everything the card mutates lives in one `CardState`: the pointer sample,
//! the decline button placement, the escape cooldown, the rejection counter,
//! the stage sequencer and the confetti session. Nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::confetti::ConfettiAnimator;
use super::evade::relocate;
use super::sequencer::StageSequencer;
use super::trigger::{ControlState, EvasionTrigger, TriggerKind};
use crate::settings::CardConfig;

/// Complete card state
#[derive(Debug, Clone)]
pub struct CardState {
    pub config: CardConfig,
    /// Seed the card was started with
    pub seed: u64,
    rng: Pcg32,
    /// Last known pointer/touch position (viewport space)
    pub pointer: Vec2,
    /// Viewport size in CSS px
    pub viewport: Vec2,
    /// Decline button placement
    pub decline: ControlState,
    pub trigger: EvasionTrigger,
    /// Times the decline button was activated
    pub rejections: u32,
    pub sequencer: StageSequencer,
    pub confetti: ConfettiAnimator,
}

impl CardState {
    pub fn new(config: CardConfig, seed: u64, viewport: Vec2) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        // Confetti gets its own stream so it never shares mutable state with evasion
        let confetti = ConfettiAnimator::new(rng.random());
        Self {
            trigger: EvasionTrigger::new(config.trigger_distance, config.cooldown_ms),
            sequencer: StageSequencer::new(&config),
            config,
            seed,
            rng,
            pointer: viewport * 0.5,
            viewport,
            decline: ControlState::default(),
            rejections: 0,
            confetti,
        }
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }

    /// Whether the decline button has a usable on-screen size
    pub fn decline_visible(&self) -> bool {
        self.decline.size.x > 0.0 && self.decline.size.y > 0.0
    }

    /// Jump the decline button away from `from` and return its new offset
    pub fn escape_from(&mut self, from: Vec2, kind: TriggerKind) -> Vec2 {
        let offset = relocate(
            &mut self.rng,
            from,
            &self.decline.zone,
            self.decline.size,
            self.config.zone_padding,
            self.config.evade_tries,
        );
        self.decline.offset = offset;
        log::trace!(
            "Decline escaped ({:?}) from ({:.0}, {:.0}) to ({:.0}, {:.0})",
            kind,
            from.x,
            from.y,
            offset.x,
            offset.y
        );
        offset
    }

    /// Current accept button scale
    pub fn accept_scale(&self) -> f32 {
        self.config.accept_scale(self.rejections)
    }
}
