//! Card simulation module
//!
//! All card logic lives here. This module must stay free of browser types:
//! - Time is passed in (`now_ms`), never read
//! - Seeded RNG only
//! - Outputs are `CardCue`s for the presentation layer to apply

pub mod confetti;
pub mod evade;
pub mod geometry;
pub mod hearts;
pub mod sequencer;
pub mod state;
pub mod tick;
pub mod trigger;

pub use confetti::{ConfettiAnimator, Particle};
pub use evade::{Candidate, relocate};
pub use geometry::{Rect, distance_point_to_rect};
pub use hearts::{FloatingHeart, HEART_GLYPH, spawn_hearts};
pub use sequencer::{EnvelopeStage, QuestionStage, StageCue, StageSequencer};
pub use state::CardState;
pub use tick::{CardCue, CardEvent, handle_event, next_wake, tick};
pub use trigger::{ControlState, Cooldown, EvasionTrigger, TriggerKind};
