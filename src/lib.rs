//! Love Letter - an interactive envelope greeting card
//!
//! Core modules:
//! - `sim`: Pure card logic (evasion targeting, triggers, confetti, stage sequencing)
//! - `renderer`: Particle surfaces and frame scheduling
//! - `platform`: Browser DOM wiring (wasm32 only)
//! - `settings`: Data-driven card tuning

pub mod error;
#[cfg(target_arch = "wasm32")]
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::CardError;
pub use settings::CardConfig;

/// Card tuning constants (defaults for `CardConfig`)
pub mod consts {
    /// Pointer-to-button distance (px) that triggers an escape
    pub const TRIGGER_DISTANCE: f32 = 150.0;
    /// Minimum time between two proximity escapes
    pub const COOLDOWN_MS: f64 = 260.0;
    /// Candidate positions sampled per escape
    pub const EVADE_TRIES: u32 = 40;
    /// Gap kept between the decline button and its zone edges (px)
    pub const ZONE_PADDING: f32 = 10.0;

    /// Confetti pieces per celebration
    pub const CONFETTI_COUNT: usize = 180;
    /// Confetti run time when none is given
    pub const CONFETTI_DEFAULT_MS: f64 = 2800.0;
    /// Confetti run time after the question is accepted
    pub const CELEBRATION_CONFETTI_MS: f64 = 3000.0;
    /// Distance past a viewport edge before a piece wraps (px)
    pub const CONFETTI_WRAP_MARGIN: f32 = 30.0;
    /// Height a piece respawns at after falling out of view (px)
    pub const CONFETTI_RESPAWN_Y: f32 = -20.0;
    /// Opacity of every confetti piece
    pub const CONFETTI_ALPHA: f32 = 0.9;
    /// Confetti colors
    pub const CONFETTI_PALETTE: [&str; 5] = ["#ff4d7d", "#ff99cc", "#ff66b2", "#ffb3d9", "#ffd1e8"];

    /// Envelope flap open -> stage fade
    pub const ENVELOPE_FADE_DELAY_MS: f64 = 520.0;
    /// Stage fade -> letter reveal (980ms after activation in total)
    pub const LETTER_REVEAL_DELAY_MS: f64 = 460.0;
    /// Question fade before it is removed
    pub const QUESTION_FADE_MS: f64 = 350.0;
    /// Letter fade before it is removed and the celebration shows
    pub const LETTER_FADE_MS: f64 = 550.0;

    /// Floating hearts per celebration
    pub const HEART_COUNT: usize = 18;
    /// Time a floating heart stays in the DOM
    pub const HEART_LIFETIME_MS: f64 = 4500.0;

    /// Accept button growth per rejection
    pub const ACCEPT_SCALE_STEP: f32 = 0.15;
    /// Accept button scale cap
    pub const ACCEPT_SCALE_MAX: f32 = 2.2;
    /// Extra scale at the peak of the accept bounce
    pub const ACCEPT_BOUNCE: f32 = 0.08;
    /// Accept bounce duration
    pub const ACCEPT_BOUNCE_MS: f64 = 220.0;
}
