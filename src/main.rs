//! Love Letter entry point
//!
//! On the web this boots the DOM card. Natively it plays a scripted session
//! against the headless core and logs what the page would have done.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    love_letter::platform::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Love Letter (native) starting...");
    log::info!("Native mode is a headless replay - serve the wasm build for the real card");

    headless::run();
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use glam::Vec2;

    use love_letter::CardConfig;
    use love_letter::renderer::{FrameOutcome, FrameScheduler, ParticleSurface, run_frame};
    use love_letter::sim::{CardCue, CardEvent, CardState, Particle, Rect, handle_event, next_wake, tick};

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);
    const FRAME_MS: f64 = 1000.0 / 60.0;

    /// Counts draw calls instead of painting
    #[derive(Default)]
    struct CountingSurface {
        frames: usize,
        pieces: usize,
    }

    impl ParticleSurface for CountingSurface {
        fn clear(&mut self, _viewport: Vec2) {
            self.frames += 1;
        }

        fn draw_particle(&mut self, _particle: &Particle) {
            self.pieces += 1;
        }

        fn set_visible(&mut self, visible: bool) {
            log::debug!("Confetti surface visible: {visible}");
        }
    }

    #[derive(Default)]
    struct NextFrame(bool);

    impl FrameScheduler for NextFrame {
        fn schedule_next_frame(&mut self) {
            self.0 = true;
        }
    }

    fn report(now: f64, cues: &[CardCue]) {
        for cue in cues {
            match cue {
                CardCue::Hearts(hearts) => log::info!("[{now:>6.0}ms] {} hearts", hearts.len()),
                other => log::info!("[{now:>6.0}ms] {other:?}"),
            }
        }
    }

    /// Release stage deadlines up to `until`
    fn run_timers(state: &mut CardState, until: f64) {
        while let Some(deadline) = next_wake(state) {
            if deadline > until {
                break;
            }
            let cues = tick(state, deadline);
            report(deadline, &cues);
        }
    }

    pub fn run() {
        let config = CardConfig::load();
        let seed = config.seed.unwrap_or(0x0214);
        let mut state = CardState::new(config, seed, VIEWPORT);
        log::info!("Card initialized with seed: {}", seed);

        let zone = Rect::new(640.0, 400.0, 360.0, 160.0);
        let mut now = 0.0;

        // Open the envelope and wait for the letter
        let cues = handle_event(&mut state, CardEvent::EnvelopeActivated, now);
        report(now, &cues);
        now += 1000.0;
        run_timers(&mut state, now);

        // Chase the decline button around its zone
        let mut control = Rect::new(zone.min.x + 150.0, zone.min.y + 60.0, 60.0, 36.0);
        let mut escapes = 0;
        for _ in 0..30 {
            handle_event(&mut state, CardEvent::DeclineMeasured { zone, control }, now);
            let target = control.center();
            let cues = handle_event(&mut state, CardEvent::PointerMoved(target), now);
            for cue in &cues {
                if let CardCue::MoveDecline(offset) = cue {
                    escapes += 1;
                    control = Rect::from_min_size(zone.min + *offset, control.size);
                }
            }
            now += 100.0;
        }
        log::info!("Decline button escaped {escapes} times");

        // Give up chasing and click it anyway a few times
        for _ in 0..5 {
            let cues = handle_event(&mut state, CardEvent::DeclineClicked, now);
            report(now, &cues);
            now += 300.0;
        }

        // Say yes
        let cues = handle_event(&mut state, CardEvent::AcceptClicked, now);
        report(now, &cues);
        now += state.config.question_fade_ms + state.config.letter_fade_ms;
        run_timers(&mut state, now);

        // Let the confetti run out
        let mut surface = CountingSurface::default();
        loop {
            let mut next = NextFrame::default();
            let outcome = run_frame(&mut state.confetti, now, VIEWPORT, &mut surface, &mut next);
            if outcome == FrameOutcome::Finished || !next.0 {
                break;
            }
            now += FRAME_MS;
        }
        log::info!(
            "Confetti finished at {:.0}ms after {} frames ({} pieces drawn)",
            now,
            surface.frames,
            surface.pieces
        );
    }
}
