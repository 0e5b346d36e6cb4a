//! Confetti particle animation
//!
//! One session at a time: `start` replaces any running batch, `tick` moves,
//! wraps and draws every piece once per display frame, and the session ends on
//! the first frame past its stop time. Pieces never die individually, they
//! wrap around the viewport edges until the whole batch is dropped.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{
    CONFETTI_ALPHA, CONFETTI_COUNT, CONFETTI_DEFAULT_MS, CONFETTI_PALETTE, CONFETTI_RESPAWN_Y,
    CONFETTI_WRAP_MARGIN,
};
use crate::renderer::{FrameOutcome, ParticleSurface};

/// A single confetti piece
///
/// Velocities are in px per frame, angular velocity in radians per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
    pub rotation: f32,
    pub angular_vel: f32,
    pub color: &'static str,
    pub alpha: f32,
}

impl Particle {
    /// A fresh piece somewhere above the viewport
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Vec2) -> Self {
        let color = CONFETTI_PALETTE[rng.random_range(0..CONFETTI_PALETTE.len())];
        Self {
            pos: Vec2::new(
                rng.random::<f32>() * viewport.x,
                CONFETTI_RESPAWN_Y - rng.random::<f32>() * viewport.y,
            ),
            size: Vec2::new(6.0 + rng.random::<f32>() * 6.0, 10.0 + rng.random::<f32>() * 10.0),
            vel: Vec2::new(-2.0 + rng.random::<f32>() * 4.0, 2.0 + rng.random::<f32>() * 5.0),
            rotation: rng.random::<f32>() * std::f32::consts::PI,
            angular_vel: -0.2 + rng.random::<f32>() * 0.4,
            color,
            alpha: CONFETTI_ALPHA,
        }
    }

    /// Integrate one frame and wrap around the viewport edges
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, viewport: Vec2) {
        self.pos += self.vel;
        self.rotation += self.angular_vel;

        if self.pos.y > viewport.y + CONFETTI_WRAP_MARGIN {
            self.pos.y = CONFETTI_RESPAWN_Y;
            self.pos.x = rng.random::<f32>() * viewport.x;
        }
        if self.pos.x < -CONFETTI_WRAP_MARGIN {
            self.pos.x = viewport.x + CONFETTI_WRAP_MARGIN;
        }
        if self.pos.x > viewport.x + CONFETTI_WRAP_MARGIN {
            self.pos.x = -CONFETTI_WRAP_MARGIN;
        }
    }
}

/// The confetti session
#[derive(Debug, Clone)]
pub struct ConfettiAnimator {
    particles: Vec<Particle>,
    running: bool,
    stop_at_ms: f64,
    /// Surface must be made visible on the next frame
    reveal_pending: bool,
    rng: Pcg32,
}

impl ConfettiAnimator {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            running: false,
            stop_at_ms: 0.0,
            reveal_pending: false,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Begin a session, discarding whatever batch was there before
    pub fn start(&mut self, now_ms: f64, duration_ms: f64, count: usize, viewport: Vec2) {
        let rng = &mut self.rng;
        self.particles = (0..count).map(|_| Particle::spawn(rng, viewport)).collect();
        self.running = true;
        self.stop_at_ms = now_ms + duration_ms;
        self.reveal_pending = true;
        log::info!(
            "Confetti started: {} pieces for {:.0}ms",
            self.particles.len(),
            duration_ms
        );
    }

    /// Begin a default session (`CONFETTI_COUNT` pieces for `CONFETTI_DEFAULT_MS`)
    pub fn start_default(&mut self, now_ms: f64, viewport: Vec2) {
        self.start(now_ms, CONFETTI_DEFAULT_MS, CONFETTI_COUNT, viewport);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop_at_ms(&self) -> f64 {
        self.stop_at_ms
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Move every piece one frame
    pub fn step(&mut self, viewport: Vec2) {
        let rng = &mut self.rng;
        for p in &mut self.particles {
            p.advance(rng, viewport);
        }
    }

    /// Clear the surface and redraw the whole batch
    pub fn render<S: ParticleSurface + ?Sized>(&self, surface: &mut S, viewport: Vec2) {
        surface.clear(viewport);
        for p in &self.particles {
            surface.draw_particle(p);
        }
    }

    /// One display frame: step, draw, then end the session if its time is up
    pub fn tick<S: ParticleSurface + ?Sized>(
        &mut self,
        now_ms: f64,
        viewport: Vec2,
        surface: &mut S,
    ) -> FrameOutcome {
        if !self.running {
            return FrameOutcome::Finished;
        }
        if self.reveal_pending {
            surface.set_visible(true);
            self.reveal_pending = false;
        }

        self.step(viewport);
        self.render(surface, viewport);

        if now_ms > self.stop_at_ms {
            self.running = false;
            self.particles = Vec::new();
            surface.set_visible(false);
            log::info!("Confetti finished");
            return FrameOutcome::Finished;
        }
        FrameOutcome::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::testing::RecordingSurface;
    use proptest::prelude::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..500 {
            let p = Particle::spawn(&mut rng, VIEWPORT);
            assert!(p.pos.x >= 0.0 && p.pos.x < VIEWPORT.x);
            assert!(p.pos.y <= CONFETTI_RESPAWN_Y && p.pos.y > CONFETTI_RESPAWN_Y - VIEWPORT.y);
            assert!(p.size.x >= 6.0 && p.size.x < 12.0);
            assert!(p.size.y >= 10.0 && p.size.y < 20.0);
            assert!(p.vel.x >= -2.0 && p.vel.x < 2.0);
            assert!(p.vel.y >= 2.0 && p.vel.y < 7.0);
            assert!(p.angular_vel >= -0.2 && p.angular_vel < 0.2);
            assert!(CONFETTI_PALETTE.contains(&p.color));
            assert_eq!(p.alpha, CONFETTI_ALPHA);
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut animator = ConfettiAnimator::new(5);
        let mut surface = RecordingSurface::default();
        animator.start(0.0, 3000.0, CONFETTI_COUNT, VIEWPORT);
        assert!(animator.is_running());
        assert_eq!(animator.particles().len(), CONFETTI_COUNT);

        let mut now = 0.0;
        while now <= 3000.0 {
            assert_eq!(animator.tick(now, VIEWPORT, &mut surface), FrameOutcome::Continue);
            assert_eq!(surface.draws_last_frame, CONFETTI_COUNT);
            assert_eq!(surface.visible, Some(true));
            now += 16.0;
        }
        assert!(animator.is_running());

        // First frame past the stop time ends the session
        assert_eq!(animator.tick(now, VIEWPORT, &mut surface), FrameOutcome::Finished);
        assert!(!animator.is_running());
        assert!(animator.particles().is_empty());
        assert_eq!(surface.visible, Some(false));

        // Late frames draw nothing
        let clears = surface.clears;
        assert_eq!(animator.tick(now + 16.0, VIEWPORT, &mut surface), FrameOutcome::Finished);
        assert_eq!(surface.clears, clears);
    }

    #[test]
    fn test_exactly_at_stop_time_still_runs() {
        let mut animator = ConfettiAnimator::new(5);
        let mut surface = RecordingSurface::default();
        animator.start(1000.0, 3000.0, 10, VIEWPORT);
        assert_eq!(animator.tick(4000.0, VIEWPORT, &mut surface), FrameOutcome::Continue);
        assert_eq!(animator.tick(4000.5, VIEWPORT, &mut surface), FrameOutcome::Finished);
    }

    #[test]
    fn test_default_session() {
        let mut animator = ConfettiAnimator::new(5);
        animator.start_default(100.0, VIEWPORT);
        assert_eq!(animator.particles().len(), CONFETTI_COUNT);
        assert_eq!(animator.stop_at_ms(), 2900.0);
    }

    #[test]
    fn test_restart_replaces_batch() {
        let mut animator = ConfettiAnimator::new(5);
        let mut surface = RecordingSurface::default();
        animator.start(0.0, 3000.0, CONFETTI_COUNT, VIEWPORT);
        animator.tick(16.0, VIEWPORT, &mut surface);
        animator.start(20.0, 3000.0, CONFETTI_COUNT, VIEWPORT);
        animator.start(40.0, 500.0, CONFETTI_COUNT, VIEWPORT);
        assert_eq!(animator.particles().len(), CONFETTI_COUNT);
        assert_eq!(animator.stop_at_ms(), 540.0);
    }

    #[test]
    fn test_falling_piece_respawns_above() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = Particle::spawn(&mut rng, VIEWPORT);
        p.pos = Vec2::new(100.0, VIEWPORT.y + 29.0);
        p.vel = Vec2::new(0.0, 5.0);
        p.advance(&mut rng, VIEWPORT);
        assert_eq!(p.pos.y, CONFETTI_RESPAWN_Y);
        assert!(p.pos.x >= 0.0 && p.pos.x < VIEWPORT.x);
    }

    #[test]
    fn test_horizontal_wrap_teleports() {
        let mut rng = Pcg32::seed_from_u64(2);
        let mut p = Particle::spawn(&mut rng, VIEWPORT);
        p.pos = Vec2::new(-29.0, 100.0);
        p.vel = Vec2::new(-2.0, 2.0);
        p.advance(&mut rng, VIEWPORT);
        assert_eq!(p.pos.x, VIEWPORT.x + CONFETTI_WRAP_MARGIN);

        p.vel = Vec2::new(2.0, 2.0);
        p.advance(&mut rng, VIEWPORT);
        assert_eq!(p.pos.x, -CONFETTI_WRAP_MARGIN);
    }

    proptest! {
        #[test]
        fn particles_stay_within_wrap_bounds(
            width in 50.0f32..2500.0,
            height in 50.0f32..1600.0,
            seed in any::<u64>(),
            frames in 1usize..400,
        ) {
            let viewport = Vec2::new(width, height);
            let mut animator = ConfettiAnimator::new(seed);
            animator.start(0.0, 1.0e9, 60, viewport);
            for _ in 0..frames {
                animator.step(viewport);
                for p in animator.particles() {
                    prop_assert!(p.pos.y <= height + CONFETTI_WRAP_MARGIN);
                    prop_assert!(p.pos.x >= -CONFETTI_WRAP_MARGIN);
                    prop_assert!(p.pos.x <= width + CONFETTI_WRAP_MARGIN);
                }
            }
        }
    }
}
