//! Rendering seams for the confetti animation
//!
//! The animator only talks to a `ParticleSurface` (clear/draw/show) and a
//! `FrameScheduler` (ask for one more frame). The browser backend lives in
//! `canvas`; tests use recording doubles.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::sim::confetti::{ConfettiAnimator, Particle};

/// A drawing surface owned by the animator while a session runs
pub trait ParticleSurface {
    /// Wipe the whole viewport
    fn clear(&mut self, viewport: Vec2);
    /// Draw one rotated confetti piece centered on its position
    fn draw_particle(&mut self, particle: &Particle);
    /// Show or hide the surface (opacity 1/0)
    fn set_visible(&mut self, visible: bool);
}

/// Display refresh hook: run the frame callback once more
pub trait FrameScheduler {
    fn schedule_next_frame(&mut self);
}

/// Result of one animation frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Session still running, next frame requested
    Continue,
    /// Session ended (or was never running), nothing scheduled
    Finished,
}

/// Advance, draw, and reschedule the confetti for one display frame
pub fn run_frame<S, F>(
    animator: &mut ConfettiAnimator,
    now_ms: f64,
    viewport: Vec2,
    surface: &mut S,
    scheduler: &mut F,
) -> FrameOutcome
where
    S: ParticleSurface + ?Sized,
    F: FrameScheduler + ?Sized,
{
    let outcome = animator.tick(now_ms, viewport, surface);
    if outcome == FrameOutcome::Continue {
        scheduler.schedule_next_frame();
    }
    outcome
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingSurface, StepScheduler};
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(800.0, 600.0);

    #[test]
    fn test_frames_reschedule_until_done() {
        let mut animator = ConfettiAnimator::new(3);
        let mut surface = RecordingSurface::default();
        let mut scheduler = StepScheduler::default();

        animator.start(0.0, 100.0, 20, VIEWPORT);

        let mut now = 0.0;
        let mut frames = 0;
        // Step frames only while the animator keeps asking for them
        loop {
            let before = scheduler.pending;
            let outcome = run_frame(&mut animator, now, VIEWPORT, &mut surface, &mut scheduler);
            frames += 1;
            if outcome == FrameOutcome::Finished {
                assert_eq!(scheduler.pending, before);
                break;
            }
            assert_eq!(scheduler.pending, before + 1);
            now += 16.0;
        }

        // 0, 16, ..., 96 keep going; 112 is past the stop time
        assert_eq!(frames, 8);
        assert_eq!(surface.visible, Some(false));
    }

    #[test]
    fn test_idle_animator_schedules_nothing() {
        let mut animator = ConfettiAnimator::new(3);
        let mut surface = RecordingSurface::default();
        let mut scheduler = StepScheduler::default();

        let outcome = run_frame(&mut animator, 0.0, VIEWPORT, &mut surface, &mut scheduler);
        assert_eq!(outcome, FrameOutcome::Finished);
        assert_eq!(scheduler.pending, 0);
        assert_eq!(surface.clears, 0);
    }
}
