//! Event handling and timed advancement
//!
//! Input arrives as `CardEvent`s and is handled synchronously; delayed stage
//! changes are released by `tick`. Both return the `CardCue`s the
//! presentation layer has to apply, in order.

use glam::Vec2;

use super::geometry::Rect;
use super::hearts::{FloatingHeart, spawn_hearts};
use super::sequencer::StageCue;
use super::state::CardState;
use super::trigger::TriggerKind;

/// Input for the card
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CardEvent {
    /// Pointer or first touch moved anywhere on the page
    PointerMoved(Vec2),
    /// Pointer entered the decline button (event coordinates)
    DeclineEntered(Vec2),
    /// Decline button pressed
    DeclinePressed,
    /// Decline button activated (a rejection)
    DeclineClicked,
    /// Envelope clicked or Enter/Space pressed on it
    EnvelopeActivated,
    /// Accept button clicked
    AcceptClicked,
    /// Viewport resized (CSS px)
    Resized(Vec2),
    /// Fresh layout of the decline zone and button (viewport space)
    DeclineMeasured { zone: Rect, control: Rect },
}

/// Output for the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum CardCue {
    Stage(StageCue),
    /// Place the decline button at this offset inside its zone
    MoveDecline(Vec2),
    /// Scale the accept button
    ScaleAccept(f32),
    /// Add these floating hearts
    Hearts(Vec<FloatingHeart>),
}

/// Handle one input event
pub fn handle_event(state: &mut CardState, event: CardEvent, now_ms: f64) -> Vec<CardCue> {
    let mut cues = Vec::new();
    match event {
        CardEvent::PointerMoved(pos) => {
            state.pointer = pos;
            if state.decline_visible() {
                let rect = state.decline.screen_rect();
                if state.trigger.on_pointer_move(pos, &rect, now_ms) {
                    let offset = state.escape_from(pos, TriggerKind::Proximity);
                    cues.push(CardCue::MoveDecline(offset));
                }
            }
        }
        CardEvent::DeclineEntered(pos) => {
            if state.decline_visible() {
                let offset = state.escape_from(pos, TriggerKind::Contact);
                state.trigger.on_contact(now_ms);
                cues.push(CardCue::MoveDecline(offset));
            }
        }
        CardEvent::DeclinePressed => {
            // Deliberately the last move sample, not the press coordinates
            if state.decline_visible() {
                let offset = state.escape_from(state.pointer, TriggerKind::Press);
                state.trigger.on_contact(now_ms);
                cues.push(CardCue::MoveDecline(offset));
            }
        }
        CardEvent::DeclineClicked => {
            state.rejections += 1;
            log::debug!("Rejection #{}", state.rejections);
            cues.push(CardCue::ScaleAccept(state.accept_scale()));
        }
        CardEvent::EnvelopeActivated => {
            let mut stage = Vec::new();
            if state.sequencer.open_envelope(now_ms, &mut stage) {
                log::info!("Envelope opened");
            }
            apply_stage_cues(state, &stage, now_ms, &mut cues);
        }
        CardEvent::AcceptClicked => {
            let mut stage = Vec::new();
            if state.sequencer.accept(now_ms, &mut stage) {
                log::info!("Question accepted after {} rejections", state.rejections);
            }
            apply_stage_cues(state, &stage, now_ms, &mut cues);
        }
        CardEvent::Resized(viewport) => {
            state.viewport = viewport;
        }
        CardEvent::DeclineMeasured { zone, control } => {
            state.decline.measure(zone, control);
        }
    }
    cues
}

/// Release every stage change due by `now_ms`
pub fn tick(state: &mut CardState, now_ms: f64) -> Vec<CardCue> {
    let mut stage = Vec::new();
    state.sequencer.advance(now_ms, &mut stage);
    let mut cues = Vec::with_capacity(stage.len());
    apply_stage_cues(state, &stage, now_ms, &mut cues);
    cues
}

/// When `tick` next has work to do
pub fn next_wake(state: &CardState) -> Option<f64> {
    state.sequencer.next_deadline()
}

/// Turn sequencer cues into presentation cues, starting the effects they name
fn apply_stage_cues(state: &mut CardState, stage: &[StageCue], now_ms: f64, out: &mut Vec<CardCue>) {
    for &cue in stage {
        match cue {
            StageCue::StartConfetti => {
                let (duration, count, viewport) = (
                    state.config.celebration_confetti_ms,
                    state.config.confetti_count,
                    state.viewport,
                );
                state.confetti.start(now_ms, duration, count, viewport);
                out.push(CardCue::Stage(cue));
            }
            StageCue::SpawnHearts => {
                let count = state.config.heart_count;
                out.push(CardCue::Hearts(spawn_hearts(state.rng(), count)));
            }
            _ => out.push(CardCue::Stage(cue)),
        }
    }
}
