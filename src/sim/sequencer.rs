//! Stage sequencing for the envelope and the question
//!
//! Each timeline is an enum state plus a transition table keyed by
//! `(state, dwell)`. The first step is event-driven and latched; every later
//! step fires once the current state has been held for its dwell time. Time is
//! passed in, so tests advance a virtual clock instead of waiting.

use crate::settings::CardConfig;

/// Visual side effects requested by a stage change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageCue {
    /// Open the envelope flap
    OpenEnvelope,
    FadeEnvelopeStage,
    HideEnvelopeStage,
    RevealLetter,
    FadeQuestion,
    RemoveQuestion,
    FadeLetter,
    RemoveLetter,
    RevealCelebration,
    StartConfetti,
    SpawnHearts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Sealed,
    Opening,
    Fading,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionStage {
    Asking,
    Accepting,
    Dismissing,
    Celebrating,
}

/// One timed edge of a timeline
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub from: S,
    /// Time `from` must be held before moving on
    pub dwell_ms: f64,
    pub to: S,
    pub cues: &'static [StageCue],
}

/// A linear, one-way timeline
#[derive(Debug, Clone)]
pub struct Timeline<S> {
    stage: S,
    entered_at_ms: f64,
    idle: S,
    first: S,
    first_cues: &'static [StageCue],
    table: Vec<Transition<S>>,
}

impl<S: Copy + PartialEq + std::fmt::Debug> Timeline<S> {
    /// `idle -> first` happens on `activate`, the rest follows `table`
    pub fn new(idle: S, first: S, first_cues: &'static [StageCue], table: Vec<Transition<S>>) -> Self {
        Self {
            stage: idle,
            entered_at_ms: 0.0,
            idle,
            first,
            first_cues,
            table,
        }
    }

    pub fn stage(&self) -> S {
        self.stage
    }

    /// Leave the idle stage; later calls are no-ops
    pub fn activate(&mut self, now_ms: f64, cues: &mut Vec<StageCue>) -> bool {
        if self.stage != self.idle {
            return false;
        }
        self.enter(self.first, now_ms);
        cues.extend_from_slice(self.first_cues);
        true
    }

    /// Fire every transition whose dwell has elapsed by `now_ms`
    ///
    /// Cascaded steps enter at their exact threshold time, not at `now_ms`.
    pub fn advance(&mut self, now_ms: f64, cues: &mut Vec<StageCue>) -> usize {
        let mut fired = 0;
        while let Some(t) = self.pending() {
            let due = self.entered_at_ms + t.dwell_ms;
            if now_ms < due {
                break;
            }
            let (to, step_cues) = (t.to, t.cues);
            self.enter(to, due);
            cues.extend_from_slice(step_cues);
            fired += 1;
        }
        fired
    }

    /// When the next timed transition is due, if any
    pub fn next_deadline(&self) -> Option<f64> {
        self.pending().map(|t| self.entered_at_ms + t.dwell_ms)
    }

    fn pending(&self) -> Option<&Transition<S>> {
        if self.stage == self.idle {
            return None;
        }
        self.table.iter().find(|t| t.from == self.stage)
    }

    fn enter(&mut self, stage: S, at_ms: f64) {
        log::debug!("Stage {:?} -> {:?} at {:.0}ms", self.stage, stage, at_ms);
        self.stage = stage;
        self.entered_at_ms = at_ms;
    }
}

/// Envelope and question timelines side by side
#[derive(Debug, Clone)]
pub struct StageSequencer {
    pub envelope: Timeline<EnvelopeStage>,
    pub question: Timeline<QuestionStage>,
}

impl StageSequencer {
    pub fn new(config: &CardConfig) -> Self {
        use EnvelopeStage as E;
        use QuestionStage as Q;
        use StageCue::*;

        let envelope = Timeline::new(
            E::Sealed,
            E::Opening,
            &[OpenEnvelope],
            vec![
                Transition {
                    from: E::Opening,
                    dwell_ms: config.envelope_fade_delay_ms,
                    to: E::Fading,
                    cues: &[FadeEnvelopeStage],
                },
                Transition {
                    from: E::Fading,
                    dwell_ms: config.letter_reveal_delay_ms,
                    to: E::Revealed,
                    cues: &[HideEnvelopeStage, RevealLetter],
                },
            ],
        );

        let question = Timeline::new(
            Q::Asking,
            Q::Accepting,
            &[FadeQuestion],
            vec![
                Transition {
                    from: Q::Accepting,
                    dwell_ms: config.question_fade_ms,
                    to: Q::Dismissing,
                    cues: &[RemoveQuestion, FadeLetter],
                },
                Transition {
                    from: Q::Dismissing,
                    dwell_ms: config.letter_fade_ms,
                    to: Q::Celebrating,
                    cues: &[RemoveLetter, RevealCelebration, StartConfetti, SpawnHearts],
                },
            ],
        );

        Self { envelope, question }
    }

    /// Envelope click or Enter/Space
    pub fn open_envelope(&mut self, now_ms: f64, cues: &mut Vec<StageCue>) -> bool {
        self.envelope.activate(now_ms, cues)
    }

    /// Accept button click
    pub fn accept(&mut self, now_ms: f64, cues: &mut Vec<StageCue>) -> bool {
        self.question.activate(now_ms, cues)
    }

    pub fn advance(&mut self, now_ms: f64, cues: &mut Vec<StageCue>) {
        self.envelope.advance(now_ms, cues);
        self.question.advance(now_ms, cues);
    }

    /// Earliest pending deadline across both timelines
    pub fn next_deadline(&self) -> Option<f64> {
        match (self.envelope.next_deadline(), self.question.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
