//! When the decline button should escape
//!
//! Three paths feed the evasion targeter:
//! - proximity: pointer within the trigger distance, gated by a cooldown
//! - contact: pointer entered the button, never gated
//! - press: button pressed, never gated, uses the last pointer sample
//!
//! All three stamp the cooldown so a proximity check right after a contact
//! escape does not fire again.

use glam::Vec2;

use super::geometry::{Rect, distance_point_to_rect};

/// Last escape time, gates the proximity path only
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cooldown {
    pub last_trigger_ms: f64,
}

impl Default for Cooldown {
    fn default() -> Self {
        Self {
            last_trigger_ms: f64::NEG_INFINITY,
        }
    }
}

impl Cooldown {
    /// Whether at least `cooldown_ms` has passed since the last escape
    #[inline]
    pub fn ready(&self, now_ms: f64, cooldown_ms: f64) -> bool {
        now_ms - self.last_trigger_ms >= cooldown_ms
    }

    #[inline]
    pub fn stamp(&mut self, now_ms: f64) {
        self.last_trigger_ms = now_ms;
    }
}

/// Why an escape fired
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerKind {
    Proximity,
    Contact,
    Press,
}

/// The decline button's placement inside its containment zone
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ControlState {
    /// Top-left offset relative to the zone origin
    pub offset: Vec2,
    /// Zone rectangle in viewport space
    pub zone: Rect,
    /// Button size
    pub size: Vec2,
}

impl ControlState {
    /// Take fresh measurements of the zone and the button's on-screen rectangle
    pub fn measure(&mut self, zone: Rect, control: Rect) {
        self.zone = zone;
        self.size = control.size;
        self.offset = control.min - zone.min;
    }

    /// Button rectangle in viewport space
    pub fn screen_rect(&self) -> Rect {
        Rect::from_min_size(self.zone.min + self.offset, self.size)
    }
}

/// Escape decision rules
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvasionTrigger {
    pub trigger_distance: f32,
    pub cooldown_ms: f64,
    pub cooldown: Cooldown,
}

impl EvasionTrigger {
    pub fn new(trigger_distance: f32, cooldown_ms: f64) -> Self {
        Self {
            trigger_distance,
            cooldown_ms,
            cooldown: Cooldown::default(),
        }
    }

    /// Proximity path: returns true (and stamps the cooldown) if the button should escape
    pub fn on_pointer_move(&mut self, pointer: Vec2, control: &Rect, now_ms: f64) -> bool {
        let near = distance_point_to_rect(pointer, control) <= self.trigger_distance;
        if near && self.cooldown.ready(now_ms, self.cooldown_ms) {
            self.cooldown.stamp(now_ms);
            return true;
        }
        false
    }

    /// Contact and press paths: always escape, then stamp the cooldown
    pub fn on_contact(&mut self, now_ms: f64) -> bool {
        self.cooldown.stamp(now_ms);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COOLDOWN_MS, TRIGGER_DISTANCE};

    fn button() -> Rect {
        Rect::new(480.0, 480.0, 40.0, 40.0)
    }

    #[test]
    fn test_far_pointer_never_triggers() {
        let mut trigger = EvasionTrigger::new(TRIGGER_DISTANCE, COOLDOWN_MS);
        assert!(!trigger.on_pointer_move(Vec2::new(0.0, 0.0), &button(), 0.0));
        assert_eq!(trigger.cooldown, Cooldown::default());
    }

    #[test]
    fn test_first_proximity_fires_immediately() {
        let mut trigger = EvasionTrigger::new(TRIGGER_DISTANCE, COOLDOWN_MS);
        // 150px right of the button edge counts as near
        assert!(trigger.on_pointer_move(Vec2::new(670.0, 500.0), &button(), 0.0));
        assert_eq!(trigger.cooldown.last_trigger_ms, 0.0);
    }

    #[test]
    fn test_cooldown_gates_repeated_proximity() {
        let mut trigger = EvasionTrigger::new(TRIGGER_DISTANCE, COOLDOWN_MS);
        let p = Vec2::new(500.0, 500.0);
        assert!(trigger.on_pointer_move(p, &button(), 1000.0));
        assert!(!trigger.on_pointer_move(p, &button(), 1100.0));
        assert!(!trigger.on_pointer_move(p, &button(), 1259.0));
        assert!(trigger.on_pointer_move(p, &button(), 1260.0));
    }

    #[test]
    fn test_contact_ignores_cooldown_and_restamps() {
        let mut trigger = EvasionTrigger::new(TRIGGER_DISTANCE, COOLDOWN_MS);
        let p = Vec2::new(500.0, 500.0);
        assert!(trigger.on_pointer_move(p, &button(), 1000.0));
        assert!(trigger.on_contact(1010.0));
        assert_eq!(trigger.cooldown.last_trigger_ms, 1010.0);
        // Cooldown now counts from the contact
        assert!(!trigger.on_pointer_move(p, &button(), 1265.0));
        assert!(trigger.on_pointer_move(p, &button(), 1270.0));
    }

    #[test]
    fn test_control_state_measure() {
        let mut control = ControlState::default();
        control.measure(Rect::new(100.0, 50.0, 400.0, 200.0), Rect::new(160.0, 90.0, 80.0, 30.0));
        assert_eq!(control.offset, Vec2::new(60.0, 40.0));
        assert_eq!(control.size, Vec2::new(80.0, 30.0));
        assert_eq!(control.screen_rect(), Rect::new(160.0, 90.0, 80.0, 30.0));
    }
}
