//! Floating heart burst shown with the celebration

use rand::Rng;

pub const HEART_GLYPH: &str = "💖";

/// Layout of one floating heart element
#[derive(Debug, Clone, PartialEq)]
pub struct FloatingHeart {
    /// Horizontal position in viewport-width units (0-100)
    pub left_vw: f32,
    /// CSS animation delay in seconds
    pub delay_s: f32,
    pub font_px: f32,
}

impl FloatingHeart {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            left_vw: rng.random::<f32>() * 100.0,
            delay_s: rng.random::<f32>() * 0.6,
            font_px: 18.0 + rng.random::<f32>() * 26.0,
        }
    }
}

/// A burst of `count` hearts
pub fn spawn_hearts<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<FloatingHeart> {
    (0..count).map(|_| FloatingHeart::random(rng)).collect()
}
