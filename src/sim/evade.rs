//! Evasion targeting for the decline button
//!
//! Best-of-N search: sample random legal positions inside the zone and keep the
//! one whose center is farthest from the pointer. An exact farthest point is not
//! needed, the button only has to look like it dodged.

use glam::Vec2;
use rand::Rng;

use super::geometry::Rect;

/// A sampled button position and its distance to the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Top-left offset inside the zone
    pub offset: Vec2,
    /// Distance from the button center (viewport space) to the pointer
    pub distance: f32,
}

/// Width/height of the range the button's top-left may occupy past `padding`
///
/// Clamps to zero on any axis where the zone cannot fit the button plus padding
/// on both sides.
#[inline]
pub fn legal_span(zone_size: Vec2, control_size: Vec2, padding: f32) -> Vec2 {
    (zone_size - control_size - Vec2::splat(2.0 * padding)).max(Vec2::ZERO)
}

/// Draw `tries` uniform candidates inside the legal range of `zone`
pub fn sample_candidates<R: Rng + ?Sized>(
    rng: &mut R,
    pointer: Vec2,
    zone: &Rect,
    control_size: Vec2,
    padding: f32,
    tries: u32,
) -> Vec<Candidate> {
    let span = legal_span(zone.size, control_size, padding);
    let half = control_size * 0.5;

    (0..tries)
        .map(|_| {
            let offset = Vec2::new(
                padding + rng.random::<f32>() * span.x,
                padding + rng.random::<f32>() * span.y,
            );
            let center = zone.min + offset + half;
            Candidate {
                offset,
                distance: center.distance(pointer),
            }
        })
        .collect()
}

/// The candidate with the greatest distance (first one wins ties)
pub fn farthest(candidates: &[Candidate]) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for c in candidates {
        match best {
            Some(b) if c.distance <= b.distance => {}
            _ => best = Some(*c),
        }
    }
    best
}

/// Pick a new top-left offset for the button, as far from `pointer` as the samples allow
///
/// With no samples the button goes to the padding origin.
pub fn relocate<R: Rng + ?Sized>(
    rng: &mut R,
    pointer: Vec2,
    zone: &Rect,
    control_size: Vec2,
    padding: f32,
    tries: u32,
) -> Vec2 {
    let candidates = sample_candidates(rng, pointer, zone, control_size, padding, tries);
    farthest(&candidates)
        .map(|c| c.offset)
        .unwrap_or(Vec2::splat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_relocate_matches_farthest_sample() {
        let zone = Rect::new(100.0, 200.0, 400.0, 300.0);
        let size = Vec2::new(80.0, 40.0);
        let pointer = Vec2::new(120.0, 220.0);

        let mut rng_a = Pcg32::seed_from_u64(7);
        let mut rng_b = Pcg32::seed_from_u64(7);
        let samples = sample_candidates(&mut rng_a, pointer, &zone, size, 10.0, 40);
        let chosen = relocate(&mut rng_b, pointer, &zone, size, 10.0, 40);

        let best = farthest(&samples).unwrap();
        assert_eq!(chosen, best.offset);
        assert!(samples.iter().all(|c| c.distance <= best.distance));
    }

    #[test]
    fn test_farthest_keeps_first_tie() {
        let a = Candidate { offset: Vec2::new(1.0, 1.0), distance: 5.0 };
        let b = Candidate { offset: Vec2::new(2.0, 2.0), distance: 5.0 };
        let c = Candidate { offset: Vec2::new(3.0, 3.0), distance: 1.0 };
        assert_eq!(farthest(&[c, a, b]).unwrap().offset, a.offset);
        assert!(farthest(&[]).is_none());
    }

    #[test]
    fn test_zone_too_small_clamps_to_padding() {
        let mut rng = Pcg32::seed_from_u64(1);
        let zone = Rect::new(0.0, 0.0, 50.0, 20.0);
        let offset = relocate(&mut rng, Vec2::ZERO, &zone, Vec2::new(80.0, 40.0), 10.0, 40);
        assert_eq!(offset, Vec2::splat(10.0));
    }

    #[test]
    fn test_zero_tries_goes_to_padding_origin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let zone = Rect::new(0.0, 0.0, 500.0, 500.0);
        let offset = relocate(&mut rng, Vec2::ZERO, &zone, Vec2::new(80.0, 40.0), 10.0, 0);
        assert_eq!(offset, Vec2::splat(10.0));
    }

    #[test]
    fn test_pointer_left_of_zone_pushes_button_right() {
        let zone = Rect::new(1000.0, 0.0, 600.0, 400.0);
        let size = Vec2::new(60.0, 30.0);
        let pointer = Vec2::new(0.0, 200.0);

        for seed in 0..50 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let samples = sample_candidates(&mut rng, pointer, &zone, size, 10.0, 40);
            let chosen = farthest(&samples).unwrap();

            let mut distances: Vec<f32> = samples.iter().map(|c| c.distance).collect();
            distances.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let median = distances[distances.len() / 2];
            assert!(chosen.distance >= median);
            // Far side of a 600px zone: the best of 40 lands in the right half
            assert!(chosen.offset.x > 300.0, "seed {seed}: {:?}", chosen.offset);
        }
    }

    proptest! {
        #[test]
        fn relocate_stays_inside_zone(
            zone_w in 0.0f32..1200.0,
            zone_h in 0.0f32..900.0,
            ctrl_w in 1.0f32..300.0,
            ctrl_h in 1.0f32..120.0,
            padding in 0.0f32..40.0,
            px in -2000.0f32..2000.0,
            py in -2000.0f32..2000.0,
            seed in any::<u64>(),
        ) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let zone = Rect::new(50.0, 50.0, zone_w, zone_h);
            let offset = relocate(&mut rng, Vec2::new(px, py), &zone, Vec2::new(ctrl_w, ctrl_h), padding, 40);

            prop_assert!(offset.x >= padding);
            prop_assert!(offset.y >= padding);
            if zone_w >= ctrl_w + 2.0 * padding {
                prop_assert!(offset.x <= zone_w - ctrl_w - padding + 1e-3);
            } else {
                prop_assert_eq!(offset.x, padding);
            }
            if zone_h >= ctrl_h + 2.0 * padding {
                prop_assert!(offset.y <= zone_h - ctrl_h - padding + 1e-3);
            } else {
                prop_assert_eq!(offset.y, padding);
            }
        }
    }
}
