//! Asteroid field population
//!
//! Initial placement, score-scaled waves, the split rule, and procedural
//! outline generation. All randomness comes from the caller's seeded RNG so
//! placement is reproducible and testable.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::Asteroid;
use crate::consts::*;
use crate::heading_vec;

/// Generate a jagged outline: 7-10 vertices evenly spaced in angle, each
/// perturbed radially by a uniform factor in [0.8, 1.2) of the base size.
pub fn asteroid_outline(rng: &mut Pcg32, size: f32) -> Vec<Vec2> {
    let vertex_count = rng.random_range(7..=10usize);
    let mut outline = Vec::with_capacity(vertex_count);
    for i in 0..vertex_count {
        let angle = i as f32 * std::f32::consts::TAU / vertex_count as f32;
        let distance = size * rng.random_range(0.8..1.2);
        outline.push(heading_vec(angle) * distance);
    }
    outline
}

/// Build an asteroid at a known position with random motion and outline
fn new_asteroid(rng: &mut Pcg32, pos: Vec2, size: f32, id: u32) -> Asteroid {
    Asteroid {
        id,
        pos,
        size,
        heading: rng.random_range(0.0..std::f32::consts::TAU),
        speed: rng.random_range(ASTEROID_SPEED_MIN..ASTEROID_SPEED_MAX),
        rotation: 0.0,
        rotation_speed: rng.random_range(-ASTEROID_ROT_SPEED_MAX..ASTEROID_ROT_SPEED_MAX),
        outline: asteroid_outline(rng, size),
    }
}

/// Spawn a fresh asteroid with a random size, placed by rejection sampling
/// so it lands at least [`SPAWN_CLEARANCE`] away from `avoid` (the ship).
///
/// The sampling loop is capped so degenerate viewports (smaller than the
/// clearance disc) still terminate; the last candidate is used as fallback.
pub fn spawn_asteroid(rng: &mut Pcg32, bounds: Vec2, avoid: Option<Vec2>, id: u32) -> Asteroid {
    let size = rng.random_range(ASTEROID_SIZE_MIN..ASTEROID_SIZE_MAX);
    let mut pos = Vec2::new(
        rng.random_range(0.0..bounds.x.max(1.0)),
        rng.random_range(0.0..bounds.y.max(1.0)),
    );
    if let Some(avoid) = avoid {
        let mut attempts = 0;
        while pos.distance(avoid) < SPAWN_CLEARANCE && attempts < SPAWN_MAX_ATTEMPTS {
            pos = Vec2::new(
                rng.random_range(0.0..bounds.x.max(1.0)),
                rng.random_range(0.0..bounds.y.max(1.0)),
            );
            attempts += 1;
        }
        if attempts == SPAWN_MAX_ATTEMPTS {
            log::warn!("asteroid placement clearance not met after {attempts} attempts");
        }
    }
    new_asteroid(rng, pos, size, id)
}

/// Split rule: exactly two children at half the parent's size, at the
/// parent's last position, with independent random headings/speeds/spins.
/// No clearance check; the children separate on their own.
pub fn split_asteroid(parent: &Asteroid, rng: &mut Pcg32, ids: [u32; 2]) -> [Asteroid; 2] {
    let half = parent.size / 2.0;
    [
        new_asteroid(rng, parent.pos, half, ids[0]),
        new_asteroid(rng, parent.pos, half, ids[1]),
    ]
}

/// Wave size for a depleted field: grows with score, capped at
/// [`WAVE_MAX_COUNT`] concurrent asteroids.
pub fn wave_count(score: u64) -> usize {
    WAVE_MAX_COUNT.min((score / WAVE_SCORE_STEP) as usize + WAVE_BASE_COUNT)
}
