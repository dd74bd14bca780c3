//! Collision detection and resolution
//!
//! Radius-distance overlap tests plus the per-frame resolution pass:
//! ship-asteroid hits (lives, respawn, game over) and projectile-asteroid
//! hits (score, split rule). Resolution is mark-and-compact: hits are
//! recorded against a snapshot of indices first, then removals and splits
//! are applied in one pass, so collections are never spliced mid-iteration.

use super::spawn;
use super::state::{Asteroid, GameEvent, GamePhase, GameState, Projectile, Ship};
use crate::consts::*;

/// Ship-asteroid overlap. The asteroid's polygon sits inside its bounding
/// size, so the test scales the size by [`ASTEROID_HIT_FACTOR`].
#[inline]
pub fn ship_hits_asteroid(ship: &Ship, asteroid: &Asteroid) -> bool {
    ship.pos.distance(asteroid.pos) < ship.radius + asteroid.size * ASTEROID_HIT_FACTOR
}

/// Projectile-asteroid overlap
#[inline]
pub fn projectile_hits_asteroid(projectile: &Projectile, asteroid: &Asteroid) -> bool {
    projectile.pos.distance(asteroid.pos) < asteroid.size
}

/// Detect and resolve all overlaps for the current frame. Called once per
/// frame after physics; a game-over transition halts resolution immediately,
/// and a world that is not running resolves nothing at all.
pub fn resolve(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }
    resolve_ship(state);
    if state.phase != GamePhase::Running {
        return;
    }
    resolve_projectiles(state);
}

/// Ship vs. asteroids. At most one hit resolves per frame: the post-hit
/// invulnerability window exempts the ship from the remaining asteroids.
fn resolve_ship(state: &mut GameState) {
    if state.ship.is_invulnerable() {
        return;
    }
    let Some(hit_pos) = state
        .asteroids
        .iter()
        .find(|a| ship_hits_asteroid(&state.ship, a))
        .map(|a| a.pos)
    else {
        return;
    };

    let ship_pos = state.ship.pos;
    state.spawn_burst(ship_pos, SHIP_BURST_COUNT, SHIP_BURST_SIZE);
    state.lives = state.lives.saturating_sub(1);
    log::debug!(
        "ship hit by asteroid at ({:.0}, {:.0}), {} lives left",
        hit_pos.x,
        hit_pos.y,
        state.lives
    );

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
    } else {
        let center = state.bounds / 2.0;
        state.ship.reset(center);
        state.events.push(GameEvent::ShipHit { lives_left: state.lives });
    }
}

/// Projectiles vs. asteroids. Each asteroid is consumed by at most one
/// projectile per frame: the closest overlapping one, ties breaking toward
/// the lower projectile id (earlier fire).
fn resolve_projectiles(state: &mut GameState) {
    let mut consumed = vec![false; state.projectiles.len()];
    let mut hit_asteroids: Vec<usize> = Vec::new();

    for (asteroid_idx, asteroid) in state.asteroids.iter().enumerate() {
        let mut best: Option<(usize, f32)> = None;
        for (projectile_idx, projectile) in state.projectiles.iter().enumerate() {
            if consumed[projectile_idx] || !projectile_hits_asteroid(projectile, asteroid) {
                continue;
            }
            let dist = projectile.pos.distance(asteroid.pos);
            if best.is_none_or(|(_, d)| dist < d) {
                best = Some((projectile_idx, dist));
            }
        }
        if let Some((projectile_idx, _)) = best {
            consumed[projectile_idx] = true;
            hit_asteroids.push(asteroid_idx);
        }
    }

    if hit_asteroids.is_empty() {
        return;
    }

    let mut destroyed = vec![false; state.asteroids.len()];
    let mut children: Vec<Asteroid> = Vec::new();

    for &asteroid_idx in &hit_asteroids {
        destroyed[asteroid_idx] = true;
        let parent = state.asteroids[asteroid_idx].clone();
        state.spawn_burst(parent.pos, ASTEROID_BURST_COUNT, ASTEROID_BURST_SIZE);
        state.score += ASTEROID_SCORE;

        let split = parent.size > ASTEROID_SPLIT_THRESHOLD;
        if split {
            let ids = [state.next_entity_id(), state.next_entity_id()];
            children.extend(spawn::split_asteroid(&parent, &mut state.rng, ids));
        }
        state.events.push(GameEvent::AsteroidDestroyed { split });
    }

    // Compact both collections in one pass, then attach the children
    let mut idx = 0;
    state.asteroids.retain(|_| {
        let keep = !destroyed[idx];
        idx += 1;
        keep
    });
    let mut idx = 0;
    state.projectiles.retain(|_| {
        let keep = !consumed[idx];
        idx += 1;
        keep
    });
    state.asteroids.extend(children);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heading_vec;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn running_world() -> GameState {
        let mut state = GameState::new(99, Vec2::new(800.0, 600.0));
        state.phase = GamePhase::Running;
        state
    }

    fn asteroid_at(pos: Vec2, size: f32, id: u32) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(id as u64);
        Asteroid {
            id,
            pos,
            size,
            heading: 0.0,
            speed: 0.0,
            rotation: 0.0,
            rotation_speed: 0.0,
            outline: spawn::asteroid_outline(&mut rng, size),
        }
    }

    fn projectile_at(pos: Vec2, id: u32) -> Projectile {
        Projectile {
            id,
            pos,
            heading: 0.0,
            speed: PROJECTILE_SPEED,
            life_ticks: PROJECTILE_LIFE_TICKS,
        }
    }

    #[test]
    fn ship_hit_uses_scaled_asteroid_size() {
        let ship = Ship::new(Vec2::ZERO);
        let size = 30.0;
        // Threshold is radius + size * 0.8 = 15 + 24 = 39
        let just_inside = asteroid_at(Vec2::new(38.9, 0.0), size, 1);
        let just_outside = asteroid_at(Vec2::new(39.1, 0.0), size, 2);
        assert!(ship_hits_asteroid(&ship, &just_inside));
        assert!(!ship_hits_asteroid(&ship, &just_outside));
    }

    #[test]
    fn ship_collision_costs_a_life_and_never_scores() {
        let mut state = running_world();
        state.asteroids.push(asteroid_at(state.ship.pos, 30.0, 1));
        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES - 1);
        assert_eq!(state.score, 0);
        assert!(state.ship.is_invulnerable());
        assert_eq!(state.ship.pos, state.bounds / 2.0);
        // The asteroid survives a ship collision
        assert_eq!(state.asteroids.len(), 1);
    }

    #[test]
    fn invulnerable_ship_takes_no_damage() {
        let mut state = running_world();
        state.ship.invulnerable_ticks = 10;
        state.asteroids.push(asteroid_at(state.ship.pos, 30.0, 1));
        resolve(&mut state);
        assert_eq!(state.lives, STARTING_LIVES);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn last_life_transitions_to_game_over_once() {
        let mut state = running_world();
        state.lives = 1;
        state.asteroids.push(asteroid_at(state.ship.pos, 30.0, 1));
        resolve(&mut state);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver { score: 0 }));

        // A second resolution pass must not underflow lives, re-emit, or
        // spawn another burst; the frozen world is left untouched
        state.events.clear();
        let particles = state.particles.len();
        resolve(&mut state);
        assert_eq!(state.lives, 0);
        assert!(state.events.is_empty());
        assert_eq!(state.particles.len(), particles);
    }

    #[test]
    fn large_asteroid_splits_into_two_halves() {
        let mut state = running_world();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(asteroid_at(pos, 30.0, 1));
        state.projectiles.push(projectile_at(pos, 2));
        resolve(&mut state);

        assert_eq!(state.score, ASTEROID_SCORE);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.asteroids.len(), 2);
        for child in &state.asteroids {
            assert_eq!(child.size, 15.0);
            assert_eq!(child.pos, pos);
        }
        assert!(state.events.contains(&GameEvent::AsteroidDestroyed { split: true }));
    }

    #[test]
    fn small_asteroid_is_removed_outright() {
        let mut state = running_world();
        let pos = Vec2::new(100.0, 100.0);
        state.asteroids.push(asteroid_at(pos, 20.0, 1));
        state.projectiles.push(projectile_at(pos, 2));
        resolve(&mut state);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, ASTEROID_SCORE);
        assert!(state.events.contains(&GameEvent::AsteroidDestroyed { split: false }));
    }

    #[test]
    fn two_kills_in_the_same_frame_both_resolve() {
        // Regression for the in-place splicing hazard: two projectiles,
        // two asteroids, both pairs overlapping in one frame.
        let mut state = running_world();
        let a = Vec2::new(100.0, 100.0);
        let b = Vec2::new(500.0, 400.0);
        state.asteroids.push(asteroid_at(a, 18.0, 1));
        state.asteroids.push(asteroid_at(b, 18.0, 2));
        state.projectiles.push(projectile_at(a, 3));
        state.projectiles.push(projectile_at(b, 4));
        resolve(&mut state);

        assert!(state.asteroids.is_empty());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.score, 2 * ASTEROID_SCORE);
    }

    #[test]
    fn closest_projectile_consumes_the_asteroid() {
        let mut state = running_world();
        let pos = Vec2::new(200.0, 200.0);
        state.asteroids.push(asteroid_at(pos, 18.0, 1));
        // Both overlap; id 3 is farther, id 4 is closer
        state.projectiles.push(projectile_at(pos + heading_vec(0.0) * 10.0, 3));
        state.projectiles.push(projectile_at(pos + heading_vec(0.0) * 2.0, 4));
        resolve(&mut state);

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, 3);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn one_projectile_consumes_at_most_one_asteroid() {
        let mut state = running_world();
        let pos = Vec2::new(200.0, 200.0);
        // Two overlapping asteroids share the playfield spot
        state.asteroids.push(asteroid_at(pos, 18.0, 1));
        state.asteroids.push(asteroid_at(pos + Vec2::new(4.0, 0.0), 18.0, 2));
        state.projectiles.push(projectile_at(pos, 3));
        resolve(&mut state);

        // The projectile is consumed by the first asteroid; the second survives
        assert_eq!(state.asteroids.len(), 1);
        assert_eq!(state.score, ASTEROID_SCORE);
    }
}
