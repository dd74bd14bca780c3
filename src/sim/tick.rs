//! Fixed timestep simulation tick
//!
//! One logical step per animation frame: input sampling, physics for every
//! entity, collision resolution, then the wave-depletion check. All waiting
//! (invulnerability window, wave respawn delay) is a tick counter, never a
//! blocking wait.

use super::collision;
use super::spawn;
use super::state::{GamePhase, GameState};
use crate::consts::*;
use crate::{heading_vec, wrap_coord, wrap_with_margin};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Rotate counter-clockwise while held
    pub turn_left: bool,
    /// Rotate clockwise while held
    pub turn_right: bool,
    /// Accelerate along the heading while held
    pub thrust: bool,
    /// Fire one projectile (one-shot; the host clears it after sampling)
    pub fire: bool,
    /// Start or restart a run (one-shot)
    pub start: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    // Outside Running only the start trigger is honored; the frozen world
    // is drawn as-is by the renderer.
    match state.phase {
        GamePhase::NotStarted | GamePhase::GameOver => {
            if input.start {
                state.start();
            }
            return;
        }
        GamePhase::Running => {}
    }

    state.time_ticks += 1;

    // Held controls map to continuous ship state; fire is a discrete event
    if input.turn_left {
        state.ship.angle -= SHIP_TURN_RATE * dt;
    }
    if input.turn_right {
        state.ship.angle += SHIP_TURN_RATE * dt;
    }
    state.ship.thrusting = input.thrust;
    if input.fire {
        state.fire_projectile();
    }

    // Physics for every entity completes before any collision test runs
    step_ship(state, dt);
    step_asteroids(state, dt);
    step_projectiles(state, dt);
    step_particles(state, dt);

    collision::resolve(state);
    if state.phase != GamePhase::Running {
        return;
    }

    check_wave(state);
}

/// Thrust, friction damping, motion, toroidal wrap, invulnerability countdown
fn step_ship(state: &mut GameState, dt: f32) {
    let ship = &mut state.ship;
    if ship.thrusting {
        ship.vel += heading_vec(ship.angle) * SHIP_THRUST * dt;
    }
    // Exponential decay every tick; no other drag model
    ship.vel *= SHIP_FRICTION;
    ship.pos += ship.vel * dt;
    ship.pos.x = wrap_coord(ship.pos.x, state.bounds.x);
    ship.pos.y = wrap_coord(ship.pos.y, state.bounds.y);

    if ship.invulnerable_ticks > 0 {
        ship.invulnerable_ticks -= 1;
    }
}

/// Constant drift and spin; asteroids wrap once fully off-screen
fn step_asteroids(state: &mut GameState, dt: f32) {
    let bounds = state.bounds;
    for asteroid in &mut state.asteroids {
        asteroid.pos += heading_vec(asteroid.heading) * asteroid.speed * dt;
        asteroid.rotation += asteroid.rotation_speed * dt;
        asteroid.pos.x = wrap_with_margin(asteroid.pos.x, bounds.x, asteroid.size);
        asteroid.pos.y = wrap_with_margin(asteroid.pos.y, bounds.y, asteroid.size);
    }
}

/// Straight-line motion; projectiles die on expiry or on exiting the playfield
fn step_projectiles(state: &mut GameState, dt: f32) {
    let bounds = state.bounds;
    for projectile in &mut state.projectiles {
        projectile.pos += heading_vec(projectile.heading) * projectile.speed * dt;
        projectile.life_ticks -= 1;
    }
    state.projectiles.retain(|p| {
        p.life_ticks > 0
            && p.pos.x >= 0.0
            && p.pos.x <= bounds.x
            && p.pos.y >= 0.0
            && p.pos.y <= bounds.y
    });
}

/// Cosmetic drift and expiry
fn step_particles(state: &mut GameState, dt: f32) {
    for particle in &mut state.particles {
        particle.pos += heading_vec(particle.heading) * particle.speed * dt;
        particle.life_ticks -= 1;
    }
    state.particles.retain(|p| p.life_ticks > 0);
}

/// Once the field is depleted, count down a fixed delay and spawn the next
/// wave, scaled by cumulative score.
fn check_wave(state: &mut GameState) {
    if !state.asteroids.is_empty() {
        state.wave_delay_ticks = None;
        return;
    }
    let remaining = state.wave_delay_ticks.get_or_insert(WAVE_DELAY_TICKS);
    if *remaining > 0 {
        *remaining -= 1;
        return;
    }
    state.wave_delay_ticks = None;
    let count = spawn::wave_count(state.score);
    state.spawn_field(count);
    log::info!("wave spawned: {count} asteroids (score {})", state.score);
}
