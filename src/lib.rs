//! Asteroid Field - a retro asteroid-survival arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, spawning, game state)
//! - `render`: Drawing-surface abstraction and per-frame emitter
//! - `input`: Logical controls and key sampling
//! - `settings`: Presentation preferences

pub mod input;
pub mod render;
pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the frame counters below)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Ship collision radius
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Thrust acceleration along the heading (px/s²)
    pub const SHIP_THRUST: f32 = 360.0;
    /// Per-tick velocity damping factor
    pub const SHIP_FRICTION: f32 = 0.99;
    /// Turn rate while a rotate control is held (rad/s)
    pub const SHIP_TURN_RATE: f32 = 6.0;
    /// Post-respawn invulnerability window (3 s at 60 Hz)
    pub const INVULNERABILITY_TICKS: u32 = 180;

    /// Projectile muzzle speed (px/s)
    pub const PROJECTILE_SPEED: f32 = 420.0;
    /// Projectile lifetime in ticks (1 s)
    pub const PROJECTILE_LIFE_TICKS: u32 = 60;
    /// Maximum concurrently live projectiles; firing at the cap is a no-op
    pub const MAX_PROJECTILES: usize = 5;
    /// Projectile render radius
    pub const PROJECTILE_RADIUS: f32 = 2.0;

    /// Fresh asteroid size range (uniform)
    pub const ASTEROID_SIZE_MIN: f32 = 20.0;
    pub const ASTEROID_SIZE_MAX: f32 = 50.0;
    /// Asteroid drift speed range (px/s, uniform)
    pub const ASTEROID_SPEED_MIN: f32 = 30.0;
    pub const ASTEROID_SPEED_MAX: f32 = 90.0;
    /// Maximum asteroid spin magnitude (rad/s, signed uniform)
    pub const ASTEROID_ROT_SPEED_MAX: f32 = 0.6;
    /// Asteroids above this size split into two halves when shot
    pub const ASTEROID_SPLIT_THRESHOLD: f32 = 20.0;
    /// The jagged outline sits inside the bounding size; the ship-asteroid
    /// test scales by this factor
    pub const ASTEROID_HIT_FACTOR: f32 = 0.8;
    /// Minimum distance from the ship for fresh asteroid placement
    pub const SPAWN_CLEARANCE: f32 = 200.0;
    /// Rejection-sampling attempt cap for degenerate viewports
    pub const SPAWN_MAX_ATTEMPTS: u32 = 64;

    /// Initial wave size
    pub const WAVE_BASE_COUNT: usize = 3;
    /// Wave size cap
    pub const WAVE_MAX_COUNT: usize = 10;
    /// Score per extra asteroid in a wave
    pub const WAVE_SCORE_STEP: u64 = 1000;
    /// Delay between field depletion and the next wave (1 s)
    pub const WAVE_DELAY_TICKS: u32 = 60;
    /// Points per asteroid destroyed by a projectile
    pub const ASTEROID_SCORE: u64 = 100;
    /// Lives at game start
    pub const STARTING_LIVES: u8 = 3;

    /// Particle population cap
    pub const MAX_PARTICLES: usize = 256;
    /// Ship explosion burst
    pub const SHIP_BURST_COUNT: usize = 30;
    pub const SHIP_BURST_SIZE: f32 = 3.0;
    /// Asteroid explosion burst
    pub const ASTEROID_BURST_COUNT: usize = 20;
    pub const ASTEROID_BURST_SIZE: f32 = 2.0;
    /// Particle speed range (px/s, uniform)
    pub const PARTICLE_SPEED_MIN: f32 = 30.0;
    pub const PARTICLE_SPEED_MAX: f32 = 210.0;
    /// Particle lifetime range (ticks, uniform)
    pub const PARTICLE_LIFE_MIN: u32 = 30;
    pub const PARTICLE_LIFE_MAX: u32 = 90;
}

/// Unit vector for a heading angle
#[inline]
pub fn heading_vec(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Wrap a coordinate into [0, max) (toroidal boundary)
#[inline]
pub fn wrap_coord(v: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 0.0;
    }
    let wrapped = v.rem_euclid(max);
    // rem_euclid of a tiny negative value can round up to `max` itself
    if wrapped >= max { 0.0 } else { wrapped }
}

/// Wrap a coordinate once it exits [0, max] by more than `margin`,
/// reappearing just outside the opposite edge (asteroid-style wrap)
#[inline]
pub fn wrap_with_margin(v: f32, max: f32, margin: f32) -> f32 {
    if v < -margin {
        max + margin
    } else if v > max + margin {
        -margin
    } else {
        v
    }
}
