//! Game state and core simulation types
//!
//! Entities are plain tagged records owned exclusively by [`GameState`];
//! nothing outside one frame's processing holds a reference to them.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::spawn;
use crate::consts::*;
use crate::heading_vec;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Title screen, waiting for the start trigger
    NotStarted,
    /// Full simulation active
    Running,
    /// Run ended; simulation frozen until restart
    GameOver,
}

/// The player's ship (single instance, repositioned on life loss)
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Heading angle in radians
    pub angle: f32,
    pub vel: Vec2,
    pub radius: f32,
    /// Thrust control held this frame (drives acceleration and flame render)
    pub thrusting: bool,
    /// Remaining invulnerability window; 0 means vulnerable
    pub invulnerable_ticks: u32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            angle: 0.0,
            vel: Vec2::ZERO,
            radius: SHIP_RADIUS,
            thrusting: false,
            invulnerable_ticks: 0,
        }
    }

    /// Ship is exempt from collision damage while the window is open
    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ticks > 0
    }

    /// Recenter after a life loss: zero velocity, reset heading, grant the
    /// invulnerability window
    pub fn reset(&mut self, center: Vec2) {
        self.pos = center;
        self.vel = Vec2::ZERO;
        self.angle = 0.0;
        self.thrusting = false;
        self.invulnerable_ticks = INVULNERABILITY_TICKS;
    }
}

/// An asteroid with a procedurally jagged outline
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    /// Radius-like bounding size; always > 0
    pub size: f32,
    /// Drift direction in radians
    pub heading: f32,
    /// Drift speed (px/s)
    pub speed: f32,
    /// Current spin angle
    pub rotation: f32,
    /// Signed spin rate (rad/s), constant per instance
    pub rotation_speed: f32,
    /// Outline vertices relative to the center (7-10 points)
    pub outline: Vec<Vec2>,
}

/// A projectile fired from the ship's nose
#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    /// Remaining lifetime in ticks
    pub life_ticks: u32,
}

/// A cosmetic explosion particle; no collision interaction
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub size: f32,
    pub life_ticks: u32,
    /// Initial lifetime, kept for fade-out alpha
    pub max_life_ticks: u32,
    /// Packed 0xRRGGBB
    pub color: u32,
}

impl Particle {
    /// Fade-out alpha in [0, 1]
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.life_ticks as f32 / self.max_life_ticks.max(1) as f32
    }
}

/// Explosion particle color
pub const EXPLOSION_COLOR: u32 = 0xff0000;

/// Simulation events emitted during a tick, drained by the host each frame
/// (audio and other effects hang off these instead of ambient globals)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    ProjectileFired,
    /// An asteroid was destroyed by a projectile; `split` is true when it
    /// produced two children
    AsteroidDestroyed { split: bool },
    ShipHit { lives_left: u8 },
    WaveSpawned { count: usize },
    GameOver { score: u64 },
}

/// Complete game state (deterministic given seed, bounds, and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; the only source of randomness in the simulation
    pub rng: Pcg32,
    /// Playfield size; wrap boundaries and initial placement derive from it
    pub bounds: Vec2,
    pub phase: GamePhase,
    /// Monotonically non-decreasing within a run
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Countdown to the next wave once the field is depleted
    pub wave_delay_ticks: Option<u32>,
    pub ship: Ship,
    pub asteroids: Vec<Asteroid>,
    pub projectiles: Vec<Projectile>,
    /// Visual only; capped at [`MAX_PARTICLES`]
    pub particles: Vec<Particle>,
    /// Events emitted this tick
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new world on the title screen
    pub fn new(seed: u64, bounds: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            bounds,
            phase: GamePhase::NotStarted,
            score: 0,
            lives: STARTING_LIVES,
            time_ticks: 0,
            wave_delay_ticks: None,
            ship: Ship::new(bounds / 2.0),
            asteroids: Vec::new(),
            projectiles: Vec::new(),
            particles: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// (Re)initialize a run: reset score/lives, discard all collections and
    /// timers, recenter the ship, and populate the initial field. Used for
    /// both start and restart.
    pub fn start(&mut self) {
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.wave_delay_ticks = None;
        self.asteroids.clear();
        self.projectiles.clear();
        self.particles.clear();
        self.ship.reset(self.bounds / 2.0);
        self.spawn_field(WAVE_BASE_COUNT);
        self.phase = GamePhase::Running;
        log::info!("run started (seed {})", self.seed);
    }

    /// Update the playfield size after a viewport resize. Positions are
    /// re-normalized by the next wrap step.
    pub fn set_bounds(&mut self, bounds: Vec2) {
        self.bounds = bounds;
    }

    /// Populate `count` asteroids placed away from the ship
    pub fn spawn_field(&mut self, count: usize) {
        for _ in 0..count {
            let id = self.next_entity_id();
            let asteroid =
                spawn::spawn_asteroid(&mut self.rng, self.bounds, Some(self.ship.pos), id);
            self.asteroids.push(asteroid);
        }
        self.events.push(GameEvent::WaveSpawned { count });
    }

    /// Fire a projectile from the ship's nose. A no-op at the cap.
    pub fn fire_projectile(&mut self) {
        if self.projectiles.len() >= MAX_PROJECTILES {
            return;
        }
        let id = self.next_entity_id();
        let nose = self.ship.pos + heading_vec(self.ship.angle) * self.ship.radius;
        self.projectiles.push(Projectile {
            id,
            pos: nose,
            heading: self.ship.angle,
            speed: PROJECTILE_SPEED,
            life_ticks: PROJECTILE_LIFE_TICKS,
        });
        self.events.push(GameEvent::ProjectileFired);
    }

    /// Spawn an explosion burst at `pos`, bounded by the particle cap
    pub fn spawn_burst(&mut self, pos: Vec2, count: usize, base_size: f32) {
        for _ in 0..count {
            if self.particles.len() >= MAX_PARTICLES {
                break;
            }
            let life = self.rng.random_range(PARTICLE_LIFE_MIN..PARTICLE_LIFE_MAX);
            self.particles.push(Particle {
                pos,
                heading: self.rng.random_range(0.0..std::f32::consts::TAU),
                speed: self.rng.random_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX),
                size: self.rng.random_range(1.0..base_size + 1.0),
                life_ticks: life,
                max_life_ticks: life,
                color: EXPLOSION_COLOR,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> GameState {
        GameState::new(7, Vec2::new(800.0, 600.0))
    }

    #[test]
    fn new_world_is_on_title_screen() {
        let state = world();
        assert_eq!(state.phase, GamePhase::NotStarted);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, STARTING_LIVES);
        assert!(state.asteroids.is_empty());
    }

    #[test]
    fn start_populates_initial_field_away_from_ship() {
        let mut state = world();
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.asteroids.len(), WAVE_BASE_COUNT);
        for asteroid in &state.asteroids {
            assert!(asteroid.pos.distance(state.ship.pos) >= SPAWN_CLEARANCE);
        }
    }

    #[test]
    fn fire_is_a_noop_at_the_cap() {
        let mut state = world();
        state.start();
        for _ in 0..20 {
            state.fire_projectile();
        }
        assert_eq!(state.projectiles.len(), MAX_PROJECTILES);
    }

    #[test]
    fn projectile_spawns_at_ship_nose() {
        let mut state = world();
        state.start();
        state.ship.angle = 0.0;
        state.fire_projectile();
        let p = &state.projectiles[0];
        assert_eq!(p.pos, state.ship.pos + Vec2::new(SHIP_RADIUS, 0.0));
    }

    #[test]
    fn burst_respects_particle_cap() {
        let mut state = world();
        state.spawn_burst(Vec2::ZERO, MAX_PARTICLES * 2, SHIP_BURST_SIZE);
        assert_eq!(state.particles.len(), MAX_PARTICLES);
    }
}
