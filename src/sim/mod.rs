//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use spawn::{asteroid_outline, spawn_asteroid, split_asteroid, wave_count};
pub use state::{Asteroid, GameEvent, GamePhase, GameState, Particle, Projectile, Ship};
pub use tick::{TickInput, tick};
