//! Simulation module
//!
//! All gameplay logic lives here. This module must stay free of platform code:
//! - One call to `tick` per fixed timestep
//! - Seeded RNG only
//! - Stable iteration order (insertion order, ids allocated monotonically)
//! - No rendering, storage or clock dependencies

pub mod geometry;
pub mod input;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Viewport, collides, in_viewport, tip_position, wrap};
pub use input::{HeldKeys, Intent};
pub use snapshot::Snapshot;
pub use spawn::{spawn_collectible, spawn_hazard, spawn_obstacle, split_obstacle};
pub use state::{
    Collectible, DeathCause, GameEvent, GamePhase, GameState, Hazard, Obstacle, ObstacleSize,
    Projectile, Ship, SpawnRates,
};
pub use tick::{fire, tick};
