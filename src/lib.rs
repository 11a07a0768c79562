//! StarTwist - a wrap-around arcade shooter
//!
//! Core modules:
//! - `sim`: Per-tick simulation (kinematics, collisions, spawning, splitting)
//! - `game`: Session controller (lifecycle, tick timer, input routing)
//! - `highscores`: Persisted best score
//! - `persistence`: String-keyed storage slots
//! - `platform`: Browser/native clock abstraction
//! - `settings`: Key bindings and runtime configuration

pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use highscores::BestScore;
pub use settings::{KeyBindings, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Target simulation tick period in milliseconds
    pub const TICK_MS: u32 = 16;
    /// Maximum ticks run per `advance` call to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Ship geometry and handling (pixels, degrees, per tick)
    pub const SHIP_HEIGHT: f32 = 32.0;
    pub const SHIP_ROTATION_STEP: f32 = 5.0;
    pub const SHIP_THRUST_SPEED: f32 = 5.0;
    /// Maximum number of trail points kept behind the ship
    pub const TRAIL_LENGTH: usize = 20;

    /// Projectiles
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Minimum time between two accepted shots
    pub const FIRE_COOLDOWN_MS: f64 = 250.0;

    /// Obstacles
    pub const OBSTACLE_SPEED: f32 = 1.5;
    /// Spawn distance outside the visible edge
    pub const OBSTACLE_SPAWN_MARGIN: f32 = 50.0;
    pub const OBSTACLE_SPIN: f32 = 0.5;
    /// Split perturbation base speeds
    pub const SPLIT_SPEED_FROM_LARGE: f32 = 2.0;
    pub const SPLIT_SPEED_FROM_MEDIUM: f32 = 2.5;

    /// Collectibles and hazards
    pub const PICKUP_RADIUS: f32 = 20.0;
    pub const HAZARD_RADIUS: f32 = 20.0;
    pub const COLLECTIBLE_POINTS: u64 = 10;
    /// Inset from every viewport edge for collectible/hazard placement
    pub const SPAWN_INSET: f32 = 50.0;

    /// Per-tick spawn probabilities
    pub const OBSTACLE_SPAWN_CHANCE: f64 = 0.01;
    pub const COLLECTIBLE_SPAWN_CHANCE: f64 = 0.01;
    pub const HAZARD_SPAWN_CHANCE: f64 = 0.005;

    /// Persistence slot for the best score
    pub const HIGHSCORE_KEY: &str = "startwist-highscore";

    /// Undrained events kept before the oldest are dropped
    pub const MAX_PENDING_EVENTS: usize = 256;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Unit vector for a rotation in degrees where 0 faces up (negative Y)
#[inline]
pub fn heading(rotation_degrees: f32) -> Vec2 {
    let radians = (rotation_degrees - 90.0).to_radians();
    Vec2::new(radians.cos(), radians.sin())
}
