//! Game state and core simulation types
//!
//! One `GameState` owns every live entity of a session. Constructing it gives
//! an idle session; `reset` is the transition into a fresh running session.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Viewport, wrap};
use crate::consts::*;
use crate::{heading, normalize_degrees};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu, nothing on the field
    Idle,
    /// Tick loop and input active
    Running,
    /// Lethal collision happened, waiting for a restart
    Ended,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Ship {
    pub pos: Vec2,
    /// Degrees in [0, 360), 0 faces up
    pub rotation: f32,
    /// Past positions (oldest first, newest last)
    pub trail: VecDeque<Vec2>,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            rotation: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LENGTH + 1),
        }
    }

    /// Turn by `delta` degrees
    pub fn rotate(&mut self, delta: f32) {
        self.rotation = normalize_degrees(self.rotation + delta);
    }

    /// Move one thrust step along the current facing, leaving a trail point
    /// at the position we moved away from
    pub fn thrust(&mut self, viewport: Viewport) {
        self.record_trail(self.pos);
        self.pos = wrap(self.pos + heading(self.rotation) * SHIP_THRUST_SPEED, viewport);
    }

    fn record_trail(&mut self, pos: Vec2) {
        self.trail.push_back(pos);
        while self.trail.len() > TRAIL_LENGTH {
            self.trail.pop_front();
        }
    }
}

/// Star worth points when touched
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collectible {
    pub pos: Vec2,
}

/// Black hole, lethal on contact, never removed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hazard {
    pub pos: Vec2,
}

/// Obstacle size tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleSize {
    Large,
    Medium,
    Small,
}

impl ObstacleSize {
    /// Collision radius against the ship and projectiles
    pub fn radius(self) -> f32 {
        match self {
            ObstacleSize::Large => 40.0,
            ObstacleSize::Medium => 28.0,
            ObstacleSize::Small => 18.0,
        }
    }

    /// Score for destroying an obstacle of this size
    pub fn points(self) -> u64 {
        match self {
            ObstacleSize::Large => 20,
            ObstacleSize::Medium => 50,
            ObstacleSize::Small => 100,
        }
    }

    /// Tier of the two fragments, `None` for the smallest tier
    pub fn split_into(self) -> Option<ObstacleSize> {
        match self {
            ObstacleSize::Large => Some(ObstacleSize::Medium),
            ObstacleSize::Medium => Some(ObstacleSize::Small),
            ObstacleSize::Small => None,
        }
    }

    /// Base speed of the random kick given to fragments
    pub fn split_speed(self) -> f32 {
        match self {
            ObstacleSize::Large => SPLIT_SPEED_FROM_LARGE,
            _ => SPLIT_SPEED_FROM_MEDIUM,
        }
    }
}

/// An asteroid drifting across the wrapped plane
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    /// Degrees in [0, 360)
    pub rotation: f32,
    pub size: ObstacleSize,
}

impl Obstacle {
    /// Drift one tick, wrap and spin
    pub fn advance(&mut self, viewport: Viewport) {
        self.pos = wrap(self.pos + self.vel, viewport);
        self.rotation = normalize_degrees(self.rotation + OBSTACLE_SPIN);
    }
}

/// A shot fired from the ship's nose
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
}

/// What ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    Hazard,
    Obstacle { id: u32, size: ObstacleSize },
}

/// Notable things that happened during a tick or a fire request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CollectiblePicked { points: u64 },
    ObstacleSpawned { id: u32 },
    ObstacleDestroyed { id: u32, size: ObstacleSize, points: u64 },
    ProjectileFired { id: u32 },
    ShipDestroyed { cause: DeathCause },
}

/// Per-tick spawn probabilities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRates {
    pub obstacle: f64,
    pub collectible: f64,
    pub hazard: f64,
}

impl SpawnRates {
    /// No random spawns at all (scripted scenarios)
    pub const NONE: SpawnRates = SpawnRates {
        obstacle: 0.0,
        collectible: 0.0,
        hazard: 0.0,
    };
}

impl Default for SpawnRates {
    fn default() -> Self {
        Self {
            obstacle: OBSTACLE_SPAWN_CHANCE,
            collectible: COLLECTIBLE_SPAWN_CHANCE,
            hazard: HAZARD_SPAWN_CHANCE,
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG was created from
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub spawn_rates: SpawnRates,
    /// Monotonically non-decreasing while running
    pub score: u64,
    /// Ticks simulated in the current session
    pub time_ticks: u64,
    pub ship: Ship,
    pub collectibles: Vec<Collectible>,
    pub hazards: Vec<Hazard>,
    /// Insertion order is the collision evaluation order
    pub obstacles: Vec<Obstacle>,
    pub projectiles: Vec<Projectile>,
    /// Timestamp of the last accepted shot
    pub last_fire_ms: Option<f64>,
    /// Events since the last drain, oldest first. Holds at most
    /// `MAX_PENDING_EVENTS`; older ones are dropped if nobody drains.
    pub events: Vec<GameEvent>,
    /// Next entity ID (never rewound, so ids stay unique across restarts)
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(seed: u64, viewport: Viewport) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            spawn_rates: SpawnRates::default(),
            score: 0,
            time_ticks: 0,
            ship: Ship::new(viewport.center()),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            obstacles: Vec::new(),
            projectiles: Vec::new(),
            last_fire_ms: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Clear the field and start a fresh running session
    pub fn reset(&mut self, viewport: Viewport) {
        self.phase = GamePhase::Running;
        self.score = 0;
        self.time_ticks = 0;
        self.ship = Ship::new(viewport.center());
        self.collectibles.clear();
        self.hazards.clear();
        self.obstacles.clear();
        self.projectiles.clear();
        self.last_fire_ms = None;
        self.events.clear();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn add_score(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    /// Lethal collision: move to `Ended`
    pub fn end(&mut self, cause: DeathCause) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.phase = GamePhase::Ended;
        self.record(GameEvent::ShipDestroyed { cause });
    }

    /// Queue an event for the host, dropping the oldest past the cap
    pub fn record(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            let excess = self.events.len() + 1 - MAX_PENDING_EVENTS;
            self.events.drain(..excess);
        }
        self.events.push(event);
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
