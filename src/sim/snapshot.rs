//! Read-only view of the field for the renderer
//!
//! Built once per frame from `GameState`; owns its data so the renderer can
//! never reach back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState, ObstacleSize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipView {
    pub pos: Vec2,
    pub rotation: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub pos: Vec2,
    pub rotation: f32,
    pub size: ObstacleSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u32,
    pub pos: Vec2,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub best_score: u64,
    pub ship: ShipView,
    /// Oldest first
    pub trail: Vec<Vec2>,
    pub collectibles: Vec<Vec2>,
    pub hazards: Vec<Vec2>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
}

impl Snapshot {
    pub fn capture(state: &GameState, best_score: u64) -> Self {
        Self {
            phase: state.phase,
            score: state.score,
            best_score,
            ship: ShipView {
                pos: state.ship.pos,
                rotation: state.ship.rotation,
            },
            trail: state.ship.trail.iter().copied().collect(),
            collectibles: state.collectibles.iter().map(|c| c.pos).collect(),
            hazards: state.hazards.iter().map(|h| h.pos).collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    pos: o.pos,
                    rotation: o.rotation,
                    size: o.size,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView { id: p.id, pos: p.pos })
                .collect(),
        }
    }

    /// JSON form for non-Rust renderers
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
