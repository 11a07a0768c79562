//! Entity spawning and obstacle splitting

use glam::Vec2;
use rand::Rng;

use super::geometry::Viewport;
use super::state::{Collectible, GameEvent, GameState, Hazard, Obstacle, ObstacleSize};
use crate::consts::*;

/// Spawn a large obstacle just outside a random viewport edge, drifting
/// toward the center. Returns the new obstacle's id.
pub fn spawn_obstacle(state: &mut GameState, viewport: Viewport) -> u32 {
    let (w, h) = (viewport.width, viewport.height);
    let rng = &mut state.rng;
    let pos = match rng.random_range(0..4u8) {
        0 => Vec2::new(rng.random::<f32>() * w, -OBSTACLE_SPAWN_MARGIN),
        1 => Vec2::new(w + OBSTACLE_SPAWN_MARGIN, rng.random::<f32>() * h),
        2 => Vec2::new(rng.random::<f32>() * w, h + OBSTACLE_SPAWN_MARGIN),
        _ => Vec2::new(-OBSTACLE_SPAWN_MARGIN, rng.random::<f32>() * h),
    };
    let vel = (viewport.center() - pos).normalize_or_zero() * OBSTACLE_SPEED;
    let rotation = rng.random::<f32>() * 360.0;

    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        pos,
        vel,
        rotation,
        size: ObstacleSize::Large,
    });
    state.record(GameEvent::ObstacleSpawned { id });
    log::trace!("Obstacle {} spawned at ({:.0}, {:.0})", id, pos.x, pos.y);
    id
}

/// Fragments of a destroyed obstacle
///
/// Large and medium obstacles break into exactly two pieces of the next
/// tier, kicked in opposite directions. Small obstacles leave nothing.
/// The fragments are returned, not inserted.
pub fn split_obstacle(parent: &Obstacle, state: &mut GameState) -> Vec<Obstacle> {
    let Some(size) = parent.size.split_into() else {
        return Vec::new();
    };
    let base_speed = parent.size.split_speed();

    [1.0f32, -1.0]
        .into_iter()
        .map(|direction| {
            let kick = Vec2::new(
                direction * base_speed * state.rng.random::<f32>(),
                direction * base_speed * state.rng.random::<f32>(),
            );
            let rotation = state.rng.random::<f32>() * 360.0;
            Obstacle {
                id: state.next_entity_id(),
                pos: parent.pos,
                vel: parent.vel + kick,
                rotation,
                size,
            }
        })
        .collect()
}

/// Uniform point inside the viewport, inset from every edge
pub fn random_inset_point(rng: &mut impl Rng, viewport: Viewport) -> Vec2 {
    let span_x = (viewport.width - 2.0 * SPAWN_INSET).max(0.0);
    let span_y = (viewport.height - 2.0 * SPAWN_INSET).max(0.0);
    Vec2::new(
        rng.random::<f32>() * span_x + SPAWN_INSET,
        rng.random::<f32>() * span_y + SPAWN_INSET,
    )
}

pub fn spawn_collectible(state: &mut GameState, viewport: Viewport) {
    let pos = random_inset_point(&mut state.rng, viewport);
    state.collectibles.push(Collectible { pos });
}

pub fn spawn_hazard(state: &mut GameState, viewport: Viewport) {
    let pos = random_inset_point(&mut state.rng, viewport);
    state.hazards.push(Hazard { pos });
}
