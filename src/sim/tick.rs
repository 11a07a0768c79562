//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session by one step, plus the
//! edge-triggered fire handler.

use glam::Vec2;
use rand::Rng;

use super::geometry::{Viewport, collides, in_viewport, tip_position, wrap};
use super::input::Intent;
use super::spawn::{spawn_collectible, spawn_hazard, spawn_obstacle, split_obstacle};
use super::state::{DeathCause, GameEvent, GameState, Projectile};
use crate::consts::*;
use crate::heading;

/// Where spent projectiles are parked until the bounds sweep drops them
const DISCARDED: Vec2 = Vec2::new(-1000.0, -1000.0);

/// Advance the game state by one fixed timestep
///
/// Order within a tick:
/// 1. ship rotation and thrust, then wrap into the current viewport
/// 2. ship vs collectibles
/// 3. ship vs hazards (lethal)
/// 4. ship vs obstacles (lethal)
/// 5. projectile movement and hits
/// 6. obstacle drift
/// 7. random spawns
///
/// A lethal collision ends the session and stops the tick right there.
pub fn tick(state: &mut GameState, intent: &Intent, viewport: Viewport) {
    if !state.is_running() {
        return;
    }
    state.time_ticks += 1;

    intent.apply(&mut state.ship, viewport);
    // The viewport may have shrunk since the last tick
    state.ship.pos = wrap(state.ship.pos, viewport);
    let ship_pos = state.ship.pos;

    // Collectibles
    let before = state.collectibles.len();
    state
        .collectibles
        .retain(|c| !collides(ship_pos, c.pos, PICKUP_RADIUS));
    for _ in state.collectibles.len()..before {
        state.add_score(COLLECTIBLE_POINTS);
        state.record(GameEvent::CollectiblePicked {
            points: COLLECTIBLE_POINTS,
        });
    }

    // Hazards
    if state
        .hazards
        .iter()
        .any(|h| collides(ship_pos, h.pos, HAZARD_RADIUS))
    {
        state.end(DeathCause::Hazard);
        return;
    }

    // Obstacles vs ship
    let rammed = state
        .obstacles
        .iter()
        .find(|o| collides(ship_pos, o.pos, o.size.radius()))
        .map(|o| DeathCause::Obstacle {
            id: o.id,
            size: o.size,
        });
    if let Some(cause) = rammed {
        state.end(cause);
        return;
    }

    update_projectiles(state, viewport);

    for obstacle in &mut state.obstacles {
        obstacle.advance(viewport);
    }

    roll_spawns(state, viewport);
}

/// Move projectiles, resolve hits and drop everything outside the viewport
///
/// Each projectile hits at most one obstacle: the first one it overlaps in
/// insertion order. A destroyed obstacle is gone for the projectiles that
/// follow in the same pass, and its fragments only join the field after the
/// pass, so nothing can be scored twice in one tick.
fn update_projectiles(state: &mut GameState, viewport: Viewport) {
    let mut projectiles = std::mem::take(&mut state.projectiles);
    let mut fragments = Vec::new();

    for projectile in &mut projectiles {
        projectile.pos += projectile.vel;

        let hit = state
            .obstacles
            .iter()
            .position(|o| collides(projectile.pos, o.pos, o.size.radius()));
        let Some(index) = hit else {
            continue;
        };

        projectile.pos = DISCARDED;
        let obstacle = state.obstacles.remove(index);
        let points = obstacle.size.points();
        state.add_score(points);
        state.record(GameEvent::ObstacleDestroyed {
            id: obstacle.id,
            size: obstacle.size,
            points,
        });
        log::trace!(
            "Projectile {} destroyed {:?} obstacle {}",
            projectile.id,
            obstacle.size,
            obstacle.id
        );
        fragments.extend(split_obstacle(&obstacle, state));
    }

    projectiles.retain(|p| in_viewport(p.pos, viewport));
    state.projectiles = projectiles;
    state.obstacles.extend(fragments);
}

fn roll_spawns(state: &mut GameState, viewport: Viewport) {
    let rates = state.spawn_rates;
    if state.rng.random_bool(rates.obstacle) {
        spawn_obstacle(state, viewport);
    }
    if state.rng.random_bool(rates.collectible) {
        spawn_collectible(state, viewport);
    }
    if state.rng.random_bool(rates.hazard) {
        spawn_hazard(state, viewport);
    }
}

/// Handle a fire request made at `now_ms`
///
/// Ignored unless the session is running and the cooldown since the last
/// accepted shot has elapsed. Returns the new projectile's id.
pub fn fire(state: &mut GameState, now_ms: f64) -> Option<u32> {
    if !state.is_running() {
        return None;
    }
    if state
        .last_fire_ms
        .is_some_and(|last| now_ms - last < FIRE_COOLDOWN_MS)
    {
        return None;
    }

    let id = state.next_entity_id();
    let ship = &state.ship;
    state.projectiles.push(Projectile {
        id,
        pos: tip_position(ship.pos, ship.rotation),
        vel: heading(ship.rotation) * PROJECTILE_SPEED,
    });
    state.last_fire_ms = Some(now_ms);
    state.record(GameEvent::ProjectileFired { id });
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{
        Collectible, GamePhase, Hazard, Obstacle, ObstacleSize, SpawnRates,
    };

    const VP: Viewport = Viewport {
        width: 800.0,
        height: 600.0,
    };

    fn running_state() -> GameState {
        let mut state = GameState::new(12345, VP);
        state.reset(VP);
        state.spawn_rates = SpawnRates::NONE;
        state
    }

    fn add_obstacle(state: &mut GameState, pos: Vec2, size: ObstacleSize) -> u32 {
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            size,
        });
        id
    }

    fn add_projectile(state: &mut GameState, pos: Vec2, vel: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.projectiles.push(Projectile { id, pos, vel });
        id
    }

    #[test]
    fn test_tick_ignored_unless_running() {
        let mut state = GameState::new(1, VP);
        let thrust = Intent {
            thrust: true,
            ..Default::default()
        };
        tick(&mut state, &thrust, VP);
        assert_eq!(state.time_ticks, 0);
        assert_eq!(state.ship.pos, VP.center());
    }

    #[test]
    fn test_thrust_moves_ship_up_and_records_trail() {
        let mut state = running_state();
        let start = state.ship.pos;
        let thrust = Intent {
            thrust: true,
            ..Default::default()
        };

        let mut last_y = start.y;
        for _ in 0..10 {
            tick(&mut state, &thrust, VP);
            assert!(state.ship.pos.y < last_y);
            last_y = state.ship.pos.y;
        }

        assert_eq!(state.phase, GamePhase::Running);
        assert!((state.ship.pos.x - start.x).abs() < 1e-3);
        assert!((start.y - state.ship.pos.y - 50.0).abs() < 1e-3);
        assert_eq!(state.ship.trail.len(), 10);
        assert_eq!(state.ship.trail.front(), Some(&start));
    }

    #[test]
    fn test_idle_ship_wraps_into_shrunk_viewport() {
        let mut state = running_state();
        let small = Viewport::new(300.0, 200.0);
        tick(&mut state, &Intent::default(), small);
        // (400, 300) is past both far edges
        assert_eq!(state.ship.pos, Vec2::ZERO);

        for _ in 0..50 {
            tick(&mut state, &Intent::default(), small);
        }
        assert_eq!(state.ship.pos, Vec2::ZERO);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_rotation_intent() {
        let mut state = running_state();
        let left = Intent {
            rotation_delta: -SHIP_ROTATION_STEP,
            thrust: false,
        };
        tick(&mut state, &left, VP);
        tick(&mut state, &left, VP);
        assert_eq!(state.ship.rotation, 350.0);
        assert!(state.ship.trail.is_empty());
    }

    #[test]
    fn test_collectible_scores_and_is_removed() {
        let mut state = running_state();
        let ship = state.ship.pos;
        state.collectibles.push(Collectible {
            pos: ship + Vec2::new(10.0, 0.0),
        });
        state.collectibles.push(Collectible {
            pos: ship + Vec2::new(100.0, 0.0),
        });

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.score, COLLECTIBLE_POINTS);
        assert_eq!(state.collectibles.len(), 1);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::CollectiblePicked { points: 10 })
        );
    }

    #[test]
    fn test_hazard_at_ship_ends_session_immediately() {
        let mut state = running_state();
        state.hazards.push(Hazard {
            pos: state.ship.pos,
        });

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.phase, GamePhase::Ended);
        assert_eq!(state.score, 0);
        assert_eq!(state.hazards.len(), 1);
        assert!(state.drain_events().contains(&GameEvent::ShipDestroyed {
            cause: DeathCause::Hazard
        }));

        // Further ticks do nothing
        let ticks = state.time_ticks;
        tick(&mut state, &Intent::default(), VP);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_obstacle_radius_depends_on_tier() {
        let mut state = running_state();
        let ship = state.ship.pos;
        // 30px away: outside small (18) and medium (28), inside large (40)
        add_obstacle(&mut state, ship + Vec2::new(30.0, 0.0), ObstacleSize::Small);
        add_obstacle(&mut state, ship + Vec2::new(-30.0, 0.0), ObstacleSize::Medium);
        tick(&mut state, &Intent::default(), VP);
        assert_eq!(state.phase, GamePhase::Running);

        let id = add_obstacle(&mut state, ship + Vec2::new(0.0, 30.0), ObstacleSize::Large);
        tick(&mut state, &Intent::default(), VP);
        assert_eq!(state.phase, GamePhase::Ended);
        assert!(state.drain_events().contains(&GameEvent::ShipDestroyed {
            cause: DeathCause::Obstacle {
                id,
                size: ObstacleSize::Large
            }
        }));
    }

    #[test]
    fn test_destroying_each_tier_scores_170() {
        let mut state = running_state();
        let large = Vec2::new(100.0, 100.0);
        let medium = Vec2::new(700.0, 100.0);
        let small = Vec2::new(100.0, 500.0);
        add_obstacle(&mut state, large, ObstacleSize::Large);
        add_obstacle(&mut state, medium, ObstacleSize::Medium);
        add_obstacle(&mut state, small, ObstacleSize::Small);
        add_projectile(&mut state, large, Vec2::ZERO);
        add_projectile(&mut state, medium, Vec2::ZERO);
        add_projectile(&mut state, small, Vec2::ZERO);

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.score, 170);
        assert!(state.projectiles.is_empty());
        let mediums = state
            .obstacles
            .iter()
            .filter(|o| o.size == ObstacleSize::Medium)
            .count();
        let smalls = state
            .obstacles
            .iter()
            .filter(|o| o.size == ObstacleSize::Small)
            .count();
        assert_eq!(mediums, 2);
        assert_eq!(smalls, 2);
        assert_eq!(state.obstacles.len(), 4);
    }

    #[test]
    fn test_projectile_hits_first_obstacle_only() {
        let mut state = running_state();
        let spot = Vec2::new(150.0, 150.0);
        let first = add_obstacle(&mut state, spot, ObstacleSize::Small);
        let second = add_obstacle(&mut state, spot + Vec2::new(5.0, 0.0), ObstacleSize::Small);
        add_projectile(&mut state, spot, Vec2::ZERO);

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.score, ObstacleSize::Small.points());
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.obstacles[0].id, second);
        assert!(state.obstacles.iter().all(|o| o.id != first));
    }

    #[test]
    fn test_two_projectiles_cannot_double_score_one_obstacle() {
        let mut state = running_state();
        let spot = Vec2::new(150.0, 150.0);
        add_obstacle(&mut state, spot, ObstacleSize::Small);
        add_projectile(&mut state, spot, Vec2::ZERO);
        let survivor = add_projectile(&mut state, spot, Vec2::ZERO);

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.score, ObstacleSize::Small.points());
        assert!(state.obstacles.is_empty());
        // The second projectile found nothing to hit and is still in bounds
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, survivor);
    }

    #[test]
    fn test_fragments_not_hit_in_same_tick() {
        let mut state = running_state();
        let spot = Vec2::new(150.0, 150.0);
        add_obstacle(&mut state, spot, ObstacleSize::Large);
        add_projectile(&mut state, spot, Vec2::ZERO);
        add_projectile(&mut state, spot, Vec2::ZERO);

        tick(&mut state, &Intent::default(), VP);

        assert_eq!(state.score, ObstacleSize::Large.points());
        assert_eq!(state.obstacles.len(), 2);
    }

    #[test]
    fn test_stationary_projectile_persists_in_bounds() {
        let mut state = running_state();
        let inside = add_projectile(&mut state, Vec2::new(500.0, 300.0), Vec2::ZERO);
        add_projectile(&mut state, Vec2::new(900.0, 300.0), Vec2::ZERO);
        add_projectile(&mut state, Vec2::new(0.0, 300.0), Vec2::ZERO);

        for _ in 0..100 {
            tick(&mut state, &Intent::default(), VP);
        }

        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.projectiles[0].id, inside);
    }

    #[test]
    fn test_projectile_leaves_viewport_and_is_dropped() {
        let mut state = running_state();
        add_projectile(&mut state, Vec2::new(795.0, 300.0), Vec2::new(10.0, 0.0));
        tick(&mut state, &Intent::default(), VP);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_obstacles_drift_wrap_and_spin() {
        let mut state = running_state();
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(10.0, 1.0),
            vel: Vec2::new(0.0, -2.0),
            rotation: 10.0,
            size: ObstacleSize::Small,
        });
        tick(&mut state, &Intent::default(), VP);
        let o = &state.obstacles[0];
        assert_eq!(o.pos, Vec2::new(10.0, 600.0));
        assert!((o.rotation - 10.5).abs() < 1e-4);
    }

    #[test]
    fn test_spawns_follow_rates() {
        let mut state = running_state();
        state.spawn_rates = SpawnRates {
            obstacle: 1.0,
            collectible: 1.0,
            hazard: 0.0,
        };
        for _ in 0..5 {
            tick(&mut state, &Intent::default(), VP);
        }
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.obstacles.len(), 5);
        assert!(state.hazards.is_empty());
        // Every spawned collectible is either still there or was picked up
        let picked = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::CollectiblePicked { .. }))
            .count();
        assert_eq!(state.collectibles.len() + picked, 5);
    }

    #[test]
    fn test_fire_cooldown() {
        let mut state = running_state();
        assert!(fire(&mut state, 0.0).is_some());
        assert!(fire(&mut state, 100.0).is_none());
        assert!(fire(&mut state, 249.9).is_none());
        assert_eq!(state.projectiles.len(), 1);

        assert!(fire(&mut state, 300.0).is_some());
        assert_eq!(state.projectiles.len(), 2);
        assert_ne!(state.projectiles[0].id, state.projectiles[1].id);
    }

    #[test]
    fn test_fire_spawns_at_tip_along_heading() {
        let mut state = running_state();
        state.ship.rotation = 90.0;
        let ship = state.ship.pos;
        fire(&mut state, 0.0);

        let p = &state.projectiles[0];
        assert!((p.pos.x - (ship.x + SHIP_HEIGHT)).abs() < 1e-3);
        assert!((p.pos.y - ship.y).abs() < 1e-3);
        assert!((p.vel.x - PROJECTILE_SPEED).abs() < 1e-4);
        assert!(p.vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_fire_ignored_when_not_running() {
        let mut state = GameState::new(1, VP);
        assert!(fire(&mut state, 0.0).is_none());
        assert!(state.projectiles.is_empty());
        assert_eq!(state.last_fire_ms, None);
    }
}
