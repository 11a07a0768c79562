//! StarTwist headless runner
//!
//! Plays one session with a simple autopilot on simulated time and prints the
//! final frame as JSON. The browser build drives `Game` from its own host.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;

    use startwist::persistence::{FileStore, MemoryStore, ScoreStore};
    use startwist::sim::{GameEvent, GameState, Viewport};
    use startwist::{Game, KeyBindings, Settings, normalize_degrees};

    /// Simulated play time before the run is cut off
    const DEMO_SECONDS: f64 = 60.0;
    /// Only bother aiming at obstacles this close
    const AIM_RANGE: f32 = 350.0;
    /// Fire when the nose is within this many degrees of the target
    const AIM_TOLERANCE: f32 = 8.0;

    fn open_store(settings: &Settings) -> Box<dyn ScoreStore> {
        let dir = settings.data_dir.clone().or_else(FileStore::default_dir);
        match dir.map(FileStore::new) {
            Some(Ok(store)) => {
                log::info!("Best score stored in {}", store.dir().display());
                Box::new(store)
            }
            Some(Err(e)) => {
                log::warn!("{}; best score will not persist", e);
                Box::new(MemoryStore::new())
            }
            None => {
                log::warn!("No data directory; best score will not persist");
                Box::new(MemoryStore::new())
            }
        }
    }

    /// Rotation that points the ship's nose from `state.ship` at `target`
    fn bearing(state: &GameState, target: glam::Vec2) -> f32 {
        let d = target - state.ship.pos;
        normalize_degrees(d.y.atan2(d.x).to_degrees() + 90.0)
    }

    /// Signed shortest turn from `from` to `to`, in (-180, 180]
    fn turn(from: f32, to: f32) -> f32 {
        let d = normalize_degrees(to - from);
        if d > 180.0 { d - 360.0 } else { d }
    }

    /// Keys the autopilot wants held this tick
    fn pilot(state: &GameState, keys: &KeyBindings) -> HashSet<String> {
        let mut held = HashSet::new();
        let ship = state.ship.pos;

        let nearest_obstacle = state
            .obstacles
            .iter()
            .map(|o| (o.pos, o.pos.distance(ship)))
            .filter(|(_, d)| *d < AIM_RANGE)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((target, _)) = nearest_obstacle {
            let delta = turn(state.ship.rotation, bearing(state, target));
            if delta.abs() <= AIM_TOLERANCE {
                held.insert(keys.fire.clone());
            } else if delta < 0.0 {
                held.insert(keys.rotate_left.clone());
            } else {
                held.insert(keys.rotate_right.clone());
            }
            return held;
        }

        let nearest_star = state
            .collectibles
            .iter()
            .min_by(|a, b| a.pos.distance(ship).total_cmp(&b.pos.distance(ship)));
        if let Some(star) = nearest_star {
            let delta = turn(state.ship.rotation, bearing(state, star.pos));
            if delta.abs() > 5.0 {
                held.insert(if delta < 0.0 {
                    keys.rotate_left.clone()
                } else {
                    keys.rotate_right.clone()
                });
            } else {
                held.insert(keys.thrust.clone());
            }
        }
        held
    }

    pub fn run() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        log::info!("StarTwist (headless) starting...");

        let settings = Settings::load();
        let store = open_store(&settings);
        let keys = settings.key_bindings.clone();
        let tick_ms = f64::from(settings.tick_ms.max(1));

        let mut game = Game::new(settings, store, Viewport::default());
        game.start();

        let mut held: HashSet<String> = HashSet::new();
        let mut now = 0.0;
        while game.is_active() && now < DEMO_SECONDS * 1000.0 {
            let mut wanted = pilot(game.state(), &keys);
            // Let go of the trigger every other tick so each shot is a new press
            if held.contains(&keys.fire) {
                wanted.remove(&keys.fire);
            }
            for key in held.difference(&wanted) {
                game.key_up(key);
            }
            for key in wanted.difference(&held) {
                game.key_down_at(key, now);
            }
            held = wanted;

            game.advance(tick_ms);
            now += tick_ms;

            for event in game.drain_events() {
                match event {
                    GameEvent::ShipDestroyed { cause } => log::info!("Ship destroyed: {:?}", cause),
                    other => log::debug!("{:?}", other),
                }
            }
        }
        game.stop();

        log::info!(
            "Run finished at {:.1}s: score {}, best {}",
            now / 1000.0,
            game.score(),
            game.best_score()
        );
        match game.snapshot().to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize final frame: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host embeds the library directly
}
