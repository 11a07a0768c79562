//! Session controller
//!
//! Owns the simulation state and everything around it: the held-key set,
//! the fixed-step tick timer, the best score and its storage slot.
//!
//! Lifecycle: `Idle` → `start` → `Running` → lethal collision → `Ended` →
//! `start` → `Running` (full reset). The tick timer and input listener exist
//! only while running and are released on every way out of a session.

use crate::consts::MAX_SUBSTEPS;
use crate::highscores::BestScore;
use crate::persistence::ScoreStore;
use crate::platform;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, HeldKeys, Snapshot, Viewport, fire, tick};

/// Timer and input listener of a running session
#[derive(Debug)]
struct ActiveLoop {
    /// Elapsed time not yet consumed by ticks
    accumulator_ms: f64,
}

/// A game instance holding all session state
pub struct Game<S: ScoreStore> {
    settings: Settings,
    store: S,
    best: BestScore,
    state: GameState,
    keys: HeldKeys,
    viewport: Viewport,
    active: Option<ActiveLoop>,
}

impl<S: ScoreStore> Game<S> {
    /// Create an idle game, reading the best score once
    pub fn new(settings: Settings, store: S, viewport: Viewport) -> Self {
        let best = BestScore::load(&store);
        let seed = settings.seed.unwrap_or_else(platform::random_seed);
        Self {
            settings,
            store,
            best,
            state: GameState::new(seed, viewport),
            keys: HeldKeys::new(),
            viewport,
            active: None,
        }
    }

    /// Start (or restart) a session with a clean field
    ///
    /// Restarting a running session abandons it like `stop` does.
    pub fn start(&mut self) {
        // A running session is abandoned first, never scored
        self.stop();
        self.state.reset(self.viewport);
        self.active = Some(ActiveLoop {
            accumulator_ms: 0.0,
        });
        log::info!(
            "Session started (seed {}, best {})",
            self.state.seed,
            self.best.value()
        );
    }

    /// Abandon the running session without recording its score
    pub fn stop(&mut self) {
        if self.state.is_running() {
            log::info!("Session abandoned at score {}", self.state.score);
            self.state.phase = GamePhase::Idle;
        }
        self.release();
    }

    /// Key-down event stamped with the platform clock
    pub fn key_down(&mut self, key: &str) {
        self.key_down_at(key, platform::now_ms());
    }

    /// Key-down event at `now_ms`. The first press of the fire key is a fire
    /// request; auto-repeat while it stays held is not.
    pub fn key_down_at(&mut self, key: &str, now_ms: f64) {
        if self.active.is_none() {
            return;
        }
        let fresh = self.keys.press(key);
        if fresh && key == self.settings.key_bindings.fire {
            match fire(&mut self.state, now_ms) {
                Some(id) => log::debug!("Fired projectile {}", id),
                None => log::trace!("Fire ignored (cooldown)"),
            }
        }
    }

    pub fn key_up(&mut self, key: &str) {
        if self.active.is_none() {
            return;
        }
        self.keys.release(key);
    }

    /// Feed elapsed wall time; runs one tick per tick period accumulated,
    /// at most `MAX_SUBSTEPS` per call. Returns the number of ticks run.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        let period = f64::from(self.settings.tick_ms.max(1));
        let Some(active) = self.active.as_mut() else {
            return 0;
        };
        active.accumulator_ms += elapsed_ms.max(0.0);

        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS {
            match self.active.as_mut() {
                Some(active) if active.accumulator_ms >= period => {
                    active.accumulator_ms -= period;
                }
                _ => break,
            }
            self.step();
            substeps += 1;
        }

        // Drop the backlog rather than trying to catch up later
        if let Some(active) = self.active.as_mut() {
            active.accumulator_ms = active.accumulator_ms.min(period);
        }
        substeps
    }

    /// Run exactly one tick now (for hosts driving their own timer)
    pub fn step(&mut self) {
        if self.active.is_none() {
            return;
        }
        let intent = self.keys.intent(&self.settings.key_bindings);
        tick(&mut self.state, &intent, self.viewport);
        if self.state.phase == GamePhase::Ended {
            self.finish();
        }
    }

    /// Running → Ended bookkeeping
    fn finish(&mut self) {
        self.release();
        let score = self.state.score;
        let record = self.best.submit(score, &mut self.store);
        log::info!(
            "Game over after {} ticks: score {}{}",
            self.state.time_ticks,
            score,
            if record { " (new best)" } else { "" }
        );
    }

    /// Detach timer and input listener
    fn release(&mut self) {
        self.active = None;
        self.keys.clear();
    }

    /// Viewport changed; used from the next spawn, wrap or bounds check on
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn best_score(&self) -> u64 {
        self.best.value()
    }

    /// True while the tick timer and input listener are attached
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scripted setups
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.best.value())
    }

    /// Events since the last drain. Hosts that never drain lose the oldest
    /// once `MAX_PENDING_EVENTS` are queued.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }
}

impl<S: ScoreStore> Drop for Game<S> {
    fn drop(&mut self) {
        self.release();
    }
}
