//! Best score tracking
//!
//! Read once when the game is created, written only at game over when the
//! session beat it. Stored as decimal text under `consts::HIGHSCORE_KEY`.

use crate::consts::HIGHSCORE_KEY;
use crate::persistence::ScoreStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    pub fn new(value: u64) -> Self {
        Self { value }
    }

    /// Load the stored best score; missing, unreadable or garbled slots count as 0
    pub fn load(store: &dyn ScoreStore) -> Self {
        match store.load(HIGHSCORE_KEY) {
            Ok(Some(text)) => match parse_score(&text) {
                Some(value) => {
                    log::info!("Loaded best score {}", value);
                    Self { value }
                }
                None => {
                    log::warn!("Ignoring unreadable best score {:?}", text);
                    Self::default()
                }
            },
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score: {}", e);
                Self::default()
            }
        }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    /// Would this score replace the best?
    pub fn beaten_by(&self, score: u64) -> bool {
        score > self.value
    }

    /// Offer a finished session's score. Returns true if it is a new best.
    ///
    /// The in-memory best is updated even when the write fails; the failure
    /// is logged and only costs the record in future runs.
    pub fn submit(&mut self, score: u64, store: &mut dyn ScoreStore) -> bool {
        if !self.beaten_by(score) {
            return false;
        }
        self.value = score;
        match store.save(HIGHSCORE_KEY, &score.to_string()) {
            Ok(()) => log::info!("New best score {} saved", score),
            Err(e) => log::warn!("New best score {} not saved: {}", score, e),
        }
        true
    }
}

fn parse_score(text: &str) -> Option<u64> {
    text.trim().parse().ok()
}
