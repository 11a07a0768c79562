//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock milliseconds (fire cooldown)
//! - Session seeds

/// Milliseconds on a monotonic-ish clock, for measuring intervals only
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Fresh seed for a session that was not given one
pub fn random_seed() -> u64 {
    rand::random()
}
