use std::time::Duration;

use rand::Rng;

/// Lower bound of the jitter window, as a fraction of the nominal interval.
pub const JITTER_MIN: f64 = 0.8;
/// Upper bound of the jitter window.
pub const JITTER_MAX: f64 = 1.2;

/// Sample a pause uniformly from `[0.8 * interval, 1.2 * interval]` so that
/// independent monitors drift apart instead of polling in lockstep.
///
/// Saturates at `Duration::MAX` instead of overflowing.
pub fn jittered_interval<R: Rng + ?Sized>(interval: Duration, rng: &mut R) -> Duration {
    let factor = rng.random_range(JITTER_MIN..=JITTER_MAX);
    Duration::try_from_secs_f64(interval.as_secs_f64() * factor).unwrap_or(Duration::MAX)
}
