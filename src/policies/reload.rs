//! # Reload policy for slots whose loads keep failing.
//!
//! [`ReloadPolicy`] bounds the automatic reload attempts a slot makes after
//! the SDK reports a load failure. It is parameterized by:
//! - [`ReloadPolicy::factor`] the multiplicative growth factor;
//! - [`ReloadPolicy::first`] the initial delay;
//! - [`ReloadPolicy::max`] the maximum delay cap;
//! - [`ReloadPolicy::max_attempts`] the cap on consecutive automatic reloads.
//!
//! The delay for attempt `n` is computed as `first × factor^n`, clamped to
//! `max`, then jitter is applied. Because the base delay is derived purely
//! from the attempt number, jitter output never feeds back into subsequent
//! calculations.
//!
//! Once `max_attempts` consecutive loads have failed, [`ReloadPolicy::delay_for`]
//! returns `None` and the slot stays Empty until the next explicit load. A
//! successful load resets the attempt count. Reloads that follow a dismissed
//! or failed show are prefetches, not retries — they bypass this policy and
//! happen immediately.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use advisor::{JitterPolicy, ReloadPolicy};
//!
//! let reload = ReloadPolicy {
//!     first: Duration::from_secs(1),
//!     max: Duration::from_secs(60),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//!     max_attempts: 3,
//! };
//!
//! // First failure — retry after 'first'
//! assert_eq!(reload.delay_for(0), Some(Duration::from_secs(1)));
//! // Second failure — first × factor^1
//! assert_eq!(reload.delay_for(1), Some(Duration::from_secs(2)));
//! // Fourth failure — attempts exhausted, give up
//! assert_eq!(reload.delay_for(3), None);
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Bounded backoff for automatic reloads after failed loads.
///
/// `max_attempts = 0` disables automatic reloads entirely: every failed load
/// leaves the slot Empty until a caller loads again.
#[derive(Clone, Copy, Debug)]
pub struct ReloadPolicy {
    /// Initial delay before the first automatic reload.
    pub first: Duration,
    /// Maximum delay cap for reloads.
    pub max: Duration,
    /// Multiplicative growth factor (`>= 1.0` recommended).
    pub factor: f64,
    /// Jitter policy applied to the clamped delay.
    pub jitter: JitterPolicy,
    /// Maximum consecutive automatic reloads before giving up.
    pub max_attempts: u32,
}

impl Default for ReloadPolicy {
    /// Returns a policy with:
    /// - `first = 1s`;
    /// - `max = 60s`;
    /// - `factor = 2.0` (exponential);
    /// - `jitter = None`;
    /// - `max_attempts = 4`.
    fn default() -> Self {
        Self {
            first: Duration::from_secs(1),
            max: Duration::from_secs(60),
            factor: 2.0,
            jitter: JitterPolicy::None,
            max_attempts: 4,
        }
    }
}

impl ReloadPolicy {
    /// Computes the delay before the reload following failure number
    /// `attempt` (0-indexed), or `None` when the attempts are exhausted.
    ///
    /// The base delay is `first × factor^attempt`, clamped to
    /// [`ReloadPolicy::max`]. Jitter is applied to the clamped base; the
    /// result is never fed back into subsequent calculations.
    pub fn delay_for(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }

        let max_secs = self.max.as_secs_f64();
        let clamped_exp = attempt.min(i32::MAX as u32) as i32;
        let unclamped_secs = self.first.as_secs_f64() * self.factor.powi(clamped_exp);

        let base =
            if !unclamped_secs.is_finite() || unclamped_secs < 0.0 || unclamped_secs > max_secs {
                self.max
            } else {
                Duration::from_secs_f64(unclamped_secs)
            };

        Some(self.jitter.apply(base))
    }
}
