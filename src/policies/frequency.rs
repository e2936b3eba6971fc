//! # Frequency policy gating how often full-screen ads may be shown.
//!
//! Two types split configuration from state:
//! - [`FrequencyPolicy`] — the knobs: cooldown duration and an optional
//!   minimum number of screen views between displays;
//! - [`FrequencyState`] — the mutable ledger: when an ad was last shown and
//!   how many screens have been seen since.
//!
//! [`FrequencyPolicy::can_show`] is a pure function of state and the caller's
//! clock — it never mutates anything. Only [`FrequencyState::mark_shown`]
//! moves the ledger, and the orchestrator calls it exactly once per actual
//! gated display. The ungated show path never touches it.
//!
//! # Example
//! ```rust
//! use std::time::{Duration, Instant};
//! use advisor::{FrequencyPolicy, FrequencyState};
//!
//! let policy = FrequencyPolicy { cooldown: Duration::from_secs(90), min_screens_between: 0 };
//! let mut state = FrequencyState::default();
//! let t0 = Instant::now();
//!
//! // Fresh state: nothing was ever shown, so showing is allowed.
//! assert!(policy.can_show(&state, t0));
//!
//! state.mark_shown(t0);
//! assert!(!policy.can_show(&state, t0 + Duration::from_secs(10)));
//! assert!(policy.can_show(&state, t0 + Duration::from_secs(90)));
//! ```

use std::time::{Duration, Instant};

/// Cooldown configuration for full-screen ad displays.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyPolicy {
    /// Minimum elapsed time between two consecutive displays.
    pub cooldown: Duration,

    /// Minimum screen views between two consecutive displays.
    ///
    /// ANDed with the cooldown when non-zero; `0` disables the condition.
    /// Fed by [`FrequencyState::note_screen`].
    pub min_screens_between: u32,
}

impl Default for FrequencyPolicy {
    /// Returns a policy with a 90 second cooldown and no screen-count
    /// condition.
    fn default() -> Self {
        Self {
            cooldown: Duration::from_secs(90),
            min_screens_between: 0,
        }
    }
}

impl FrequencyPolicy {
    /// Returns `true` if a full-screen ad may be shown at `now`.
    ///
    /// Pure: reads `state`, never mutates it. True iff nothing was ever
    /// shown, or the cooldown has elapsed **and** enough screens have been
    /// seen since the last display.
    pub fn can_show(&self, state: &FrequencyState, now: Instant) -> bool {
        match state.last_shown_at {
            None => true,
            Some(last) => {
                now.saturating_duration_since(last) >= self.cooldown
                    && state.screens_since_shown >= self.min_screens_between
            }
        }
    }
}

/// Mutable frequency ledger. Process-wide, single-writer (the orchestrator).
#[derive(Clone, Copy, Debug, Default)]
pub struct FrequencyState {
    /// When a gated display last happened; `None` until the first one.
    pub last_shown_at: Option<Instant>,

    /// Screen views observed since the last gated display.
    pub screens_since_shown: u32,
}

impl FrequencyState {
    /// Records an actual display at `now` and resets the screen counter.
    ///
    /// Must be called exactly once per gated display, never on a failed or
    /// skipped attempt.
    pub fn mark_shown(&mut self, now: Instant) {
        self.last_shown_at = Some(now);
        self.screens_since_shown = 0;
    }

    /// Records one screen view (saturating).
    pub fn note_screen(&mut self) {
        self.screens_since_shown = self.screens_since_shown.saturating_add(1);
    }
}
