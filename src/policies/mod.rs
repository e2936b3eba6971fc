//! Gating and reload policies.
//!
//! This module groups the knobs that control **whether** a full-screen ad may
//! be shown and **how long** to wait before reloading a slot whose loads keep
//! failing.
//!
//! ## Contents
//! - [`FrequencyPolicy`] / [`FrequencyState`] cooldown + screen-count gate
//!   in front of the gated show path
//! - [`ReloadPolicy`] bounded backoff for automatic reloads after failed
//!   loads (first / factor / max / max_attempts + jitter)
//! - [`JitterPolicy`] randomization strategy to avoid synchronized retries
//!
//! ## Quick wiring
//! ```text
//! OrchestratorConfig { frequency: FrequencyPolicy, reload: ReloadPolicy }
//!      ├─► AdOrchestrator uses frequency.can_show(..) to gate maybe_show_interstitial
//!      └─► AdUnitController uses reload.delay_for(attempt) after FailedToLoad
//! ```
//!
//! ## Defaults
//! - `FrequencyPolicy::default()` → cooldown=90s, no screen-count condition.
//! - `ReloadPolicy::default()` → first=1s, factor=2.0, max=60s, 4 attempts.
//! - `JitterPolicy::None` by default; consider `Equal` for balanced randomness.

mod frequency;
mod jitter;
mod reload;

pub use frequency::{FrequencyPolicy, FrequencyState};
pub use jitter::JitterPolicy;
pub use reload::ReloadPolicy;
