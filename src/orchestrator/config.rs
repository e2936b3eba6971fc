//! # Global orchestrator configuration.
//!
//! Provides [`OrchestratorConfig`] centralized settings for the ad runtime.
//!
//! ## Sentinel values
//! - `bus_capacity` and `callback_capacity` are clamped to a minimum of 1 by
//!   their accessors; a zero in config never constructs an invalid channel.

use crate::policies::{FrequencyPolicy, ReloadPolicy};

/// Global configuration for the ad orchestrator.
///
/// Defines:
/// - **Gating**: frequency policy for the gated interstitial path
/// - **Recovery**: reload backoff for slots whose loads keep failing
/// - **Event system**: bus and SDK callback channel capacities
/// - **SDK bootstrap**: test device IDs applied at initialization
///
/// ## Field semantics
/// - `frequency`: cooldown + screen-count gate (see [`FrequencyPolicy`])
/// - `reload`: bounded backoff after failed loads (see [`ReloadPolicy`])
/// - `bus_capacity`: diagnostic bus ring buffer size (min 1; clamped)
/// - `callback_capacity`: SDK callback queue size (min 1; clamped)
/// - `test_device_ids`: devices that should always receive test ads
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Frequency gate applied by
    /// [`maybe_show_interstitial`](crate::AdOrchestrator::maybe_show_interstitial).
    pub frequency: FrequencyPolicy,

    /// Reload backoff applied after SDK-reported load failures.
    pub reload: ReloadPolicy,

    /// Capacity of the diagnostic event bus ring buffer.
    ///
    /// Slow subscribers that lag behind more than `bus_capacity` messages
    /// will skip older items.
    pub bus_capacity: usize,

    /// Capacity of the SDK callback queue.
    ///
    /// Callbacks arrive at UI pace; a small queue is plenty.
    pub callback_capacity: usize,

    /// Device IDs forwarded to the SDK at initialization so development
    /// builds always receive test ads.
    pub test_device_ids: Vec<String>,
}

impl OrchestratorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns a callback queue capacity clamped to a minimum of 1.
    #[inline]
    pub fn callback_capacity_clamped(&self) -> usize {
        self.callback_capacity.max(1)
    }
}

impl Default for OrchestratorConfig {
    /// Default configuration:
    ///
    /// - `frequency = FrequencyPolicy::default()` (90s cooldown)
    /// - `reload = ReloadPolicy::default()` (1s→60s, factor 2, 4 attempts)
    /// - `bus_capacity = 256`
    /// - `callback_capacity = 64`
    /// - `test_device_ids = []`
    fn default() -> Self {
        Self {
            frequency: FrequencyPolicy::default(),
            reload: ReloadPolicy::default(),
            bus_capacity: 256,
            callback_capacity: 64,
            test_device_ids: Vec::new(),
        }
    }
}
