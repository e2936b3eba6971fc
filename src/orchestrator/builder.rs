//! # Builder for assembling an [`AdOrchestrator`].
//!
//! The SDK binding and the unit-ID provider are required up front; the three
//! gates are optional and fall back to conservative defaults (ads allowed,
//! personalization denied, nobody premium), so a minimal setup stays one
//! expression:
//!
//! ```rust,ignore
//! let orchestrator = AdOrchestrator::builder(config, sdk, unit_ids)
//!     .with_consent(consent)
//!     .with_entitlement(store)
//!     .with_subscribers(vec![Arc::new(LogWriter::new())])
//!     .build();
//! ```
//!
//! `build()` spawns subscriber workers and must run inside a Tokio runtime.

use std::sync::Arc;

use crate::events::Bus;
use crate::gates::{AdUnitIdProvider, ConsentGate, EntitlementGate, PlatformInfo};
use crate::orchestrator::config::OrchestratorConfig;
use crate::orchestrator::core::AdOrchestrator;
use crate::sdk::AdSdk;
use crate::subscribers::{Subscribe, SubscriberSet};

/// Consent fallback: without an explicit gate, requests stay
/// non-personalized.
struct DenyPersonalization;

impl ConsentGate for DenyPersonalization {
    fn is_personalized_allowed(&self) -> bool {
        false
    }
}

/// Entitlement fallback: nobody is exempt.
struct NeverPremium;

impl EntitlementGate for NeverPremium {
    fn is_premium(&self) -> bool {
        false
    }
}

/// Platform fallback: ads are supported.
struct AlwaysCapable;

impl PlatformInfo for AlwaysCapable {
    fn is_ad_capable(&self) -> bool {
        true
    }
}

/// Builder for [`AdOrchestrator`].
pub struct OrchestratorBuilder {
    config: OrchestratorConfig,
    sdk: Arc<dyn AdSdk>,
    unit_ids: Arc<dyn AdUnitIdProvider>,
    consent: Arc<dyn ConsentGate>,
    entitlement: Arc<dyn EntitlementGate>,
    platform: Arc<dyn PlatformInfo>,
    subscribers: Vec<Arc<dyn Subscribe>>,
}

impl OrchestratorBuilder {
    pub(crate) fn new(
        config: OrchestratorConfig,
        sdk: Arc<dyn AdSdk>,
        unit_ids: Arc<dyn AdUnitIdProvider>,
    ) -> Self {
        Self {
            config,
            sdk,
            unit_ids,
            consent: Arc::new(DenyPersonalization),
            entitlement: Arc::new(NeverPremium),
            platform: Arc::new(AlwaysCapable),
            subscribers: Vec::new(),
        }
    }

    /// Sets the consent gate consulted on every load.
    #[must_use]
    pub fn with_consent(mut self, gate: Arc<dyn ConsentGate>) -> Self {
        self.consent = gate;
        self
    }

    /// Sets the entitlement gate that exempts premium users.
    #[must_use]
    pub fn with_entitlement(mut self, gate: Arc<dyn EntitlementGate>) -> Self {
        self.entitlement = gate;
        self
    }

    /// Sets the platform capability probe.
    #[must_use]
    pub fn with_platform(mut self, platform: Arc<dyn PlatformInfo>) -> Self {
        self.platform = platform;
        self
    }

    /// Sets the diagnostic event subscribers.
    #[must_use]
    pub fn with_subscribers(mut self, subs: Vec<Arc<dyn Subscribe>>) -> Self {
        self.subscribers = subs;
        self
    }

    /// Assembles the orchestrator and spawns subscriber workers.
    ///
    /// Must be called within a Tokio runtime.
    #[must_use]
    pub fn build(self) -> Arc<AdOrchestrator> {
        let bus = Bus::new(self.config.bus_capacity_clamped());
        let subs = Arc::new(SubscriberSet::new(self.subscribers, bus.clone()));

        Arc::new(AdOrchestrator::new_internal(
            self.config,
            self.sdk,
            self.consent,
            self.entitlement,
            self.platform,
            self.unit_ids,
            bus,
            subs,
        ))
    }
}
