//! # advisor
//!
//! **Advisor** is a lightweight ad lifecycle orchestration library for Rust.
//!
//! It owns the load/show state machine for full-screen ad slots
//! (interstitial and rewarded) and gates every show decision behind
//! platform capability, premium entitlement, consent, and a frequency
//! policy. The crate is designed as the policy core behind a thin
//! platform-specific SDK binding.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!    ┌──────────────┐  ┌──────────────────┐  ┌──────────────┐
//!    │ ConsentGate  │  │ EntitlementGate  │  │ PlatformInfo │
//!    └──────┬───────┘  └────────┬─────────┘  └──────┬───────┘
//!           ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  AdOrchestrator (runtime façade)                                  │
//! │  - FrequencyPolicy + FrequencyState (cooldown / screen-count)     │
//! │  - one-shot gated-mark observer (marks only on confirmed Shown)   │
//! │  - event loop draining SDK callbacks (serialized transitions)     │
//! │  - Bus (broadcast diagnostic events)                              │
//! │  - SubscriberSet (fans out to user subscribers)                   │
//! └──────┬───────────────────────────┬────────────────────────┬──────┘
//!        ▼                           ▼                        │
//! ┌──────────────────┐      ┌──────────────────┐              │
//! │ AdUnitController │      │ AdUnitController │              │
//! │  (interstitial)  │      │    (rewarded)    │              │
//! └┬─────────────────┘      └┬─────────────────┘              │
//!  │ Publishes               │ Publishes                      │
//!  │ Events:                 │ Events:                        │
//!  │ - LoadRequested         │ - Loaded / LoadFailed          │
//!  │ - Shown / Dismissed     │ - RewardEarned                 │
//!  │ - ShowFailed            │ - ...                          │
//!  ▼                         ▼                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                      Bus (broadcast channel)                      │
//! │            (capacity: OrchestratorConfig::bus_capacity)           │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                             SubscriberSet
//!                           (per-sub queues)
//!                        ┌─────────┼─────────┐
//!                        ▼         ▼         ▼
//!                     worker1   worker2   workerN
//!                        ▼         ▼         ▼
//!                    sub1.on   sub2.on   subN.on
//!                    _event()  _event()  _event()
//! ```
//!
//! ### Slot lifecycle
//! ```text
//! load_interstitial() / load_rewarded()
//!   ├─► platform not ad-capable ─► no-op
//!   ├─► premium user            ─► no-op
//!   └─► slot Empty ─► SDK load with consent-derived request ─► Loading
//!
//! SDK callback ─► event loop ─► controller.apply(event)
//!   ├─ Loaded        ─► Ready (failure streak reset)
//!   ├─ FailedToLoad  ─► Empty + reload after bounded backoff,
//!   │                   or ReloadExhausted when attempts run out
//!   ├─ Shown         ─► gated shows mark the frequency ledger here
//!   ├─ Dismissed     ─► dispose instance ─► Empty ─► immediate prefetch
//!   ├─ FailedToShow  ─► same as Dismissed, without marking
//!   └─ RewardEarned  ─► fire the reward hook (at most once per show)
//!
//! maybe_show_interstitial()
//!   platform ─► premium ─► frequency ─► readiness ─► arm mark ─► show
//!   (any gate failing returns ShowAttempt::Skipped with the reason)
//!
//! show_interstitial() / show_rewarded()
//!   readiness only; never marks the frequency ledger
//! ```
//!
//! ## Features
//! | Area              | Description                                                           | Key types / traits                                  |
//! |-------------------|-----------------------------------------------------------------------|-----------------------------------------------------|
//! | **Orchestration** | Load/show façade with gating and an SDK callback event loop.          | [`AdOrchestrator`], [`OrchestratorBuilder`]         |
//! | **Policies**      | Frequency capping and bounded reload backoff.                         | [`FrequencyPolicy`], [`ReloadPolicy`]               |
//! | **Gates**         | App-provided consent, entitlement, platform, and unit-ID sources.     | [`ConsentGate`], [`EntitlementGate`], [`PlatformInfo`] |
//! | **SDK boundary**  | The capability surface a platform binding implements.                 | [`AdSdk`], [`SdkEvent`], [`SdkEventSender`]         |
//! | **Subscriber API**| Hook into lifecycle events (logging, metrics, custom subscribers).    | [`Subscribe`]                                       |
//! | **Errors**        | Typed initialization errors and show-skip reasons.                    | [`AdError`], [`SkipReason`], [`ShowAttempt`]        |
//! | **Configuration** | Centralize runtime settings.                                          | [`OrchestratorConfig`]                              |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogWriter`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use async_trait::async_trait;
//! use tokio_util::sync::CancellationToken;
//! use advisor::{
//!     AdError, AdFormat, AdInstance, AdOrchestrator, AdRequest, AdSdk,
//!     AdUnitIdProvider, OrchestratorConfig, RequestConfiguration,
//! };
//!
//! // A do-nothing binding; a real one bridges the platform ad SDK and
//! // reports callbacks through `orchestrator.callback_sender()`.
//! struct NoopSdk;
//!
//! #[async_trait]
//! impl AdSdk for NoopSdk {
//!     async fn initialize(&self, _config: RequestConfiguration) -> Result<(), AdError> {
//!         Ok(())
//!     }
//!     async fn load(&self, _format: AdFormat, _unit_id: &str, _request: AdRequest) {}
//!     async fn show(&self, _instance: AdInstance) {}
//!     fn dispose(&self, _instance: AdInstance) {}
//! }
//!
//! struct Ids;
//!
//! impl AdUnitIdProvider for Ids {
//!     fn banner_id(&self) -> &str { "demo-banner" }
//!     fn interstitial_id(&self) -> &str { "demo-interstitial" }
//!     fn rewarded_id(&self) -> &str { "demo-rewarded" }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = AdOrchestrator::builder(
//!         OrchestratorConfig::default(),
//!         Arc::new(NoopSdk),
//!         Arc::new(Ids),
//!     )
//!     .build();
//!
//!     let token = CancellationToken::new();
//!     orchestrator.run(token.clone());
//!
//!     orchestrator.initialize().await?;
//!     orchestrator.load_interstitial().await;
//!
//!     // Later, wherever a natural break occurs:
//!     let attempt = orchestrator.maybe_show_interstitial().await;
//!     println!("show attempt: requested={}", attempt.is_requested());
//!
//!     token.cancel();
//!     Ok(())
//! }
//! ```
mod error;
mod events;
mod gates;
mod orchestrator;
mod policies;
mod sdk;
mod slots;
mod subscribers;

#[cfg(test)]
mod testing;

// ---- Public re-exports ----

pub use error::{AdError, ShowAttempt, SkipReason};
pub use events::{Bus, Event, EventKind};
pub use gates::{AdUnitIdProvider, ConsentGate, EntitlementGate, PlatformInfo};
pub use orchestrator::{AdOrchestrator, OrchestratorBuilder, OrchestratorConfig};
pub use policies::{FrequencyPolicy, FrequencyState, JitterPolicy, ReloadPolicy};
pub use sdk::{
    AdFormat, AdInstance, AdRequest, AdSdk, RequestConfiguration, Reward, SdkEvent, SdkEventKind,
    SdkEventSender,
};
pub use slots::SlotStatus;
pub use subscribers::{Subscribe, SubscriberSet};

// Optional: expose a simple built-in logger subscriber (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use subscribers::LogWriter;
