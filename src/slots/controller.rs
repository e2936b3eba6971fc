//! # Per-format lifecycle controller for one full-screen ad slot.
//!
//! [`AdUnitController`] owns the `Empty → Loading → Ready → Showing → Empty`
//! state machine for a single slot (interstitial or rewarded) and exactly one
//! ad instance at a time. SDK callbacks are applied through a single
//! transition function, [`AdUnitController::apply`], which makes the table
//! testable without any SDK binding.
//!
//! ## Lifecycle
//! ```text
//! Empty ──request_load()──► Loading ──Loaded──────────► Ready
//!   ▲                          │                          │
//!   │                          └─FailedToLoad─► Empty     │ request_show()
//!   │                            (reload after backoff,   ▼
//!   │                             bounded by ReloadPolicy)Showing ──Shown (no change)
//!   │                                                     │        ──RewardEarned (hook fires)
//!   └──────Dismissed / FailedToShow (dispose + immediate reload)◄──┘
//! ```
//!
//! ## Rules
//! - `request_load` is a no-op unless the slot is Empty: the previous
//!   instance must be released before a new one is acquired.
//! - `request_show` consumes readiness immediately, before the display
//!   outcome is known; a second concurrent show cannot be issued.
//! - All SDK-reported failures are absorbed here; nothing propagates as an
//!   error. The caller of [`apply`] acts on the returned [`FollowUp`].
//!
//! Callers must serialize access (the orchestrator holds each controller
//! behind a `tokio::sync::Mutex` and drains callbacks on one event loop).

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::events::{Bus, Event, EventKind};
use crate::policies::ReloadPolicy;
use crate::sdk::{AdRequest, AdSdk, Reward, SdkEventKind};
use crate::slots::state::SlotStatus;

/// Hook fired when the user completes a rewarded interaction.
pub(crate) type RewardHook = Box<dyn FnOnce(Reward) + Send>;

/// What the caller of [`AdUnitController::apply`] should do next.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum FollowUp {
    /// Nothing to schedule.
    None,
    /// Issue a reload: immediately (`after: None`, prefetch following a
    /// dismissed or failed show) or after a backoff delay (`after: Some(d)`,
    /// following a failed load).
    Reload { after: Option<Duration> },
    /// The reload policy gave up; the slot stays Empty until the next
    /// explicit load.
    Exhausted,
}

/// Lifecycle controller for a single full-screen ad slot.
pub(crate) struct AdUnitController {
    format: crate::sdk::AdFormat,
    unit_id: Arc<str>,
    sdk: Arc<dyn AdSdk>,
    bus: Bus,
    reload: ReloadPolicy,

    status: SlotStatus,
    instance: Option<crate::sdk::AdInstance>,
    /// Consecutive failed loads since the last successful one.
    failed_loads: u32,
    reward_hook: Option<RewardHook>,
}

impl AdUnitController {
    pub(crate) fn new(
        format: crate::sdk::AdFormat,
        unit_id: impl Into<Arc<str>>,
        sdk: Arc<dyn AdSdk>,
        bus: Bus,
        reload: ReloadPolicy,
    ) -> Self {
        Self {
            format,
            unit_id: unit_id.into(),
            sdk,
            bus,
            reload,
            status: SlotStatus::Empty,
            instance: None,
            failed_loads: 0,
            reward_hook: None,
        }
    }

    /// Current slot status.
    pub(crate) fn status(&self) -> SlotStatus {
        self.status
    }

    /// True iff a loaded instance is held and has not been consumed by a
    /// show command.
    pub(crate) fn is_ready(&self) -> bool {
        matches!(self.status, SlotStatus::Ready) && self.instance.is_some()
    }

    /// Number of consecutive failed loads since the last successful one.
    pub(crate) fn failed_loads(&self) -> u32 {
        self.failed_loads
    }

    /// Requests a load from the SDK.
    ///
    /// No-op (returns `false`) unless the slot is Empty: one instance is
    /// owned at a time, and an in-flight load must resolve first.
    pub(crate) async fn request_load(&mut self, request: AdRequest) -> bool {
        if !matches!(self.status, SlotStatus::Empty) {
            return false;
        }

        self.status = SlotStatus::Loading {
            requested_at: Instant::now(),
        };
        self.sdk.load(self.format, &self.unit_id, request).await;
        self.bus
            .publish(Event::new(EventKind::LoadRequested).with_format(self.format));
        true
    }

    /// Requests presentation of the held instance.
    ///
    /// No-op (returns `false`) unless ready. Readiness is consumed before the
    /// display outcome is known, so a second show cannot slip in. The reward
    /// hook, if any, is held until `RewardEarned` fires or the show ends.
    pub(crate) async fn request_show(&mut self, reward_hook: Option<RewardHook>) -> bool {
        if !self.is_ready() {
            return false;
        }
        let Some(instance) = self.instance else {
            return false;
        };

        self.status = SlotStatus::Showing;
        self.reward_hook = reward_hook;
        self.sdk.show(instance).await;
        self.bus
            .publish(Event::new(EventKind::ShowRequested).with_format(self.format));
        true
    }

    /// Applies one SDK callback to the state machine.
    ///
    /// The single transition function: every native callback funnels through
    /// here. Failures are absorbed; the returned [`FollowUp`] tells the
    /// orchestrator what reload, if any, to schedule.
    pub(crate) fn apply(&mut self, kind: SdkEventKind) -> FollowUp {
        match kind {
            SdkEventKind::Loaded(instance) => {
                if !matches!(self.status, SlotStatus::Loading { .. }) {
                    // Stray instance (late callback after a state reset):
                    // release it, the slot discipline owns at most one.
                    self.sdk.dispose(instance);
                    return FollowUp::None;
                }
                self.instance = Some(instance);
                self.status = SlotStatus::Ready;
                self.failed_loads = 0;
                self.bus
                    .publish(Event::new(EventKind::Loaded).with_format(self.format));
                FollowUp::None
            }

            SdkEventKind::FailedToLoad { reason } => {
                if !matches!(self.status, SlotStatus::Loading { .. }) {
                    return FollowUp::None;
                }
                self.instance = None;
                self.status = SlotStatus::Empty;
                self.failed_loads = self.failed_loads.saturating_add(1);
                self.bus.publish(
                    Event::new(EventKind::LoadFailed)
                        .with_format(self.format)
                        .with_reason(reason)
                        .with_attempt(self.failed_loads),
                );
                match self.reload.delay_for(self.failed_loads - 1) {
                    Some(after) => FollowUp::Reload { after: Some(after) },
                    None => FollowUp::Exhausted,
                }
            }

            SdkEventKind::Shown => {
                if matches!(self.status, SlotStatus::Showing) {
                    self.bus
                        .publish(Event::new(EventKind::Shown).with_format(self.format));
                }
                FollowUp::None
            }

            SdkEventKind::Dismissed => {
                if !matches!(self.status, SlotStatus::Showing) {
                    return FollowUp::None;
                }
                self.release_shown_instance();
                self.bus
                    .publish(Event::new(EventKind::Dismissed).with_format(self.format));
                FollowUp::Reload { after: None }
            }

            SdkEventKind::FailedToShow { reason } => {
                if !matches!(self.status, SlotStatus::Showing) {
                    return FollowUp::None;
                }
                self.release_shown_instance();
                self.bus.publish(
                    Event::new(EventKind::ShowFailed)
                        .with_format(self.format)
                        .with_reason(reason),
                );
                FollowUp::Reload { after: None }
            }

            SdkEventKind::RewardEarned(reward) => {
                if matches!(self.status, SlotStatus::Showing) {
                    if let Some(hook) = self.reward_hook.take() {
                        hook(reward);
                    }
                    self.bus
                        .publish(Event::new(EventKind::RewardEarned).with_format(self.format));
                }
                FollowUp::None
            }
        }
    }

    /// Showing → Empty: dispose the instance and drop an unfired reward hook.
    fn release_shown_instance(&mut self) {
        if let Some(instance) = self.instance.take() {
            self.sdk.dispose(instance);
        }
        self.reward_hook = None;
        self.status = SlotStatus::Empty;
    }
}
