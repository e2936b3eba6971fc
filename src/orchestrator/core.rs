//! # The orchestrator: the thin façade the app calls.
//!
//! [`AdOrchestrator`] composes the gates, the frequency policy, and one
//! [`AdUnitController`] per full-screen format into the "maybe show"
//! decision, and drains SDK callbacks on a single event loop so every slot's
//! state machine is serialized.
//!
//! ## Gated vs ungated show
//! [`AdOrchestrator::maybe_show_interstitial`] walks the full gate chain
//! (platform → premium → cooldown → readiness) and arms a one-shot observer
//! that marks the frequency ledger when the SDK confirms the ad was shown.
//! [`AdOrchestrator::show_interstitial`] exists for caller-controlled
//! placements: it skips the premium and cooldown gates and never touches
//! frequency accounting. Both paths converge on the same controller
//! transition and reload handling.
//!
//! ## Event loop
//! ```text
//! SDK binding ── SdkEventSender ──► callback queue ─┐
//!                                                   ▼
//!                     ┌────────── run_inner (select!) ──────────┐
//!                     │  frequency accounting (one-shot mark)   │
//!                     │  controller.apply(event) → FollowUp     │
//!                     │  reload now / after backoff / give up   │
//!                     └──────────────┬───────────────────────────┘
//!                                    ▼
//!                        Bus ──► SubscriberSet ──► user subscribers
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::time::Instant;

use tokio::sync::{mpsc, Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::error::{AdError, ShowAttempt, SkipReason};
use crate::events::{Bus, Event, EventKind};
use crate::gates::{AdUnitIdProvider, ConsentGate, EntitlementGate, PlatformInfo};
use crate::orchestrator::config::OrchestratorConfig;
use crate::policies::FrequencyState;
use crate::sdk::{
    AdFormat, AdRequest, AdSdk, RequestConfiguration, Reward, SdkEvent, SdkEventKind,
    SdkEventSender,
};
use crate::slots::{AdUnitController, FollowUp, RewardHook, SlotStatus};
use crate::subscribers::SubscriberSet;

/// Orchestrates ad loading and showing behind consent, entitlement, platform,
/// and frequency gates.
///
/// Construct once at startup via
/// [`AdOrchestrator::builder`](crate::OrchestratorBuilder), call
/// [`run`](Self::run) to start the event loop, and hand
/// [`callback_sender`](Self::callback_sender) to the SDK binding.
pub struct AdOrchestrator {
    config: OrchestratorConfig,
    sdk: Arc<dyn AdSdk>,
    consent: Arc<dyn ConsentGate>,
    entitlement: Arc<dyn EntitlementGate>,
    platform: Arc<dyn PlatformInfo>,
    unit_ids: Arc<dyn AdUnitIdProvider>,

    bus: Bus,
    subs: Arc<SubscriberSet>,

    // One slot per full-screen format, each behind its own mutex so state
    // machine invariants hold on multi-threaded runtimes.
    interstitial: Mutex<AdUnitController>,
    rewarded: Mutex<AdUnitController>,

    // Frequency ledger: single writer (this orchestrator).
    frequency: Mutex<FrequencyState>,
    // One-shot "mark on shown" flag armed only by the gated show path.
    gated_mark: AtomicBool,

    initialized: AtomicBool,

    // SDK callback queue.
    cb_tx: mpsc::Sender<SdkEvent>,
    cb_rx: RwLock<Option<mpsc::Receiver<SdkEvent>>>,
}

impl AdOrchestrator {
    /// Returns a builder; see [`OrchestratorBuilder`](crate::OrchestratorBuilder).
    pub fn builder(
        config: OrchestratorConfig,
        sdk: Arc<dyn AdSdk>,
        unit_ids: Arc<dyn AdUnitIdProvider>,
    ) -> crate::orchestrator::builder::OrchestratorBuilder {
        crate::orchestrator::builder::OrchestratorBuilder::new(config, sdk, unit_ids)
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new_internal(
        config: OrchestratorConfig,
        sdk: Arc<dyn AdSdk>,
        consent: Arc<dyn ConsentGate>,
        entitlement: Arc<dyn EntitlementGate>,
        platform: Arc<dyn PlatformInfo>,
        unit_ids: Arc<dyn AdUnitIdProvider>,
        bus: Bus,
        subs: Arc<SubscriberSet>,
    ) -> Self {
        let (cb_tx, cb_rx) = mpsc::channel(config.callback_capacity_clamped());

        let interstitial = AdUnitController::new(
            AdFormat::Interstitial,
            unit_ids.interstitial_id(),
            Arc::clone(&sdk),
            bus.clone(),
            config.reload,
        );
        let rewarded = AdUnitController::new(
            AdFormat::Rewarded,
            unit_ids.rewarded_id(),
            Arc::clone(&sdk),
            bus.clone(),
            config.reload,
        );

        Self {
            config,
            sdk,
            consent,
            entitlement,
            platform,
            unit_ids,
            bus,
            subs,
            interstitial: Mutex::new(interstitial),
            rewarded: Mutex::new(rewarded),
            frequency: Mutex::new(FrequencyState::default()),
            gated_mark: AtomicBool::new(false),
            initialized: AtomicBool::new(false),
            cb_tx,
            cb_rx: RwLock::new(Some(cb_rx)),
        }
    }

    /// One-time process-wide SDK bootstrap.
    ///
    /// No-op `Ok` on ad-incapable platforms. A second call returns
    /// [`AdError::AlreadyInitialized`]; an SDK failure propagates unchanged —
    /// the only path out of this crate a caller may treat as fatal.
    pub async fn initialize(&self) -> Result<(), AdError> {
        if !self.platform.is_ad_capable() {
            return Ok(());
        }
        if self.initialized.swap(true, Ordering::SeqCst) {
            return Err(AdError::AlreadyInitialized);
        }
        self.sdk
            .initialize(RequestConfiguration {
                test_device_ids: self.config.test_device_ids.clone(),
            })
            .await
    }

    /// Starts the event loop (spawns in background).
    ///
    /// Cancelling `token` stops the loop; pending delayed reloads are
    /// abandoned with it.
    pub fn run(self: &Arc<Self>, token: CancellationToken) {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(e) = this.run_inner(token).await {
                eprintln!("[advisor] event loop error: {e:?}");
            }
        });
    }

    async fn run_inner(self: Arc<Self>, token: CancellationToken) -> anyhow::Result<()> {
        let mut rx = self
            .cb_rx
            .write()
            .await
            .take()
            .ok_or_else(|| anyhow::anyhow!("event loop already running"))?;

        let mut bus_rx = self.bus.subscribe();

        loop {
            tokio::select! {
                _ = token.cancelled() => break,

                Some(ev) = rx.recv() => {
                    self.handle_sdk_event(ev, &token).await;
                }
                Ok(event) = bus_rx.recv() => {
                    self.subs.emit_arc(Arc::new(event));
                }
            }
        }

        Ok(())
    }

    /// Returns the sender the SDK binding uses to deliver callbacks.
    pub fn callback_sender(&self) -> SdkEventSender {
        SdkEventSender {
            tx: self.cb_tx.clone(),
        }
    }

    /// Prefetches an interstitial. No-op when the platform has no ad support,
    /// the user is premium, or the slot already holds or awaits an instance.
    pub async fn load_interstitial(&self) -> bool {
        self.load_format(AdFormat::Interstitial).await
    }

    /// Prefetches a rewarded ad, under the same guards as
    /// [`load_interstitial`](Self::load_interstitial).
    pub async fn load_rewarded(&self) -> bool {
        self.load_format(AdFormat::Rewarded).await
    }

    /// Tries to show the interstitial, honoring every gate:
    ///
    /// 1. platform unsupported → skip;
    /// 2. premium/entitled → skip;
    /// 3. frequency policy says not now → skip (`cooldown_active`);
    /// 4. no loaded instance → skip (`not_ready`);
    /// 5. otherwise arm the one-shot "mark shown" observer and issue the
    ///    show.
    ///
    /// The frequency ledger moves only when the SDK later confirms `Shown`;
    /// a failed show disarms the observer without marking.
    pub async fn maybe_show_interstitial(&self) -> ShowAttempt {
        if !self.platform.is_ad_capable() {
            return self.skip(AdFormat::Interstitial, SkipReason::PlatformUnsupported);
        }
        if self.entitlement.is_premium() {
            return self.skip(AdFormat::Interstitial, SkipReason::PremiumExempt);
        }
        {
            let freq = self.frequency.lock().await;
            if !self.config.frequency.can_show(&freq, Instant::now()) {
                return self.skip(AdFormat::Interstitial, SkipReason::CooldownActive);
            }
        }

        let mut ctrl = self.interstitial.lock().await;
        if !ctrl.is_ready() {
            return self.skip(AdFormat::Interstitial, SkipReason::NotReady);
        }

        self.gated_mark.store(true, Ordering::SeqCst);
        ctrl.request_show(None).await;
        ShowAttempt::Requested
    }

    /// Shows the interstitial regardless of premium state and cooldown.
    ///
    /// For caller-controlled placements (explicit user-initiated actions).
    /// Bypasses frequency accounting entirely: the cooldown clock does not
    /// move. Only the readiness guard applies.
    pub async fn show_interstitial(&self) -> ShowAttempt {
        let mut ctrl = self.interstitial.lock().await;
        if !ctrl.is_ready() {
            return self.skip(AdFormat::Interstitial, SkipReason::NotReady);
        }
        ctrl.request_show(None).await;
        ShowAttempt::Requested
    }

    /// Shows the rewarded ad if one is loaded.
    ///
    /// `on_reward` fires only when the SDK reports the user completed the
    /// rewarded interaction; dismissal happens regardless and drops an
    /// unfired hook.
    pub async fn show_rewarded(
        &self,
        on_reward: impl FnOnce(Reward) + Send + 'static,
    ) -> ShowAttempt {
        let mut ctrl = self.rewarded.lock().await;
        if !ctrl.is_ready() {
            return self.skip(AdFormat::Rewarded, SkipReason::NotReady);
        }
        let hook: RewardHook = Box::new(on_reward);
        ctrl.request_show(Some(hook)).await;
        ShowAttempt::Requested
    }

    /// Records one screen view for the frequency policy's screen-count
    /// condition.
    pub async fn note_screen_view(&self) {
        self.frequency.lock().await.note_screen();
    }

    /// True iff the frequency policy would allow a gated show right now.
    pub async fn can_show_now(&self) -> bool {
        let freq = self.frequency.lock().await;
        self.config.frequency.can_show(&freq, Instant::now())
    }

    /// True iff a loaded interstitial is waiting to be shown.
    pub async fn is_interstitial_ready(&self) -> bool {
        self.interstitial.lock().await.is_ready()
    }

    /// True iff a loaded rewarded ad is waiting to be shown.
    pub async fn is_rewarded_ready(&self) -> bool {
        self.rewarded.lock().await.is_ready()
    }

    /// Current interstitial slot status, for diagnostics.
    pub async fn interstitial_status(&self) -> SlotStatus {
        self.interstitial.lock().await.status()
    }

    /// Current rewarded slot status, for diagnostics.
    pub async fn rewarded_status(&self) -> SlotStatus {
        self.rewarded.lock().await.status()
    }

    /// Request parameters derived from the consent gate **right now**.
    ///
    /// This is what every load uses, and what callers building their own
    /// banner slots should pass to the SDK (see
    /// [`banner_unit_id`](Self::banner_unit_id)).
    pub fn current_request(&self) -> AdRequest {
        AdRequest {
            personalized: self.consent.is_personalized_allowed(),
        }
    }

    /// Unit ID for caller-built banner slots.
    pub fn banner_unit_id(&self) -> &str {
        self.unit_ids.banner_id()
    }

    /// Applies one SDK callback: frequency accounting, then the owning
    /// slot's transition, then whatever reload the transition asks for.
    pub(crate) async fn handle_sdk_event(self: &Arc<Self>, ev: SdkEvent, token: &CancellationToken) {
        let format = ev.format;
        let controller = match format {
            AdFormat::Interstitial => &self.interstitial,
            AdFormat::Rewarded => &self.rewarded,
            // Banner slots are caller-owned; nothing to route.
            AdFormat::Banner => return,
        };

        if format == AdFormat::Interstitial {
            match &ev.kind {
                SdkEventKind::Shown => {
                    if self.gated_mark.swap(false, Ordering::SeqCst) {
                        self.frequency.lock().await.mark_shown(Instant::now());
                    }
                }
                SdkEventKind::FailedToShow { .. } | SdkEventKind::Dismissed => {
                    // A show that never happened (or is over) must not mark
                    // later.
                    self.gated_mark.store(false, Ordering::SeqCst);
                }
                _ => {}
            }
        }

        let (follow, attempts) = {
            let mut ctrl = controller.lock().await;
            let follow = ctrl.apply(ev.kind);
            (follow, ctrl.failed_loads())
        };

        match follow {
            FollowUp::None => {}

            // Prefetch the next ad right away, through the same gates as any
            // other load (premium may have flipped since).
            FollowUp::Reload { after: None } => {
                self.load_format(format).await;
            }

            FollowUp::Reload { after: Some(delay) } => {
                self.bus.publish(
                    Event::new(EventKind::ReloadScheduled)
                        .with_format(format)
                        .with_delay(delay)
                        .with_attempt(attempts),
                );
                let this = Arc::downgrade(self);
                let tok = token.clone();
                tokio::spawn(async move {
                    tokio::select! {
                        _ = tok.cancelled() => {}
                        _ = tokio::time::sleep(delay) => {
                            if let Some(orchestrator) = Weak::upgrade(&this) {
                                orchestrator.load_format(format).await;
                            }
                        }
                    }
                });
            }

            FollowUp::Exhausted => {
                self.bus.publish(
                    Event::new(EventKind::ReloadExhausted)
                        .with_format(format)
                        .with_attempt(attempts),
                );
            }
        }
    }

    /// Gated load: platform and premium checks, consent-derived params, then
    /// the slot's own single-instance discipline.
    async fn load_format(&self, format: AdFormat) -> bool {
        if !self.platform.is_ad_capable() {
            return false;
        }
        if self.entitlement.is_premium() {
            return false;
        }

        let controller = match format {
            AdFormat::Interstitial => &self.interstitial,
            AdFormat::Rewarded => &self.rewarded,
            AdFormat::Banner => return false,
        };

        let request = self.current_request();
        controller.lock().await.request_load(request).await
    }

    fn skip(&self, format: AdFormat, reason: SkipReason) -> ShowAttempt {
        self.bus.publish(
            Event::new(EventKind::ShowSkipped)
                .with_format(format)
                .with_reason(reason.as_label()),
        );
        ShowAttempt::Skipped(reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::{FrequencyPolicy, JitterPolicy, ReloadPolicy};
    use crate::sdk::AdInstance;
    use crate::testing::{FixedGates, RecordingSdk, SdkCall, TestUnitIds};
    use std::sync::atomic::AtomicU32;
    use std::time::Duration;

    fn orchestrator(
        gates: &Arc<FixedGates>,
        sdk: &Arc<RecordingSdk>,
        config: OrchestratorConfig,
    ) -> Arc<AdOrchestrator> {
        AdOrchestrator::builder(
            config,
            sdk.clone() as Arc<dyn AdSdk>,
            Arc::new(TestUnitIds),
        )
        .with_consent(gates.clone())
        .with_entitlement(gates.clone())
        .with_platform(gates.clone())
        .build()
    }

    fn no_cooldown() -> OrchestratorConfig {
        OrchestratorConfig {
            frequency: FrequencyPolicy {
                cooldown: Duration::ZERO,
                min_screens_between: 0,
            },
            ..OrchestratorConfig::default()
        }
    }

    fn inter_event(kind: SdkEventKind) -> SdkEvent {
        SdkEvent::new(AdFormat::Interstitial, kind)
    }

    fn inter_instance(id: u64) -> AdInstance {
        AdInstance {
            id,
            format: AdFormat::Interstitial,
        }
    }

    /// Loads the interstitial and resolves the load successfully.
    async fn load_ready(orch: &Arc<AdOrchestrator>, token: &CancellationToken, id: u64) {
        orch.load_interstitial().await;
        orch.handle_sdk_event(inter_event(SdkEventKind::Loaded(inter_instance(id))), token)
            .await;
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_premium_blocks_load_and_show() {
        let gates = FixedGates::arc();
        gates.premium.store(true, Ordering::SeqCst);
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert!(!orch.load_interstitial().await);
        assert!(!orch.load_rewarded().await);
        assert_eq!(sdk.load_count(), 0);

        let attempt = orch.maybe_show_interstitial().await;
        assert_eq!(attempt.skip_reason(), Some(SkipReason::PremiumExempt));
        assert_eq!(sdk.show_count(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_unsupported_platform_blocks_everything() {
        let gates = FixedGates::arc();
        gates.ad_capable.store(false, Ordering::SeqCst);
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert!(!orch.load_interstitial().await);
        let attempt = orch.maybe_show_interstitial().await;
        assert_eq!(attempt.skip_reason(), Some(SkipReason::PlatformUnsupported));
        assert_eq!(sdk.calls().len(), 0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_not_ready_skips_without_side_effects() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, no_cooldown());

        let attempt = orch.maybe_show_interstitial().await;
        assert_eq!(attempt.skip_reason(), Some(SkipReason::NotReady));
        assert_eq!(sdk.show_count(), 0);
        assert!(orch.can_show_now().await, "skip must not mark the ledger");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_gated_show_marks_once_and_prefetches_after_dismissal() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                frequency: FrequencyPolicy {
                    cooldown: Duration::from_secs(3600),
                    min_screens_between: 0,
                },
                ..OrchestratorConfig::default()
            },
        );
        let token = CancellationToken::new();

        load_ready(&orch, &token, 1).await;
        assert!(orch.is_interstitial_ready().await);

        assert!(orch.maybe_show_interstitial().await.is_requested());
        assert_eq!(sdk.show_count(), 1);
        assert!(!orch.is_interstitial_ready().await);

        // The ledger moves only on the SDK's confirmation.
        assert!(orch.can_show_now().await);
        orch.handle_sdk_event(inter_event(SdkEventKind::Shown), &token)
            .await;
        assert!(!orch.can_show_now().await);

        // Dismissal releases the instance and prefetches the next one.
        orch.handle_sdk_event(inter_event(SdkEventKind::Dismissed), &token)
            .await;
        assert_eq!(sdk.load_count(), 2);
        assert!(matches!(
            orch.interstitial_status().await,
            SlotStatus::Loading { .. }
        ));

        // Cooldown now blocks the next gated attempt.
        orch.handle_sdk_event(inter_event(SdkEventKind::Loaded(inter_instance(2))), &token)
            .await;
        let attempt = orch.maybe_show_interstitial().await;
        assert_eq!(attempt.skip_reason(), Some(SkipReason::CooldownActive));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_ungated_show_never_touches_the_ledger() {
        let gates = FixedGates::arc();
        gates.premium.store(false, Ordering::SeqCst);
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                frequency: FrequencyPolicy {
                    cooldown: Duration::from_secs(3600),
                    min_screens_between: 0,
                },
                ..OrchestratorConfig::default()
            },
        );
        let token = CancellationToken::new();

        load_ready(&orch, &token, 1).await;
        assert!(orch.show_interstitial().await.is_requested());
        orch.handle_sdk_event(inter_event(SdkEventKind::Shown), &token)
            .await;

        assert!(
            orch.can_show_now().await,
            "ungated path must not mark the ledger"
        );
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_failed_show_does_not_mark_and_reloads() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                frequency: FrequencyPolicy {
                    cooldown: Duration::from_secs(3600),
                    min_screens_between: 0,
                },
                ..OrchestratorConfig::default()
            },
        );
        let token = CancellationToken::new();

        load_ready(&orch, &token, 1).await;
        assert!(orch.maybe_show_interstitial().await.is_requested());

        orch.handle_sdk_event(
            inter_event(SdkEventKind::FailedToShow {
                reason: "surface gone".into(),
            }),
            &token,
        )
        .await;

        assert!(orch.can_show_now().await, "failed show must not mark");
        assert_eq!(sdk.load_count(), 2, "failed show triggers reload");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_consent_change_applies_to_next_load() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, no_cooldown());
        let token = CancellationToken::new();

        load_ready(&orch, &token, 1).await;
        orch.maybe_show_interstitial().await;

        // Consent withdrawn while the ad is on screen: the in-flight
        // instance is unaffected, the prefetch after dismissal is not.
        gates.personalized.store(false, Ordering::SeqCst);
        orch.handle_sdk_event(inter_event(SdkEventKind::Shown), &token)
            .await;
        orch.handle_sdk_event(inter_event(SdkEventKind::Dismissed), &token)
            .await;

        let loads = sdk.calls_of(SdkCall::is_load);
        assert_eq!(loads.len(), 2);
        match (&loads[0], &loads[1]) {
            (SdkCall::Load { request: first, .. }, SdkCall::Load { request: second, .. }) => {
                assert!(first.personalized);
                assert!(!second.personalized);
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_failed_load_schedules_delayed_reload() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                reload: ReloadPolicy {
                    first: Duration::from_secs(5),
                    max: Duration::from_secs(60),
                    factor: 2.0,
                    jitter: JitterPolicy::None,
                    max_attempts: 4,
                },
                ..no_cooldown()
            },
        );
        let token = CancellationToken::new();

        orch.load_interstitial().await;
        orch.handle_sdk_event(
            inter_event(SdkEventKind::FailedToLoad {
                reason: "no fill".into(),
            }),
            &token,
        )
        .await;
        assert_eq!(sdk.load_count(), 1);

        // Paused clock: sleeping past the backoff lets the sleeper fire.
        tokio::time::sleep(Duration::from_secs(6)).await;
        assert_eq!(sdk.load_count(), 2);
        assert!(matches!(
            orch.interstitial_status().await,
            SlotStatus::Loading { .. }
        ));
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_cancellation_abandons_delayed_reload() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, no_cooldown());
        let token = CancellationToken::new();

        orch.load_interstitial().await;
        orch.handle_sdk_event(
            inter_event(SdkEventKind::FailedToLoad {
                reason: "no fill".into(),
            }),
            &token,
        )
        .await;

        token.cancel();
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(sdk.load_count(), 1, "cancelled sleeper must not reload");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_exhausted_reload_leaves_slot_empty() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                reload: ReloadPolicy {
                    max_attempts: 0,
                    ..ReloadPolicy::default()
                },
                ..no_cooldown()
            },
        );
        let token = CancellationToken::new();
        let mut bus_rx = orch.bus.subscribe();

        orch.load_interstitial().await;
        orch.handle_sdk_event(
            inter_event(SdkEventKind::FailedToLoad {
                reason: "no fill".into(),
            }),
            &token,
        )
        .await;

        assert_eq!(sdk.load_count(), 1);
        assert_eq!(orch.interstitial_status().await, SlotStatus::Empty);

        let mut saw_exhausted = false;
        while let Ok(ev) = bus_rx.try_recv() {
            saw_exhausted |= ev.kind == EventKind::ReloadExhausted;
        }
        assert!(saw_exhausted);

        // A later explicit load starts over.
        assert!(orch.load_interstitial().await);
        assert_eq!(sdk.load_count(), 2);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_screen_count_condition() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(
            &gates,
            &sdk,
            OrchestratorConfig {
                frequency: FrequencyPolicy {
                    cooldown: Duration::ZERO,
                    min_screens_between: 2,
                },
                ..OrchestratorConfig::default()
            },
        );
        let token = CancellationToken::new();

        load_ready(&orch, &token, 1).await;
        assert!(orch.maybe_show_interstitial().await.is_requested());
        orch.handle_sdk_event(inter_event(SdkEventKind::Shown), &token)
            .await;

        assert!(!orch.can_show_now().await);
        orch.note_screen_view().await;
        assert!(!orch.can_show_now().await);
        orch.note_screen_view().await;
        assert!(orch.can_show_now().await);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_rewarded_hook_via_event_loop() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, no_cooldown());
        let token = CancellationToken::new();

        orch.load_rewarded().await;
        orch.handle_sdk_event(
            SdkEvent::new(
                AdFormat::Rewarded,
                SdkEventKind::Loaded(AdInstance {
                    id: 5,
                    format: AdFormat::Rewarded,
                }),
            ),
            &token,
        )
        .await;
        assert!(orch.is_rewarded_ready().await);

        let earned = Arc::new(AtomicU32::new(0));
        let earned_in_hook = earned.clone();
        let attempt = orch
            .show_rewarded(move |reward| {
                earned_in_hook.fetch_add(reward.amount, Ordering::SeqCst);
            })
            .await;
        assert!(attempt.is_requested());

        orch.handle_sdk_event(
            SdkEvent::new(AdFormat::Rewarded, SdkEventKind::Shown),
            &token,
        )
        .await;
        orch.handle_sdk_event(
            SdkEvent::new(
                AdFormat::Rewarded,
                SdkEventKind::RewardEarned(Reward {
                    amount: 25,
                    kind: "coins".into(),
                }),
            ),
            &token,
        )
        .await;
        assert_eq!(earned.load(Ordering::SeqCst), 25);

        orch.handle_sdk_event(
            SdkEvent::new(AdFormat::Rewarded, SdkEventKind::Dismissed),
            &token,
        )
        .await;
        assert_eq!(sdk.load_count(), 2, "rewarded slot prefetches too");
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_initialize_is_call_once() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert!(orch.initialize().await.is_ok());
        assert!(sdk.initialized.load(Ordering::SeqCst));
        assert!(matches!(
            orch.initialize().await,
            Err(AdError::AlreadyInitialized)
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_initialize_is_noop_on_unsupported_platform() {
        let gates = FixedGates::arc();
        gates.ad_capable.store(false, Ordering::SeqCst);
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert!(orch.initialize().await.is_ok());
        assert!(!sdk.initialized.load(Ordering::SeqCst));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_initialize_propagates_sdk_failure() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::failing_init());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert!(matches!(
            orch.initialize().await,
            Err(AdError::InitFailed { .. })
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_banner_plumbing() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, OrchestratorConfig::default());

        assert_eq!(orch.banner_unit_id(), "test-banner");
        assert!(orch.current_request().personalized);
        gates.personalized.store(false, Ordering::SeqCst);
        assert!(!orch.current_request().personalized);
    }

    #[tokio::test(flavor = "current_thread", start_paused = true)]
    async fn test_event_loop_end_to_end() {
        let gates = FixedGates::arc();
        let sdk = Arc::new(RecordingSdk::default());
        let orch = orchestrator(&gates, &sdk, no_cooldown());
        let token = CancellationToken::new();
        orch.run(token.clone());

        orch.load_interstitial().await;
        let sender = orch.callback_sender();
        assert!(
            sender
                .send(inter_event(SdkEventKind::Loaded(inter_instance(1))))
                .await
        );

        // Let the loop drain the callback queue.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(orch.is_interstitial_ready().await);

        token.cancel();
    }
}
