//! # The ad SDK capability boundary.
//!
//! advisor never talks to an ad network directly. It consumes a small
//! capability set — load, show, dispose — through the [`AdSdk`] trait, and
//! receives outcomes as [`SdkEvent`]s pushed by the binding through the
//! sender obtained from
//! [`AdOrchestrator::callback_sender`](crate::AdOrchestrator::callback_sender).
//!
//! ## Contract
//! - [`AdSdk::load`] and [`AdSdk::show`] are fire-and-forget: they request
//!   work and return; the binding later delivers `Loaded`/`FailedToLoad`
//!   (resp. `Shown`/`Dismissed`/`FailedToShow`/`RewardEarned`) events.
//! - Every event must carry the format of the slot it concerns; the
//!   orchestrator routes on it.
//! - A binding whose SDK can hang silently on a load should synthesize a
//!   [`SdkEventKind::FailedToLoad`] itself — advisor schedules bounded
//!   reloads only for failures it is told about.
//!
//! ## Example (skeleton)
//! ```rust
//! use advisor::{AdFormat, AdInstance, AdRequest, AdSdk, AdError, RequestConfiguration};
//! use async_trait::async_trait;
//!
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
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::AdError;

/// Ad formats advisor knows about.
///
/// Only the full-screen formats get a slot controller; `Banner` exists so
/// unit-ID plumbing and request derivation cover caller-built banner slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdFormat {
    /// Inline banner; rendered and owned by the caller.
    Banner,
    /// Full-screen interstitial.
    Interstitial,
    /// Full-screen rewarded ad.
    Rewarded,
}

impl AdFormat {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            AdFormat::Banner => "banner",
            AdFormat::Interstitial => "interstitial",
            AdFormat::Rewarded => "rewarded",
        }
    }
}

/// Opaque handle to a loaded ad instance, issued by the SDK binding.
///
/// advisor only routes it back into [`AdSdk::show`] and [`AdSdk::dispose`];
/// the binding maps `id` to whatever native object it holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdInstance {
    /// Binding-assigned identifier of the native ad object.
    pub id: u64,
    /// Format this instance was loaded for.
    pub format: AdFormat,
}

/// Parameters for a single ad request.
///
/// Derived from [`ConsentGate`](crate::ConsentGate) each time a load is
/// issued — never cached, so a consent change takes effect on the next load.
/// When `personalized` is `false`, the binding is expected to request
/// non-personalized delivery (e.g. `npa=1`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdRequest {
    /// Whether the request may use personal data for targeting.
    pub personalized: bool,
}

/// Reward granted when the user completes a rewarded interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reward {
    /// Reward quantity as reported by the SDK.
    pub amount: u32,
    /// Reward type label as reported by the SDK.
    pub kind: String,
}

/// Process-wide SDK configuration applied at initialization.
#[derive(Debug, Clone, Default)]
pub struct RequestConfiguration {
    /// Device IDs that should always receive test ads.
    pub test_device_ids: Vec<String>,
}

/// Callback payload variants delivered by the SDK binding.
///
/// The tagged union the slot state machine consumes; each variant maps to one
/// native SDK callback.
#[derive(Debug, Clone)]
pub enum SdkEventKind {
    /// An ad finished loading; the instance is now owned by the slot.
    Loaded(AdInstance),
    /// A load request failed. Non-fatal; the slot returns to Empty.
    FailedToLoad {
        /// SDK-reported failure message.
        reason: Arc<str>,
    },
    /// The ad is occupying the screen.
    Shown,
    /// The user closed the ad.
    Dismissed,
    /// The SDK could not present an ad that was ready. Non-fatal.
    FailedToShow {
        /// SDK-reported failure message.
        reason: Arc<str>,
    },
    /// The user completed the rewarded interaction.
    ///
    /// Distinct from dismissal: dismissal follows regardless of whether the
    /// reward fired.
    RewardEarned(Reward),
}

/// A callback from the SDK binding, routed to the owning slot by format.
#[derive(Debug, Clone)]
pub struct SdkEvent {
    /// Which slot this callback concerns.
    pub format: AdFormat,
    /// What happened.
    pub kind: SdkEventKind,
}

impl SdkEvent {
    /// Creates a new SDK event for the given slot.
    pub fn new(format: AdFormat, kind: SdkEventKind) -> Self {
        Self { format, kind }
    }
}

/// Cloneable sender the SDK binding uses to deliver callbacks.
///
/// Obtained from
/// [`AdOrchestrator::callback_sender`](crate::AdOrchestrator::callback_sender).
#[derive(Clone)]
pub struct SdkEventSender {
    pub(crate) tx: mpsc::Sender<SdkEvent>,
}

impl SdkEventSender {
    /// Delivers a callback to the orchestrator's event loop.
    ///
    /// Waits if the callback queue is momentarily full; returns `false` if
    /// the orchestrator has shut down and the event was dropped.
    pub async fn send(&self, event: SdkEvent) -> bool {
        self.tx.send(event).await.is_ok()
    }

    /// Non-blocking variant of [`send`](Self::send); drops the event when the
    /// queue is full or closed and returns `false`.
    pub fn try_send(&self, event: SdkEvent) -> bool {
        self.tx.try_send(event).is_ok()
    }
}

/// Capability set advisor consumes from the ad network integration.
///
/// Implementations wrap the native SDK (or a test double). All methods are
/// invoked from the orchestrator; `load`/`show` must not block on network
/// completion — outcomes arrive later as [`SdkEvent`]s.
#[async_trait]
pub trait AdSdk: Send + Sync + 'static {
    /// One-time process-wide SDK bootstrap.
    ///
    /// Failure here is the only condition advisor propagates to the caller.
    async fn initialize(&self, config: RequestConfiguration) -> Result<(), AdError>;

    /// Requests a load for the given slot. Fire-and-forget; the binding later
    /// delivers `Loaded` or `FailedToLoad` for `format`.
    async fn load(&self, format: AdFormat, unit_id: &str, request: AdRequest);

    /// Requests presentation of a previously loaded instance. Fire-and-forget;
    /// the binding later delivers `Shown`/`Dismissed`/`FailedToShow` (and
    /// `RewardEarned` for rewarded ads).
    async fn show(&self, instance: AdInstance);

    /// Releases a native ad object. Called exactly once per owned instance,
    /// after its show completes or when a stray instance arrives.
    fn dispose(&self, instance: AdInstance);
}
