//! # Diagnostic events emitted by the orchestrator and slot controllers.
//!
//! The [`EventKind`] enum classifies event types across three categories:
//! - **Slot lifecycle events**: load/show flow of a single ad slot
//!   (requested, loaded, failed, shown, dismissed, reward earned)
//! - **Policy events**: gating decisions and reload scheduling
//! - **Subscriber events**: fan-out health (overflow, panic)
//!
//! The [`Event`] struct carries additional metadata such as timestamps, the
//! ad format, skip/failure reasons, and reload delays.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases
//! monotonically. Use `seq` to restore the exact order when events are
//! delivered out of order.
//!
//! ## Example
//! ```rust
//! use advisor::{AdFormat, Event, EventKind};
//!
//! let ev = Event::new(EventKind::LoadFailed)
//!     .with_format(AdFormat::Interstitial)
//!     .with_reason("no fill")
//!     .with_attempt(2);
//!
//! assert_eq!(ev.kind, EventKind::LoadFailed);
//! assert_eq!(ev.format, Some(AdFormat::Interstitial));
//! assert_eq!(ev.reason.as_deref(), Some("no fill"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

use crate::sdk::AdFormat;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of diagnostic events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    // === Slot lifecycle events ===
    /// A load request was handed to the SDK; the slot entered Loading.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    LoadRequested,

    /// The SDK delivered a loaded ad instance; the slot is Ready.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Loaded,

    /// The SDK reported a load failure; the slot is Empty again.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `reason`: SDK failure message
    /// - `attempt`: consecutive failed-load count (1-based)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    LoadFailed,

    /// A show command was handed to the SDK; readiness was consumed.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShowRequested,

    /// The SDK confirmed the ad occupies the screen.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Shown,

    /// The user dismissed the ad; the instance was released.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    Dismissed,

    /// The SDK failed to present an ad that was ready.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `reason`: SDK failure message
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShowFailed,

    /// The user completed the rewarded interaction.
    ///
    /// Sets:
    /// - `format`: ad format (always `Rewarded`)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    RewardEarned,

    // === Policy events ===
    /// A show entry point declined to issue a show command.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `reason`: skip label (`cooldown_active`, `premium_exempt`, ...)
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ShowSkipped,

    /// A delayed reload was scheduled after a failed load.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `delay_ms`: delay before the reload (ms)
    /// - `attempt`: consecutive failed-load count
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ReloadScheduled,

    /// The reload policy gave up on a slot; it stays Empty until the next
    /// explicit load.
    ///
    /// Sets:
    /// - `format`: ad format
    /// - `attempt`: consecutive failed-load count
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    ReloadExhausted,

    // === Subscriber events ===
    /// Subscriber dropped an event (queue full or worker closed).
    ///
    /// Sets:
    /// - `reason`: subscriber name and reason string (e.g., "full", "closed")
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberOverflow,

    /// Subscriber panicked during event processing.
    ///
    /// Sets:
    /// - `reason`: subscriber name and panic info
    /// - `at`: wall-clock timestamp
    /// - `seq`: global sequence
    SubscriberPanicked,
}

/// Diagnostic event with optional metadata.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp (for logs)
/// - other optional fields are set depending on the [`EventKind`]
#[derive(Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    /// Ad format this event concerns, if applicable.
    pub format: Option<AdFormat>,
    /// Human-readable reason (SDK errors, skip labels, overflow details).
    pub reason: Option<Arc<str>>,
    /// Reload delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Consecutive failed-load count (starting from 1).
    pub attempt: Option<u32>,
    /// Event classification.
    pub kind: EventKind,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next
    /// sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            kind,
            at: SystemTime::now(),
            format: None,
            reason: None,
            delay_ms: None,
            attempt: None,
        }
    }

    /// Attaches the ad format.
    #[inline]
    pub fn with_format(mut self, format: AdFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a reload delay (stored as milliseconds).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    /// Attaches a consecutive failed-load count.
    #[inline]
    pub fn with_attempt(mut self, n: u32) -> Self {
        self.attempt = Some(n);
        self
    }

    /// Creates a subscriber overflow event.
    #[inline]
    pub fn subscriber_overflow(subscriber: &'static str, reason: &'static str) -> Self {
        Event::new(EventKind::SubscriberOverflow)
            .with_reason(format!("subscriber={subscriber} reason={reason}"))
    }

    /// Creates a subscriber panic event.
    #[inline]
    pub fn subscriber_panicked(subscriber: &'static str, info: String) -> Self {
        Event::new(EventKind::SubscriberPanicked)
            .with_reason(format!("subscriber={subscriber} panic={info}"))
    }

    #[inline]
    pub fn is_subscriber_overflow(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberOverflow)
    }

    #[inline]
    pub fn is_subscriber_panic(&self) -> bool {
        matches!(self.kind, EventKind::SubscriberPanicked)
    }
}
