//! Error and outcome types used by the advisor runtime.
//!
//! This module defines:
//!
//! - [`AdError`] — errors raised by the orchestration runtime itself.
//! - [`SkipReason`] — why a show attempt was deliberately skipped. A skipped
//!   show is **not** an error: it is the gating working as designed.
//! - [`ShowAttempt`] — the observable outcome of a show entry point.
//!
//! Load and show failures reported by the ad SDK never surface here: they are
//! absorbed at the controller boundary and visible only as diagnostic events.

use thiserror::Error;

/// # Errors produced by the advisor runtime.
///
/// These represent failures of the orchestration machinery itself, not of
/// individual ad loads or shows (those are absorbed and re-published as
/// events).
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum AdError {
    /// The underlying ad SDK failed to initialize.
    ///
    /// This is the only condition a caller may want to treat as fatal;
    /// everything downstream degrades to "no ads are shown".
    #[error("ad sdk initialization failed: {reason}")]
    InitFailed {
        /// The underlying error message reported by the SDK binding.
        reason: String,
    },

    /// [`AdOrchestrator::initialize`](crate::AdOrchestrator::initialize) was
    /// called more than once. Initialization is call-once by contract.
    #[error("ad sdk already initialized")]
    AlreadyInitialized,
}

impl AdError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use advisor::AdError;
    ///
    /// let err = AdError::AlreadyInitialized;
    /// assert_eq!(err.as_label(), "ad_already_initialized");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            AdError::InitFailed { .. } => "ad_init_failed",
            AdError::AlreadyInitialized => "ad_already_initialized",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            AdError::InitFailed { reason } => format!("init failed: {reason}"),
            AdError::AlreadyInitialized => "already initialized".to_string(),
        }
    }
}

/// # Why a show entry point declined to issue a show command.
///
/// Deliberate no-ops, reported for diagnostics. Callers observe only
/// "ad show requested" or "nothing happened"; this enum says which gate
/// produced the nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The platform has no ad support (e.g. web builds).
    PlatformUnsupported,
    /// The user is premium/entitled and exempt from ads.
    PremiumExempt,
    /// The frequency policy's cooldown (or screen count) has not elapsed.
    CooldownActive,
    /// No loaded ad instance is available in the slot.
    NotReady,
}

impl SkipReason {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use advisor::SkipReason;
    ///
    /// assert_eq!(SkipReason::CooldownActive.as_label(), "cooldown_active");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SkipReason::PlatformUnsupported => "platform_unsupported",
            SkipReason::PremiumExempt => "premium_exempt",
            SkipReason::CooldownActive => "cooldown_active",
            SkipReason::NotReady => "not_ready",
        }
    }
}

/// Outcome of a show entry point.
///
/// `Requested` means the show command was handed to the SDK; whether the ad
/// actually appeared is reported later through the event stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowAttempt {
    /// A show command was issued to the SDK.
    Requested,
    /// No show command was issued; the reason says which gate declined.
    Skipped(SkipReason),
}

impl ShowAttempt {
    /// Returns `true` if a show command was actually issued.
    #[inline]
    pub fn is_requested(&self) -> bool {
        matches!(self, ShowAttempt::Requested)
    }

    /// Returns the skip reason, if the attempt was skipped.
    #[inline]
    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            ShowAttempt::Requested => None,
            ShowAttempt::Skipped(reason) => Some(*reason),
        }
    }
}
