//! # External gates consulted before loading or showing ads.
//!
//! These traits are the seams to app state that advisor reads but does not
//! own: consent, subscription entitlement, platform capability, and ad-unit
//! identifiers. Implementations are expected to be cheap, synchronous reads
//! of already-cached state; the orchestrator consults them on every load and
//! show decision, never caching their answers.
//!
//! ## Example
//! ```rust
//! use advisor::{ConsentGate, EntitlementGate};
//!
//! struct AppState { consented: bool, premium: bool }
//!
//! impl ConsentGate for AppState {
//!     fn is_personalized_allowed(&self) -> bool { self.consented }
//! }
//! impl EntitlementGate for AppState {
//!     fn is_premium(&self) -> bool { self.premium }
//! }
//! ```

/// Consent state: whether ad requests may use personal data for targeting.
///
/// Consulted each time a load is issued; a consent change takes effect on the
/// next load, never retroactively on an in-flight request.
pub trait ConsentGate: Send + Sync + 'static {
    /// Returns `true` if the user consented to personalized ads.
    fn is_personalized_allowed(&self) -> bool;
}

/// Subscription/purchase state: whether the user is exempt from ads.
///
/// Premium exempts both loading and showing of full-screen ads.
pub trait EntitlementGate: Send + Sync + 'static {
    /// Returns `true` if the user is premium/ad-free.
    fn is_premium(&self) -> bool;
}

/// Platform capability: whether this build can run the ad SDK at all.
pub trait PlatformInfo: Send + Sync + 'static {
    /// Returns `true` if the platform supports ads (e.g. `false` on web).
    fn is_ad_capable(&self) -> bool;
}

/// Environment/build-specific ad unit identifiers.
///
/// Typically switches between test and production IDs per build flavor.
pub trait AdUnitIdProvider: Send + Sync + 'static {
    /// Unit ID for banner slots (callers build banners themselves; see
    /// [`AdOrchestrator::current_request`](crate::AdOrchestrator::current_request)).
    fn banner_id(&self) -> &str;

    /// Unit ID for the interstitial slot.
    fn interstitial_id(&self) -> &str;

    /// Unit ID for the rewarded slot.
    fn rewarded_id(&self) -> &str;
}
