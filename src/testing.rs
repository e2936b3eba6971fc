//! Shared fakes for in-crate tests: a call-recording SDK and fixed gates.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::AdError;
use crate::gates::{AdUnitIdProvider, ConsentGate, EntitlementGate, PlatformInfo};
use crate::sdk::{AdFormat, AdInstance, AdRequest, AdSdk, RequestConfiguration};

/// One recorded SDK invocation.
#[derive(Debug, Clone)]
pub(crate) enum SdkCall {
    Load {
        format: AdFormat,
        unit_id: String,
        request: AdRequest,
    },
    Show {
        instance: AdInstance,
    },
    Dispose {
        instance: AdInstance,
    },
}

impl SdkCall {
    pub(crate) fn is_load(&self) -> bool {
        matches!(self, SdkCall::Load { .. })
    }

    pub(crate) fn is_show(&self) -> bool {
        matches!(self, SdkCall::Show { .. })
    }

    pub(crate) fn is_dispose(&self) -> bool {
        matches!(self, SdkCall::Dispose { .. })
    }
}

/// SDK fake that records every call and never completes anything on its own;
/// tests deliver outcomes as explicit `SdkEvent`s.
#[derive(Default)]
pub(crate) struct RecordingSdk {
    calls: Mutex<Vec<SdkCall>>,
    fail_init: bool,
    pub(crate) initialized: AtomicBool,
}

impl RecordingSdk {
    /// A fake whose `initialize` fails, for the fatal-path test.
    pub(crate) fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<SdkCall> {
        self.calls.lock().expect("sdk call log").clone()
    }

    pub(crate) fn calls_of(&self, pred: fn(&SdkCall) -> bool) -> Vec<SdkCall> {
        self.calls().into_iter().filter(pred).collect()
    }

    pub(crate) fn load_count(&self) -> usize {
        self.calls_of(SdkCall::is_load).len()
    }

    pub(crate) fn show_count(&self) -> usize {
        self.calls_of(SdkCall::is_show).len()
    }

    fn record(&self, call: SdkCall) {
        self.calls.lock().expect("sdk call log").push(call);
    }
}

#[async_trait]
impl AdSdk for RecordingSdk {
    async fn initialize(&self, _config: RequestConfiguration) -> Result<(), AdError> {
        if self.fail_init {
            return Err(AdError::InitFailed {
                reason: "forced by test".to_string(),
            });
        }
        self.initialized.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn load(&self, format: AdFormat, unit_id: &str, request: AdRequest) {
        self.record(SdkCall::Load {
            format,
            unit_id: unit_id.to_string(),
            request,
        });
    }

    async fn show(&self, instance: AdInstance) {
        self.record(SdkCall::Show { instance });
    }

    fn dispose(&self, instance: AdInstance) {
        self.record(SdkCall::Dispose { instance });
    }
}

/// Gate fake with runtime-flippable consent/premium/platform flags.
pub(crate) struct FixedGates {
    pub(crate) personalized: AtomicBool,
    pub(crate) premium: AtomicBool,
    pub(crate) ad_capable: AtomicBool,
}

impl Default for FixedGates {
    fn default() -> Self {
        Self {
            personalized: AtomicBool::new(true),
            premium: AtomicBool::new(false),
            ad_capable: AtomicBool::new(true),
        }
    }
}

impl FixedGates {
    pub(crate) fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

impl ConsentGate for FixedGates {
    fn is_personalized_allowed(&self) -> bool {
        self.personalized.load(Ordering::SeqCst)
    }
}

impl EntitlementGate for FixedGates {
    fn is_premium(&self) -> bool {
        self.premium.load(Ordering::SeqCst)
    }
}

impl PlatformInfo for FixedGates {
    fn is_ad_capable(&self) -> bool {
        self.ad_capable.load(Ordering::SeqCst)
    }
}

/// Static unit IDs for tests.
pub(crate) struct TestUnitIds;

impl AdUnitIdProvider for TestUnitIds {
    fn banner_id(&self) -> &str {
        "test-banner"
    }

    fn interstitial_id(&self) -> &str {
        "test-interstitial"
    }

    fn rewarded_id(&self) -> &str {
        "test-rewarded"
    }
}
