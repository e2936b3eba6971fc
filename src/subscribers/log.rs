//! # LogWriter — simple event printer
//!
//! A minimal subscriber that prints incoming [`Event`]s to stdout.
//! Use it for test or demo.
//!
//! ## Example output
//! ```text
//! [load-requested] format="interstitial"
//! [load-failed] format="interstitial" reason="no fill" attempt=1
//! [reload-scheduled] format="interstitial" delay_ms=2000 attempt=1
//! [shown] format="interstitial"
//! [dismissed] format="interstitial"
//! [show-skipped] format="interstitial" reason="cooldown_active"
//! ```

use crate::events::{Event, EventKind};
use crate::subscribers::Subscribe;
use async_trait::async_trait;

/// Event writer subscriber.
#[derive(Default)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn format_label(e: &Event) -> &'static str {
    e.format.map(|f| f.as_label()).unwrap_or("-")
}

#[async_trait]
impl Subscribe for LogWriter {
    async fn on_event(&self, e: &Event) {
        match e.kind {
            EventKind::LoadRequested => {
                println!("[load-requested] format={:?}", format_label(e));
            }
            EventKind::Loaded => {
                println!("[loaded] format={:?}", format_label(e));
            }
            EventKind::LoadFailed => {
                println!(
                    "[load-failed] format={:?} reason={:?} attempt={:?}",
                    format_label(e),
                    e.reason,
                    e.attempt
                );
            }
            EventKind::ShowRequested => {
                println!("[show-requested] format={:?}", format_label(e));
            }
            EventKind::Shown => {
                println!("[shown] format={:?}", format_label(e));
            }
            EventKind::Dismissed => {
                println!("[dismissed] format={:?}", format_label(e));
            }
            EventKind::ShowFailed => {
                println!(
                    "[show-failed] format={:?} reason={:?}",
                    format_label(e),
                    e.reason
                );
            }
            EventKind::RewardEarned => {
                println!("[reward-earned] format={:?}", format_label(e));
            }
            EventKind::ShowSkipped => {
                println!(
                    "[show-skipped] format={:?} reason={:?}",
                    format_label(e),
                    e.reason
                );
            }
            EventKind::ReloadScheduled => {
                println!(
                    "[reload-scheduled] format={:?} delay_ms={:?} attempt={:?}",
                    format_label(e),
                    e.delay_ms,
                    e.attempt
                );
            }
            EventKind::ReloadExhausted => {
                println!(
                    "[reload-exhausted] format={:?} attempt={:?}",
                    format_label(e),
                    e.attempt
                );
            }
            EventKind::SubscriberOverflow => {
                println!("[subscriber-overflow] {:?}", e.reason);
            }
            EventKind::SubscriberPanicked => {
                println!(
                    "[subscriber-panicked] {}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
        }
    }

    fn name(&self) -> &'static str {
        "LogWriter"
    }
}
