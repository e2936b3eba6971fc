//! # Event subscribers for the advisor runtime.
//!
//! This module provides the [`Subscribe`] trait and the fan-out machinery for
//! handling diagnostic events broadcast through the
//! [`Bus`](crate::events::Bus).
//!
//! ## Architecture
//! ```text
//! Event flow:
//!   controllers/orchestrator ── publish(Event) ──► Bus
//!                                                   │
//!                                 orchestrator event loop
//!                                                   │
//!                                            SubscriberSet
//!                                     ┌─────────────┼─────────────┐
//!                                     ▼             ▼             ▼
//!                                 LogWriter      Metrics       Custom ...
//! ```
//!
//! ## Implementing custom subscribers
//! ```rust
//! use advisor::{Event, EventKind, Subscribe};
//! use async_trait::async_trait;
//!
//! struct FillRateMeter;
//!
//! #[async_trait]
//! impl Subscribe for FillRateMeter {
//!     async fn on_event(&self, event: &Event) {
//!         match event.kind {
//!             EventKind::Loaded => { /* increment fill counter */ }
//!             EventKind::LoadFailed => { /* increment no-fill counter */ }
//!             _ => {}
//!         }
//!     }
//!     fn name(&self) -> &'static str { "fill-rate" }
//! }
//! ```

mod set;
mod subscribe;

pub use set::SubscriberSet;
pub use subscribe::Subscribe;

#[cfg(feature = "logging")]
mod log;
#[cfg(feature = "logging")]
pub use log::LogWriter;
