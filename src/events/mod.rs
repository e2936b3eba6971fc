//! Diagnostic events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish/subscribe to diagnostic events emitted by the slot controllers and
//! the orchestrator's gating paths.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `AdUnitController` (slot lifecycle), `AdOrchestrator`
//!   (gating and reload scheduling), `SubscriberSet` workers (overflow/panic).
//! - **Consumer**: the orchestrator's event loop, which fans out to
//!   [`SubscriberSet`](crate::subscribers::SubscriberSet).

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind};
