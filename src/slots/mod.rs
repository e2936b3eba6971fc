//! Full-screen ad slots: state machine and per-format controller.
//!
//! ## Contents
//! - [`SlotStatus`] resting states of a slot (empty/loading/ready/showing)
//! - `AdUnitController` (crate-internal) the per-format lifecycle owner;
//!   composed and serialized by [`AdOrchestrator`](crate::AdOrchestrator)

mod controller;
mod state;

pub use state::SlotStatus;

pub(crate) use controller::{AdUnitController, FollowUp, RewardHook};
