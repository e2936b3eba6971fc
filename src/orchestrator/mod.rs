//! # Orchestration layer: configuration, assembly, and the runtime façade.
//!
//! - [`OrchestratorConfig`] — policies and channel capacities
//! - [`OrchestratorBuilder`] — wiring of SDK, gates, and subscribers
//! - [`AdOrchestrator`] — the façade the app calls

mod builder;
mod config;
mod core;

pub use builder::OrchestratorBuilder;
pub use config::OrchestratorConfig;
pub use core::AdOrchestrator;
