//! # overmind_scheduler
//!
//! The production scheduler. Once per game frame it binds prioritised
//! [plans](overmind_plan::Plan) to the actors that will execute them and
//! decides when a reserved worker should leave for its construction site.
//!
//! This crate provides:
//!
//! - [`ProductionScheduler`]: the four-phase per-frame pass.
//! - [`AdvanceReport`]: counters describing what a pass did.
//! - [`SchedulerConfig`]: tunables, loadable from JSON.
//! - [`MorphTable`]: data-driven routing for types made by morphing.
//! - [`ConfigError`]: configuration load and validation errors.

pub mod config;
pub mod error;
pub mod morph;
pub mod scheduler;

pub use config::{DEFAULT_TRAVEL_MARGIN, SchedulerConfig, load_json};
pub use error::ConfigError;
pub use morph::MorphTable;
pub use scheduler::{AdvanceReport, ProductionScheduler};
