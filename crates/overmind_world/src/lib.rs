//! # overmind_world
//!
//! The shared state the production scheduler works on.
//!
//! This crate provides:
//!
//! - [`WorldState`]: plan sets, actor bindings, actor table, directive
//!   outbox and economy snapshot, passed explicitly into each scheduler pass.
//! - [`Actor`] / [`ActorId`] / [`ActorRole`]: the units that execute plans.
//! - [`Directive`]: instructions for the unit-command layer.
//! - [`Economy`]: bank and income, for readiness prediction.
//! - [`WorldError`]: collaborator misuse errors.

pub mod actor;
pub mod directive;
pub mod economy;
pub mod error;
pub mod state;

pub use actor::{Actor, ActorId, ActorRole};
pub use directive::Directive;
pub use economy::Economy;
pub use error::WorldError;
pub use state::{PlanSet, WorldState};
