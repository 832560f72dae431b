//! # overmind_plan
//!
//! The unit of work the production scheduler moves around: a [`Plan`].
//!
//! This crate provides:
//!
//! - [`Plan`]: one desired action, with its lifecycle [`PlanState`].
//! - [`PlanPayload`] / [`PlanKind`]: what the plan produces.
//! - [`PlanRequest`]: what a producer submits.
//! - [`PlanId`] / [`PlanIdAllocator`]: opaque, never-reused identity.
//! - [`catalog`]: unit, tech and upgrade types with their price tables.
//! - [`ordering`]: the priority ordering used for assignment.

pub mod catalog;
pub mod id;
pub mod ordering;
pub mod plan;

pub use catalog::{Price, Race, TechType, UnitType, UpgradeType};
pub use id::{Frame, PlanId, PlanIdAllocator};
pub use ordering::sort_plans;
pub use plan::{Plan, PlanKind, PlanPayload, PlanRequest, PlanState};
