//! World-state error types.
//!
//! These cover collaborator misuse: naming a plan or actor that does not
//! exist, or asking for a transition from the wrong set. Scheduler invariant
//! violations are not errors; they panic.

use overmind_plan::PlanId;

use crate::actor::ActorId;
use crate::state::PlanSet;

/// Errors returned by collaborator-facing [`WorldState`](crate::WorldState) operations.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// No set holds a plan with this ID.
    #[error("unknown plan: {0}")]
    UnknownPlan(PlanId),

    /// The plan exists but is in a different set than the operation needs.
    #[error("{plan} is {actual}, expected {expected}")]
    WrongSet {
        plan: PlanId,
        expected: PlanSet,
        actual: PlanSet,
    },

    /// The plan is complete or impossible.
    #[error("{0} is already terminal")]
    Terminal(PlanId),

    /// Only building plans have a site.
    #[error("{0} is not a building plan")]
    NotABuilding(PlanId),

    /// The worker has already left for the site.
    #[error("{0} is already committed")]
    AlreadyCommitted(PlanId),

    /// No actor with this ID.
    #[error("unknown actor: {0}")]
    UnknownActor(ActorId),

    /// An actor with this ID is already tracked.
    #[error("duplicate actor: {0}")]
    DuplicateActor(ActorId),
}
