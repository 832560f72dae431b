//! Directives queued for the unit-command layer.
//!
//! The scheduler decides which actor does what and when. Turning that into
//! engine commands (move, build, train, morph, stop) is the unit-command
//! layer's job; it drains [`WorldState::drain_directives`](crate::WorldState::drain_directives)
//! once per frame.

use serde::{Deserialize, Serialize};

use overmind_math::TilePosition;
use overmind_plan::{PlanId, UnitType};

use crate::actor::ActorId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Directive {
    /// Send a worker to construct a structure at a site.
    Build {
        actor: ActorId,
        plan: PlanId,
        unit: UnitType,
        site: TilePosition,
    },
    /// Start training a unit.
    Train {
        actor: ActorId,
        plan: PlanId,
        unit: UnitType,
    },
    /// Transform an actor in place.
    Morph {
        actor: ActorId,
        plan: PlanId,
        into: UnitType,
    },
    /// Stop whatever the actor was doing for this plan.
    Abandon { actor: ActorId, plan: PlanId },
}

impl Directive {
    /// The actor the directive is addressed to.
    #[must_use]
    pub fn actor(&self) -> ActorId {
        match self {
            Self::Build { actor, .. }
            | Self::Train { actor, .. }
            | Self::Morph { actor, .. }
            | Self::Abandon { actor, .. } => *actor,
        }
    }

    /// The plan the directive serves.
    #[must_use]
    pub fn plan(&self) -> PlanId {
        match self {
            Self::Build { plan, .. }
            | Self::Train { plan, .. }
            | Self::Morph { plan, .. }
            | Self::Abandon { plan, .. } => *plan,
        }
    }
}
