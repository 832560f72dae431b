//! The [`Plan`] entity and its lifecycle.
//!
//! A plan is one desired production action: train a unit, construct a
//! structure, research a tech, or research an upgrade. The action is carried
//! as a tagged [`PlanPayload`]; the [`PlanKind`] is derived from it, so a
//! kind/payload mismatch cannot be represented.
//!
//! ## Lifecycle
//!
//! ```text
//! Planned ──► Scheduled ──► Building ──┐
//!    │            │     └──► Morphing ─┴──► Complete
//!    │            │              │
//!    └────────────┴──────────────┴────────► Impossible
//! ```
//!
//! `Complete` and `Impossible` are terminal. Any other edge is a scheduler
//! bug and panics.

use serde::{Deserialize, Serialize};

use overmind_math::TilePosition;

use crate::catalog::{Price, TechType, UnitType, UpgradeType};
use crate::id::{Frame, PlanId};

/// The class of action a plan describes. Decides which actor class may
/// execute it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanKind {
    Unit,
    Building,
    Tech,
    Upgrade,
}

/// What a plan produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanPayload {
    /// Train or morph a unit.
    Unit(UnitType),
    /// Construct or morph a structure, optionally at a known site.
    Building {
        unit: UnitType,
        #[serde(default)]
        site: Option<TilePosition>,
    },
    /// Research a tech.
    Tech(TechType),
    /// Research an upgrade.
    Upgrade(UpgradeType),
}

impl PlanPayload {
    /// A unit payload.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is a structure.
    #[must_use]
    pub fn unit(unit: UnitType) -> Self {
        assert!(
            !unit.is_building(),
            "{unit} is a structure and needs a building plan"
        );
        Self::Unit(unit)
    }

    /// A structure payload without a site.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not a structure.
    #[must_use]
    pub fn building(unit: UnitType) -> Self {
        assert!(unit.is_building(), "{unit} is not a structure");
        Self::Building { unit, site: None }
    }

    /// A structure payload at a known site.
    ///
    /// # Panics
    ///
    /// Panics if `unit` is not a structure.
    #[must_use]
    pub fn building_at(unit: UnitType, site: TilePosition) -> Self {
        assert!(unit.is_building(), "{unit} is not a structure");
        Self::Building {
            unit,
            site: Some(site),
        }
    }

    /// A tech payload.
    #[must_use]
    pub fn tech(tech: TechType) -> Self {
        Self::Tech(tech)
    }

    /// An upgrade payload.
    #[must_use]
    pub fn upgrade(upgrade: UpgradeType) -> Self {
        Self::Upgrade(upgrade)
    }

    /// The kind this payload belongs to.
    #[must_use]
    pub fn kind(&self) -> PlanKind {
        match self {
            Self::Unit(_) => PlanKind::Unit,
            Self::Building { .. } => PlanKind::Building,
            Self::Tech(_) => PlanKind::Tech,
            Self::Upgrade(_) => PlanKind::Upgrade,
        }
    }

    /// The unit or structure type, for `Unit` and `Building` payloads.
    #[must_use]
    pub fn unit_type(&self) -> Option<UnitType> {
        match self {
            Self::Unit(unit) | Self::Building { unit, .. } => Some(*unit),
            Self::Tech(_) | Self::Upgrade(_) => None,
        }
    }

    /// The construction site, for `Building` payloads.
    #[must_use]
    pub fn site(&self) -> Option<TilePosition> {
        match self {
            Self::Building { site, .. } => *site,
            _ => None,
        }
    }

    /// Cost, from the catalog.
    #[must_use]
    pub fn price(&self) -> Price {
        match self {
            Self::Unit(unit) | Self::Building { unit, .. } => unit.price(),
            Self::Tech(tech) => tech.price(),
            Self::Upgrade(upgrade) => upgrade.price(),
        }
    }

    /// Returns `true` if the unit type matches the payload variant: units
    /// are not structures, buildings are.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        match self {
            Self::Unit(unit) => !unit.is_building(),
            Self::Building { unit, .. } => unit.is_building(),
            Self::Tech(_) | Self::Upgrade(_) => true,
        }
    }

    fn validate(&self) {
        assert!(self.is_well_formed(), "malformed payload: {self}");
    }
}

impl std::fmt::Display for PlanPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit(unit) => write!(f, "unit {unit}"),
            Self::Building {
                unit,
                site: Some(site),
            } => write!(f, "building {unit} at {site}"),
            Self::Building { unit, site: None } => write!(f, "building {unit}"),
            Self::Tech(tech) => write!(f, "tech {tech}"),
            Self::Upgrade(upgrade) => write!(f, "upgrade {upgrade}"),
        }
    }
}

/// Where a plan is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanState {
    /// Created by a producer, not yet queued.
    Planned,
    /// Waiting for an actor.
    Scheduled,
    /// Bound to a worker or trainer that constructs it.
    Building,
    /// Bound to a living actor that transforms into it.
    Morphing,
    /// Finished.
    Complete,
    /// Invalidated by world conditions.
    Impossible,
}

impl PlanState {
    /// Returns `true` for `Complete` and `Impossible`.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Complete | Self::Impossible)
    }

    /// Returns `true` while an actor executes the plan.
    #[must_use]
    pub fn is_executing(self) -> bool {
        matches!(self, Self::Building | Self::Morphing)
    }

    /// Returns `true` if `self → next` is a legal lifecycle edge.
    #[must_use]
    pub fn can_transition_to(self, next: PlanState) -> bool {
        use PlanState::*;
        match (self, next) {
            (Planned, Scheduled) => true,
            (Scheduled, Building | Morphing) => true,
            (Building | Morphing, Complete) => true,
            (from, Impossible) => !from.is_terminal(),
            _ => false,
        }
    }
}

/// A producer's request for a new plan.
///
/// Deserialisable so build orders can be scripted in data files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// What to produce.
    pub payload: PlanPayload,
    /// Urgency; lower sorts first. Defaults to the submission frame.
    #[serde(default)]
    pub priority: Option<i32>,
    /// Hold back lower-priority plans while this one waits for an actor.
    #[serde(default)]
    pub blocking: bool,
    /// Frame at which the actor should begin acting, if the producer knows.
    #[serde(default)]
    pub ready_at: Option<Frame>,
}

impl PlanRequest {
    /// Request a plan for `payload` with default priority.
    #[must_use]
    pub fn new(payload: PlanPayload) -> Self {
        Self {
            payload,
            priority: None,
            blocking: false,
            ready_at: None,
        }
    }

    /// Override the priority.
    #[must_use]
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Mark the plan as blocking.
    #[must_use]
    pub fn blocking(mut self) -> Self {
        self.blocking = true;
        self
    }

    /// Set the predicted-ready frame.
    #[must_use]
    pub fn with_ready_at(mut self, frame: Frame) -> Self {
        self.ready_at = Some(frame);
        self
    }
}

/// One desired production action.
///
/// Equality and hashing use the [`PlanId`] only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    id: PlanId,
    payload: PlanPayload,
    priority: i32,
    state: PlanState,
    blocking: bool,
    created_at: Frame,
    retries: u32,
    last_attempt: Option<Frame>,
    ready_at: Option<Frame>,
    committed_at: Option<Frame>,
}

impl Plan {
    /// Create a plan from a producer request, in the `Planned` state.
    ///
    /// # Panics
    ///
    /// Panics if the payload names the wrong class of unit type.
    #[must_use]
    pub fn new(id: PlanId, request: PlanRequest, frame: Frame) -> Self {
        request.payload.validate();
        Self {
            id,
            payload: request.payload,
            priority: request
                .priority
                .unwrap_or_else(|| i32::try_from(frame).unwrap_or(i32::MAX)),
            state: PlanState::Planned,
            blocking: request.blocking,
            created_at: frame,
            retries: 0,
            last_attempt: None,
            ready_at: request.ready_at,
            committed_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> PlanId {
        self.id
    }

    #[must_use]
    pub fn payload(&self) -> &PlanPayload {
        &self.payload
    }

    #[must_use]
    pub fn kind(&self) -> PlanKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    #[must_use]
    pub fn state(&self) -> PlanState {
        self.state
    }

    #[must_use]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    #[must_use]
    pub fn created_at(&self) -> Frame {
        self.created_at
    }

    /// Number of frames on which assignment was attempted and failed.
    #[must_use]
    pub fn retries(&self) -> u32 {
        self.retries
    }

    #[must_use]
    pub fn ready_at(&self) -> Option<Frame> {
        self.ready_at
    }

    /// Frame at which the actor was sent to act, once committed.
    #[must_use]
    pub fn committed_at(&self) -> Option<Frame> {
        self.committed_at
    }

    /// Cost, derived from the payload.
    #[must_use]
    pub fn price(&self) -> Price {
        self.payload.price()
    }

    /// Move to `next`.
    ///
    /// # Panics
    ///
    /// Panics on an illegal lifecycle edge.
    pub fn transition(&mut self, next: PlanState) {
        assert!(
            self.state.can_transition_to(next),
            "{}: illegal transition {:?} -> {:?}",
            self.id,
            self.state,
            next
        );
        self.state = next;
    }

    /// Record a failed assignment attempt. Counts at most once per frame.
    ///
    /// Returns `true` if the retry counter moved.
    pub fn note_attempt(&mut self, frame: Frame) -> bool {
        if self.last_attempt == Some(frame) {
            return false;
        }
        self.last_attempt = Some(frame);
        self.retries += 1;
        true
    }

    /// Record the frame the actor was sent to act.
    pub fn mark_committed(&mut self, frame: Frame) {
        self.committed_at = Some(frame);
    }

    /// Set or replace the predicted-ready frame.
    pub fn set_ready_at(&mut self, frame: Option<Frame>) {
        self.ready_at = frame;
    }

    /// Set or replace the construction site.
    ///
    /// # Panics
    ///
    /// Panics if this is not a building plan.
    pub fn set_site(&mut self, tile: TilePosition) {
        match &mut self.payload {
            PlanPayload::Building { site, .. } => *site = Some(tile),
            other => panic!("{}: cannot place a {} plan", self.id, other),
        }
    }
}

impl AsRef<Plan> for Plan {
    fn as_ref(&self) -> &Plan {
        self
    }
}

impl PartialEq for Plan {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Plan {}

impl std::hash::Hash for Plan {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
