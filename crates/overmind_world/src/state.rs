//! Shared world state for the production scheduler.
//!
//! [`WorldState`] is passed by `&mut` into every scheduler pass. It holds:
//!
//! - Five disjoint plan sets, one per lifecycle stage. A plan moves between
//!   sets and is never copied.
//! - The actor → plan bindings.
//! - The actor table, from which the candidate pools are read.
//! - The directive outbox for the unit-command layer.
//! - The latest economy snapshot.
//!
//! ## Mutation rights
//!
//! Producers and strategies use [`submit`](WorldState::submit),
//! [`draft`](WorldState::draft), [`schedule`](WorldState::schedule),
//! [`mark_impossible`](WorldState::mark_impossible),
//! [`complete`](WorldState::complete) and [`place`](WorldState::place).
//! Only the scheduler calls [`bind`](WorldState::bind) and
//! [`release`](WorldState::release), which move plans out of `scheduled`
//! and edit bindings.

use std::collections::BTreeMap;

use glam::Vec2;
use tracing::debug;

use overmind_math::TilePosition;
use overmind_plan::{Frame, Plan, PlanId, PlanIdAllocator, PlanKind, PlanRequest, PlanState, UnitType};

use crate::actor::{Actor, ActorId, ActorRole};
use crate::directive::Directive;
use crate::economy::Economy;
use crate::error::WorldError;

/// The five plan sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanSet {
    /// `Planned` plans not yet released to the scheduler.
    New,
    /// Waiting for an actor.
    Scheduled,
    /// Bound to an actor (`Building` or `Morphing`).
    Building,
    Complete,
    Impossible,
}

impl PlanSet {
    const ALL: [PlanSet; 5] = [
        PlanSet::New,
        PlanSet::Scheduled,
        PlanSet::Building,
        PlanSet::Complete,
        PlanSet::Impossible,
    ];

    /// Returns `true` for the sets that hold terminal plans.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, PlanSet::Complete | PlanSet::Impossible)
    }
}

impl std::fmt::Display for PlanSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PlanSet::New => "new",
            PlanSet::Scheduled => "scheduled",
            PlanSet::Building => "building",
            PlanSet::Complete => "complete",
            PlanSet::Impossible => "impossible",
        };
        f.write_str(name)
    }
}

/// Plans, actors and bindings for one game.
#[derive(Debug, Default)]
pub struct WorldState {
    allocator: PlanIdAllocator,
    new: BTreeMap<PlanId, Plan>,
    scheduled: BTreeMap<PlanId, Plan>,
    building: BTreeMap<PlanId, Plan>,
    complete: BTreeMap<PlanId, Plan>,
    impossible: BTreeMap<PlanId, Plan>,
    /// At most one entry per actor, and at most one actor per plan.
    bindings: BTreeMap<ActorId, PlanId>,
    actors: BTreeMap<ActorId, Actor>,
    directives: Vec<Directive>,
    economy: Option<Economy>,
    /// Frame of each actor's most recent release.
    released: BTreeMap<ActorId, Frame>,
}

impl WorldState {
    /// Create an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, set: PlanSet) -> &BTreeMap<PlanId, Plan> {
        match set {
            PlanSet::New => &self.new,
            PlanSet::Scheduled => &self.scheduled,
            PlanSet::Building => &self.building,
            PlanSet::Complete => &self.complete,
            PlanSet::Impossible => &self.impossible,
        }
    }

    fn set_mut(&mut self, set: PlanSet) -> &mut BTreeMap<PlanId, Plan> {
        match set {
            PlanSet::New => &mut self.new,
            PlanSet::Scheduled => &mut self.scheduled,
            PlanSet::Building => &mut self.building,
            PlanSet::Complete => &mut self.complete,
            PlanSet::Impossible => &mut self.impossible,
        }
    }

    /// Remove a plan from a set the caller has already checked.
    fn take(&mut self, id: PlanId, from: PlanSet) -> Plan {
        self.set_mut(from)
            .remove(&id)
            .unwrap_or_else(|| panic!("{id} is not in the {from} set"))
    }

    fn expect_in(&self, id: PlanId, expected: PlanSet) -> Result<(), WorldError> {
        match self.locate(id) {
            None => Err(WorldError::UnknownPlan(id)),
            Some(actual) if actual == expected => Ok(()),
            Some(actual) => Err(WorldError::WrongSet {
                plan: id,
                expected,
                actual,
            }),
        }
    }

    fn locate_active(&self, id: PlanId) -> Result<PlanSet, WorldError> {
        let set = self.locate(id).ok_or(WorldError::UnknownPlan(id))?;
        if set.is_terminal() {
            return Err(WorldError::Terminal(id));
        }
        Ok(set)
    }

    // ── Producer operations ─────────────────────────────────────────────────

    /// Create a plan and queue it for assignment.
    pub fn submit(&mut self, request: PlanRequest, frame: Frame) -> PlanId {
        let id = self.allocator.allocate();
        let mut plan = Plan::new(id, request, frame);
        plan.transition(PlanState::Scheduled);
        debug!(
            plan = %id,
            payload = %plan.payload(),
            priority = plan.priority(),
            blocking = plan.is_blocking(),
            "plan scheduled"
        );
        self.scheduled.insert(id, plan);
        id
    }

    /// Create a plan in the `new` set without queueing it.
    pub fn draft(&mut self, request: PlanRequest, frame: Frame) -> PlanId {
        let id = self.allocator.allocate();
        let plan = Plan::new(id, request, frame);
        debug!(plan = %id, payload = %plan.payload(), "plan drafted");
        self.new.insert(id, plan);
        id
    }

    /// Release a drafted plan to the scheduler.
    ///
    /// # Errors
    ///
    /// Fails unless the plan is in the `new` set.
    pub fn schedule(&mut self, id: PlanId) -> Result<(), WorldError> {
        self.expect_in(id, PlanSet::New)?;
        let mut plan = self.take(id, PlanSet::New);
        plan.transition(PlanState::Scheduled);
        self.scheduled.insert(id, plan);
        debug!(plan = %id, "plan scheduled");
        Ok(())
    }

    /// Invalidate a plan.
    ///
    /// The plan moves to the `impossible` set immediately. If an actor holds
    /// it, the binding stays until the scheduler's next pass releases it.
    ///
    /// # Errors
    ///
    /// Fails if the plan is unknown or already terminal.
    pub fn mark_impossible(&mut self, id: PlanId) -> Result<(), WorldError> {
        let set = self.locate_active(id)?;
        let mut plan = self.take(id, set);
        plan.transition(PlanState::Impossible);
        self.impossible.insert(id, plan);
        debug!(plan = %id, from = %set, "plan marked impossible");
        Ok(())
    }

    /// Record that a bound plan finished.
    ///
    /// The binding is cleared. The actor's role is left for the caller,
    /// which knows whether the actor still exists and what it does next.
    /// Returns the actor that held the plan.
    ///
    /// # Errors
    ///
    /// Fails unless the plan is in the `building` set.
    pub fn complete(&mut self, id: PlanId) -> Result<Option<ActorId>, WorldError> {
        self.expect_in(id, PlanSet::Building)?;
        let actor = self.actor_for(id);
        if let Some(actor) = actor {
            self.bindings.remove(&actor);
        }
        let mut plan = self.take(id, PlanSet::Building);
        plan.transition(PlanState::Complete);
        self.complete.insert(id, plan);
        debug!(plan = %id, ?actor, "plan complete");
        Ok(actor)
    }

    /// Set or move the construction site of a building plan.
    ///
    /// # Errors
    ///
    /// Fails if the plan is unknown, terminal, not a building plan, or its
    /// worker has already been sent.
    pub fn place(&mut self, id: PlanId, site: TilePosition) -> Result<(), WorldError> {
        let set = self.locate_active(id)?;
        let Some(plan) = self.set_mut(set).get_mut(&id) else {
            return Err(WorldError::UnknownPlan(id));
        };
        if plan.kind() != PlanKind::Building {
            return Err(WorldError::NotABuilding(id));
        }
        if plan.committed_at().is_some() {
            return Err(WorldError::AlreadyCommitted(id));
        }
        plan.set_site(site);
        debug!(plan = %id, %site, "plan placed");
        Ok(())
    }

    /// Set or clear the predicted-ready frame of an active plan.
    ///
    /// # Errors
    ///
    /// Fails if the plan is unknown or terminal.
    pub fn set_ready_at(&mut self, id: PlanId, frame: Option<Frame>) -> Result<(), WorldError> {
        let set = self.locate_active(id)?;
        if let Some(plan) = self.set_mut(set).get_mut(&id) {
            plan.set_ready_at(frame);
        }
        Ok(())
    }

    // ── Plan queries ────────────────────────────────────────────────────────

    /// Which set holds the plan.
    #[must_use]
    pub fn locate(&self, id: PlanId) -> Option<PlanSet> {
        PlanSet::ALL
            .into_iter()
            .find(|set| self.set(*set).contains_key(&id))
    }

    /// Look a plan up in any set.
    #[must_use]
    pub fn plan(&self, id: PlanId) -> Option<&Plan> {
        self.locate(id).and_then(|set| self.set(set).get(&id))
    }

    #[must_use]
    pub fn new_plans(&self) -> &BTreeMap<PlanId, Plan> {
        &self.new
    }

    #[must_use]
    pub fn scheduled(&self) -> &BTreeMap<PlanId, Plan> {
        &self.scheduled
    }

    /// Plans bound to an actor, in `Building` or `Morphing`.
    #[must_use]
    pub fn building(&self) -> &BTreeMap<PlanId, Plan> {
        &self.building
    }

    #[must_use]
    pub fn complete_plans(&self) -> &BTreeMap<PlanId, Plan> {
        &self.complete
    }

    #[must_use]
    pub fn impossible(&self) -> &BTreeMap<PlanId, Plan> {
        &self.impossible
    }

    /// Returns `true` if the plan is in `new`, `scheduled` or `building`.
    #[must_use]
    pub fn is_active(&self, id: PlanId) -> bool {
        self.locate(id).is_some_and(|set| !set.is_terminal())
    }

    // ── Actors ──────────────────────────────────────────────────────────────

    /// Start tracking an actor.
    ///
    /// # Errors
    ///
    /// Fails if the ID is already tracked.
    pub fn insert_actor(&mut self, actor: Actor) -> Result<(), WorldError> {
        if self.actors.contains_key(&actor.id) {
            return Err(WorldError::DuplicateActor(actor.id));
        }
        self.actors.insert(actor.id, actor);
        Ok(())
    }

    /// Stop tracking an actor (it died or morphed away).
    ///
    /// A plan the actor held loses its executor and is marked impossible;
    /// its producer decides whether to re-issue it. Returns that plan.
    ///
    /// # Errors
    ///
    /// Fails if the actor is unknown.
    pub fn remove_actor(&mut self, id: ActorId) -> Result<Option<PlanId>, WorldError> {
        if self.actors.remove(&id).is_none() {
            return Err(WorldError::UnknownActor(id));
        }
        self.released.remove(&id);
        let Some(plan) = self.bindings.remove(&id) else {
            return Ok(None);
        };
        if self.is_active(plan) {
            self.mark_impossible(plan)?;
        }
        debug!(actor = %id, %plan, "bound actor removed");
        Ok(Some(plan))
    }

    /// Change what an actor is doing.
    ///
    /// # Errors
    ///
    /// Fails if the actor is unknown.
    pub fn set_role(&mut self, id: ActorId, role: ActorRole) -> Result<(), WorldError> {
        self.actor_mut(id).ok_or(WorldError::UnknownActor(id))?.role = role;
        Ok(())
    }

    /// Update whether an actor holds a load.
    ///
    /// # Errors
    ///
    /// Fails if the actor is unknown.
    pub fn set_carrying(&mut self, id: ActorId, carrying: bool) -> Result<(), WorldError> {
        self.actor_mut(id).ok_or(WorldError::UnknownActor(id))?.carrying = carrying;
        Ok(())
    }

    /// Update an actor's position.
    ///
    /// # Errors
    ///
    /// Fails if the actor is unknown.
    pub fn move_actor(&mut self, id: ActorId, position: Vec2) -> Result<(), WorldError> {
        self.actor_mut(id).ok_or(WorldError::UnknownActor(id))?.position = position;
        Ok(())
    }

    #[must_use]
    pub fn actor(&self, id: ActorId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    // ── Candidate pools ─────────────────────────────────────────────────────

    fn unbound(&self) -> impl Iterator<Item = &Actor> {
        self.actors
            .values()
            .filter(|actor| !self.bindings.contains_key(&actor.id))
    }

    /// Idle larvae and unit-training structures.
    pub fn idle_spawners(&self) -> impl Iterator<Item = &Actor> {
        self.unbound()
            .filter(|a| a.unit_type.is_spawner() && a.role == ActorRole::Idle)
    }

    /// Idle workers.
    pub fn idle_workers(&self) -> impl Iterator<Item = &Actor> {
        self.unbound()
            .filter(|a| a.unit_type.is_worker() && a.role == ActorRole::Idle)
    }

    /// Workers harvesting minerals or gas.
    pub fn gathering_workers(&self) -> impl Iterator<Item = &Actor> {
        self.unbound()
            .filter(|a| a.unit_type.is_worker() && a.role.is_gathering())
    }

    /// Workers that may be pulled for construction right now.
    pub fn construction_candidates(&self) -> impl Iterator<Item = &Actor> {
        self.unbound().filter(|a| a.can_construct())
    }

    /// Idle, unbound actors of one type.
    pub fn idle_of_type(&self, unit_type: UnitType) -> impl Iterator<Item = &Actor> {
        self.unbound()
            .filter(move |a| a.unit_type == unit_type && a.role == ActorRole::Idle)
    }

    // ── Bindings ────────────────────────────────────────────────────────────

    #[must_use]
    pub fn bindings(&self) -> &BTreeMap<ActorId, PlanId> {
        &self.bindings
    }

    #[must_use]
    pub fn binding_of(&self, actor: ActorId) -> Option<PlanId> {
        self.bindings.get(&actor).copied()
    }

    #[must_use]
    pub fn is_bound(&self, actor: ActorId) -> bool {
        self.bindings.contains_key(&actor)
    }

    /// The actor holding a plan, if any.
    #[must_use]
    pub fn actor_for(&self, plan: PlanId) -> Option<ActorId> {
        self.bindings
            .iter()
            .find(|(_, bound)| **bound == plan)
            .map(|(actor, _)| *actor)
    }

    // ── Scheduler operations ────────────────────────────────────────────────

    /// Bind a scheduled plan to an actor, moving the plan to the `building`
    /// set in `state` and giving the actor `role`.
    ///
    /// # Panics
    ///
    /// Panics if the actor is unknown or already bound, the plan already has
    /// an actor, or the plan is not scheduled. Any of these means the
    /// scheduler's bookkeeping is corrupt.
    pub fn bind(&mut self, actor: ActorId, plan: PlanId, state: PlanState, role: ActorRole) {
        if let Some(held) = self.bindings.get(&actor) {
            panic!("{actor} is already bound to {held}, refusing {plan}");
        }
        if let Some(other) = self.actor_for(plan) {
            panic!("{plan} is already bound to {other}, refusing {actor}");
        }
        let Some(entry) = self.actors.get_mut(&actor) else {
            panic!("cannot bind unknown {actor} to {plan}");
        };
        entry.role = role;
        let mut bound = self.take(plan, PlanSet::Scheduled);
        bound.transition(state);
        self.building.insert(plan, bound);
        self.bindings.insert(actor, plan);
    }

    /// Remove an actor's binding and make it idle, recording `frame` as its
    /// release frame. Returns the plan it held.
    pub fn release(&mut self, actor: ActorId, frame: Frame) -> Option<PlanId> {
        let plan = self.bindings.remove(&actor)?;
        self.released.insert(actor, frame);
        if let Some(entry) = self.actors.get_mut(&actor) {
            entry.role = ActorRole::Idle;
        }
        Some(plan)
    }

    /// Returns `true` if the actor was released at `frame`. Such an actor
    /// is not offered to plans again until a later frame.
    #[must_use]
    pub fn released_at(&self, actor: ActorId, frame: Frame) -> bool {
        self.released.get(&actor) == Some(&frame)
    }

    pub fn scheduled_plan_mut(&mut self, id: PlanId) -> Option<&mut Plan> {
        self.scheduled.get_mut(&id)
    }

    pub fn building_plan_mut(&mut self, id: PlanId) -> Option<&mut Plan> {
        self.building.get_mut(&id)
    }

    /// Queue a directive for the unit-command layer.
    pub fn push_directive(&mut self, directive: Directive) {
        self.directives.push(directive);
    }

    /// Directives queued since the last drain.
    #[must_use]
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    /// Take all queued directives.
    pub fn drain_directives(&mut self) -> Vec<Directive> {
        std::mem::take(&mut self.directives)
    }

    // ── Economy ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn economy(&self) -> Option<&Economy> {
        self.economy.as_ref()
    }

    pub fn economy_mut(&mut self) -> Option<&mut Economy> {
        self.economy.as_mut()
    }

    /// Replace the economy snapshot.
    pub fn set_economy(&mut self, economy: Economy) {
        self.economy = Some(economy);
    }

    // ── Consistency ─────────────────────────────────────────────────────────

    /// Check the cross-set invariants.
    ///
    /// # Panics
    ///
    /// Panics if a plan sits in two sets, a plan's state disagrees with its
    /// set, a plan is bound to two actors, or a binding points at a plan that
    /// is neither executing nor awaiting release.
    pub fn assert_consistent(&self) {
        let mut seen = std::collections::BTreeSet::new();
        for set in PlanSet::ALL {
            for (id, plan) in self.set(set) {
                assert!(seen.insert(*id), "{id} appears in more than one set");
                let state_ok = match set {
                    PlanSet::New => plan.state() == PlanState::Planned,
                    PlanSet::Scheduled => plan.state() == PlanState::Scheduled,
                    PlanSet::Building => plan.state().is_executing(),
                    PlanSet::Complete => plan.state() == PlanState::Complete,
                    PlanSet::Impossible => plan.state() == PlanState::Impossible,
                };
                assert!(state_ok, "{id} is {:?} in the {set} set", plan.state());
            }
        }

        let mut bound_plans = std::collections::BTreeSet::new();
        for (actor, plan) in &self.bindings {
            assert!(bound_plans.insert(*plan), "{plan} is bound to more than one actor");
            assert!(
                self.building.contains_key(plan) || self.impossible.contains_key(plan),
                "{actor} is bound to {plan}, which is neither executing nor impossible"
            );
        }
    }
}
