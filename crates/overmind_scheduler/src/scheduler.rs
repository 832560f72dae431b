//! Production scheduler: binds plans to actors, frame by frame.
//!
//! [`ProductionScheduler::advance`] runs once per game frame and performs
//! four ordered phases against the [`WorldState`]:
//!
//! 1. **Assignment**: sort the scheduled plans by priority and bind each
//!    building plan to a construction-capable worker and each unit plan to
//!    a spawner (or, for morph routes, to a living actor of the source type).
//!    Tech and upgrade plans are left for the research collaborator.
//! 2. **Structure morph**: bind structure-morph plans (Hatchery → Lair) to
//!    an idle structure of the source type.
//! 3. **Commit**: for each reserved worker holding a placed building plan,
//!    work back from the plan's ready frame by the travel estimate and send
//!    the worker once that departure frame is reached.
//! 4. **Reclaim**: release every actor whose plan was marked impossible.
//!
//! Each phase sees the effects of the ones before it. Failing to find an
//! actor is ordinary backpressure: the plan stays scheduled and is retried
//! next frame.

use tracing::{debug, trace};

use overmind_math::{DistanceMetric, StraightLine, TilePosition, travel_frames};
use overmind_plan::{Frame, Plan, PlanId, PlanKind, PlanPayload, PlanState, UnitType, sort_plans};
use overmind_world::{Actor, ActorId, ActorRole, Directive, WorldState};

use crate::config::SchedulerConfig;
use crate::morph::MorphTable;

/// What one call to [`ProductionScheduler::advance`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    /// The frame that was processed.
    pub frame: Frame,
    /// Plans bound during assignment.
    pub assigned: usize,
    /// Of those, unit plans whose actor started immediately.
    pub started: usize,
    /// Structure morphs started.
    pub structure_morphs: usize,
    /// Workers sent to their construction site.
    pub committed: usize,
    /// Actors released from impossible plans.
    pub reclaimed: usize,
    /// Plans still scheduled after the pass.
    pub waiting: usize,
}

impl AdvanceReport {
    /// Returns `true` if the pass changed nothing.
    #[must_use]
    pub fn is_quiet(&self) -> bool {
        self.assigned == 0
            && self.structure_morphs == 0
            && self.committed == 0
            && self.reclaimed == 0
    }
}

/// How a unit plan is executed once an actor is found.
struct UnitRoute {
    actor: ActorId,
    state: PlanState,
    role: ActorRole,
    directive: Directive,
}

/// The per-frame production scheduler.
///
/// Holds only configuration; all game state lives in the [`WorldState`]
/// passed to [`advance`](Self::advance).
pub struct ProductionScheduler {
    config: SchedulerConfig,
    morphs: MorphTable,
    metric: Box<dyn DistanceMetric>,
}

impl ProductionScheduler {
    /// Create a scheduler that measures travel in straight lines.
    #[must_use]
    pub fn new(config: SchedulerConfig, morphs: MorphTable) -> Self {
        Self {
            config,
            morphs,
            metric: Box::new(StraightLine),
        }
    }

    /// Replace the distance metric (e.g. with a path-aware one).
    #[must_use]
    pub fn with_metric(mut self, metric: impl DistanceMetric + 'static) -> Self {
        self.metric = Box::new(metric);
        self
    }

    /// The tunables this scheduler runs with.
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// The morph routes used to pick source actors.
    #[must_use]
    pub fn morphs(&self) -> &MorphTable {
        &self.morphs
    }

    /// Run one scheduling pass for `frame`.
    pub fn advance(&self, world: &mut WorldState, frame: Frame) -> AdvanceReport {
        let mut report = AdvanceReport {
            frame,
            ..AdvanceReport::default()
        };

        self.assign(world, frame, &mut report);
        if self.config.structure_morphs {
            self.morph_structures(world, frame, &mut report);
        }
        self.commit(world, frame, &mut report);
        Self::reclaim(world, frame, &mut report);

        report.waiting = world.scheduled().len();

        #[cfg(debug_assertions)]
        world.assert_consistent();

        if !report.is_quiet() {
            debug!(
                frame,
                assigned = report.assigned,
                structure_morphs = report.structure_morphs,
                committed = report.committed,
                reclaimed = report.reclaimed,
                waiting = report.waiting,
                "scheduler pass"
            );
        }
        report
    }

    /// Scheduled plan IDs in assignment order.
    fn queue(world: &WorldState) -> Vec<PlanId> {
        let mut plans: Vec<&Plan> = world.scheduled().values().collect();
        sort_plans(&mut plans);
        plans.into_iter().map(Plan::id).collect()
    }

    /// Record a failed attempt. Returns `true` if the pass must stop because
    /// the plan is blocking.
    fn wait(world: &mut WorldState, id: PlanId, frame: Frame) -> bool {
        let Some(plan) = world.scheduled_plan_mut(id) else {
            return false;
        };
        plan.note_attempt(frame);
        trace!(plan = %id, retries = plan.retries(), "no eligible actor");
        if plan.is_blocking() {
            debug!(plan = %id, "blocking plan waiting, holding back lower priorities");
            return true;
        }
        false
    }

    /// A plan this phase does not handle. Returns `true` if it is blocking,
    /// which stops the pass just as an unbound blocking plan would.
    fn skip(world: &WorldState, id: PlanId) -> bool {
        let blocking = world.scheduled().get(&id).is_some_and(Plan::is_blocking);
        if blocking {
            debug!(plan = %id, "blocking plan handled elsewhere, holding back lower priorities");
        }
        blocking
    }

    /// Actors released this frame sit out the rest of it, so a repeated
    /// pass at the same frame finds the same candidates.
    fn available(world: &WorldState, actor: &Actor, frame: Frame) -> bool {
        !world.released_at(actor.id, frame)
    }

    // ── Phase A: assignment ─────────────────────────────────────────────────

    fn assign(&self, world: &mut WorldState, frame: Frame, report: &mut AdvanceReport) {
        for id in Self::queue(world) {
            let Some(payload) = world.scheduled().get(&id).map(|plan| *plan.payload()) else {
                continue;
            };
            let bound = match payload {
                // Structure morphs belong to the next phase; research to the
                // research collaborator.
                PlanPayload::Building { unit, .. } if self.morphs.is_morph(unit) => None,
                PlanPayload::Tech(_) | PlanPayload::Upgrade(_) => None,
                PlanPayload::Building { unit, site } => {
                    Some(self.assign_worker(world, id, unit, site, frame))
                }
                PlanPayload::Unit(unit) => {
                    let started = self.assign_unit(world, id, unit, frame);
                    report.started += usize::from(started);
                    Some(started)
                }
            };

            match bound {
                Some(true) => report.assigned += 1,
                Some(false) => {
                    if Self::wait(world, id, frame) {
                        break;
                    }
                }
                None => {
                    if Self::skip(world, id) {
                        break;
                    }
                }
            }
        }
    }

    /// Bind the nearest eligible worker of the right race. The worker is
    /// reserved; the commit phase decides when it leaves.
    fn assign_worker(
        &self,
        world: &mut WorldState,
        id: PlanId,
        unit: UnitType,
        site: Option<TilePosition>,
        frame: Frame,
    ) -> bool {
        let Some(builder) = unit.produced_by() else {
            return false;
        };
        let target = site.map(TilePosition::center);
        let chosen = world
            .construction_candidates()
            .filter(|actor| actor.unit_type == builder && Self::available(world, actor, frame))
            .min_by(|a, b| match target {
                Some(target) => self
                    .metric
                    .distance(a.position, target)
                    .total_cmp(&self.metric.distance(b.position, target)),
                None => a.id.cmp(&b.id),
            })
            .map(|actor| actor.id);

        let Some(actor) = chosen else {
            return false;
        };
        world.bind(actor, id, PlanState::Building, ActorRole::Reserved);
        debug!(plan = %id, %actor, %unit, "worker reserved");
        true
    }

    /// Find the actor a unit plan runs on, and how.
    fn route_unit(
        &self,
        world: &WorldState,
        id: PlanId,
        unit: UnitType,
        frame: Frame,
    ) -> Option<UnitRoute> {
        if let Some(source) = self.morphs.source_of(unit) {
            let actor = world
                .idle_of_type(source)
                .find(|actor| Self::available(world, actor, frame))?
                .id;
            return Some(UnitRoute {
                actor,
                state: PlanState::Morphing,
                role: ActorRole::Morphing,
                directive: Directive::Morph {
                    actor,
                    plan: id,
                    into: unit,
                },
            });
        }

        let producer = unit.produced_by()?;
        let actor = world
            .idle_spawners()
            .find(|actor| actor.unit_type == producer && Self::available(world, actor, frame))?
            .id;
        let route = if producer.is_building() {
            UnitRoute {
                actor,
                state: PlanState::Building,
                role: ActorRole::Training,
                directive: Directive::Train {
                    actor,
                    plan: id,
                    unit,
                },
            }
        } else {
            UnitRoute {
                actor,
                state: PlanState::Morphing,
                role: ActorRole::Morphing,
                directive: Directive::Morph {
                    actor,
                    plan: id,
                    into: unit,
                },
            }
        };
        Some(route)
    }

    /// Bind and start a unit plan. Units need no travel, so they commit on
    /// the frame they are bound.
    fn assign_unit(&self, world: &mut WorldState, id: PlanId, unit: UnitType, frame: Frame) -> bool {
        let Some(route) = self.route_unit(world, id, unit, frame) else {
            return false;
        };
        world.bind(route.actor, id, route.state, route.role);
        if let Some(plan) = world.building_plan_mut(id) {
            plan.mark_committed(frame);
        }
        world.push_directive(route.directive);
        debug!(plan = %id, actor = %route.actor, %unit, state = ?route.state, "unit started");
        true
    }

    // ── Phase A2: structure morphs ──────────────────────────────────────────

    fn morph_structures(&self, world: &mut WorldState, frame: Frame, report: &mut AdvanceReport) {
        for id in Self::queue(world) {
            let Some(PlanPayload::Building { unit, .. }) =
                world.scheduled().get(&id).map(|plan| *plan.payload())
            else {
                continue;
            };
            let Some(source) = self.morphs.source_of(unit) else {
                continue;
            };

            let Some(actor) = world
                .idle_of_type(source)
                .find(|actor| Self::available(world, actor, frame))
                .map(|actor| actor.id)
            else {
                if Self::wait(world, id, frame) {
                    break;
                }
                continue;
            };

            world.bind(actor, id, PlanState::Morphing, ActorRole::Morphing);
            if let Some(plan) = world.building_plan_mut(id) {
                plan.mark_committed(frame);
            }
            world.push_directive(Directive::Morph {
                actor,
                plan: id,
                into: unit,
            });
            report.structure_morphs += 1;
            debug!(plan = %id, %actor, from = %source, into = %unit, "structure morph started");
        }
    }

    // ── Phase B: commit ─────────────────────────────────────────────────────

    /// The frame a plan's actor should be ready to act on: the producer's
    /// prediction if given, else when the economy can afford it, else now.
    /// `None` means the plan cannot currently be afforded at all.
    fn ready_frame(world: &WorldState, plan: &Plan, frame: Frame) -> Option<Frame> {
        if let Some(ready) = plan.ready_at() {
            return Some(ready);
        }
        match world.economy() {
            Some(economy) => economy.ready_frame(plan.price(), frame),
            None => Some(frame),
        }
    }

    fn commit(&self, world: &mut WorldState, frame: Frame, report: &mut AdvanceReport) {
        let reserved: Vec<(ActorId, PlanId)> = world
            .bindings()
            .iter()
            .filter(|(actor, _)| {
                world
                    .actor(**actor)
                    .is_some_and(|a| a.role == ActorRole::Reserved)
            })
            .map(|(actor, plan)| (*actor, *plan))
            .collect();

        for (actor_id, plan_id) in reserved {
            let (Some(actor), Some(plan)) = (world.actor(actor_id), world.building().get(&plan_id))
            else {
                continue;
            };
            if plan.kind() != PlanKind::Building || plan.committed_at().is_some() {
                continue;
            }
            // Unplaced plans wait for the placement collaborator.
            let PlanPayload::Building {
                unit,
                site: Some(site),
            } = *plan.payload()
            else {
                continue;
            };

            let distance = self.metric.distance(actor.position, site.center());
            let travel = travel_frames(distance, actor.top_speed, self.config.travel_margin);
            let Some(ready) = Self::ready_frame(world, plan, frame) else {
                trace!(plan = %plan_id, "not affordable at current income");
                continue;
            };
            let depart = ready.saturating_sub(travel);
            if frame < depart {
                trace!(plan = %plan_id, actor = %actor_id, depart, "holding worker");
                continue;
            }

            if let Some(actor) = world.actor_mut(actor_id) {
                actor.role = ActorRole::MovingToBuild;
            }
            if let Some(plan) = world.building_plan_mut(plan_id) {
                plan.mark_committed(frame);
            }
            world.push_directive(Directive::Build {
                actor: actor_id,
                plan: plan_id,
                unit,
                site,
            });
            report.committed += 1;
            debug!(
                plan = %plan_id,
                actor = %actor_id,
                %unit,
                %site,
                ready,
                travel,
                "worker committed"
            );
        }
    }

    // ── Phase C: reclaim ────────────────────────────────────────────────────

    fn reclaim(world: &mut WorldState, frame: Frame, report: &mut AdvanceReport) {
        let doomed: Vec<ActorId> = world
            .bindings()
            .iter()
            .filter(|(_, plan)| world.impossible().contains_key(*plan))
            .map(|(actor, _)| *actor)
            .collect();

        for actor in doomed {
            if let Some(plan) = world.release(actor, frame) {
                world.push_directive(Directive::Abandon { actor, plan });
                report.reclaimed += 1;
                debug!(%plan, %actor, "actor released from impossible plan");
            }
        }
    }
}

impl std::fmt::Debug for ProductionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductionScheduler")
            .field("config", &self.config)
            .field("morphs", &self.morphs)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use overmind_math::Vec2;
    use overmind_plan::{PlanRequest, TechType};
    use overmind_world::{Actor, Economy, PlanSet};

    use super::*;

    fn scheduler() -> ProductionScheduler {
        ProductionScheduler::new(SchedulerConfig::default(), MorphTable::standard())
    }

    fn add(world: &mut WorldState, id: u64, unit_type: UnitType, position: Vec2) -> ActorId {
        let actor_id = ActorId::from_raw(id);
        world
            .insert_actor(Actor::new(actor_id, unit_type, position, 4.0))
            .unwrap();
        actor_id
    }

    #[test]
    fn test_empty_world_is_quiet() {
        let mut world = WorldState::new();
        let report = scheduler().advance(&mut world, 0);
        assert!(report.is_quiet());
        assert_eq!(report.waiting, 0);
    }

    #[test]
    fn test_larva_morphs_into_drone() {
        let mut world = WorldState::new();
        let larva = add(&mut world, 1, UnitType::Larva, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::unit(UnitType::Drone)), 5);

        let report = scheduler().advance(&mut world, 5);
        assert_eq!(report.assigned, 1);
        assert_eq!(report.started, 1);
        assert_eq!(world.plan(id).unwrap().state(), PlanState::Morphing);
        assert_eq!(world.plan(id).unwrap().committed_at(), Some(5));
        assert_eq!(world.actor(larva).unwrap().role, ActorRole::Morphing);
        assert_eq!(
            world.directives(),
            &[Directive::Morph {
                actor: larva,
                plan: id,
                into: UnitType::Drone
            }]
        );
    }

    #[test]
    fn test_barracks_trains_marine() {
        let mut world = WorldState::new();
        let rax = add(&mut world, 1, UnitType::Barracks, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::unit(UnitType::Marine)), 0);

        scheduler().advance(&mut world, 0);
        assert_eq!(world.plan(id).unwrap().state(), PlanState::Building);
        assert_eq!(world.actor(rax).unwrap().role, ActorRole::Training);
        assert!(matches!(world.directives()[0], Directive::Train { .. }));
    }

    #[test]
    fn test_unit_morph_draws_from_source_type_not_spawners() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Larva, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::unit(UnitType::Lurker)), 0);

        scheduler().advance(&mut world, 0);
        assert_eq!(world.locate(id), Some(PlanSet::Scheduled));

        let hydra = add(&mut world, 2, UnitType::Hydralisk, Vec2::ZERO);
        scheduler().advance(&mut world, 1);
        assert_eq!(world.actor_for(id), Some(hydra));
        assert_eq!(world.plan(id).unwrap().state(), PlanState::Morphing);
    }

    #[test]
    fn test_worker_choice_prefers_nearest_to_site() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Drone, Vec2::new(2000.0, 2000.0));
        let near = add(&mut world, 2, UnitType::Drone, Vec2::new(300.0, 16.0));
        let id = world.submit(
            PlanRequest::new(PlanPayload::building_at(
                UnitType::SpawningPool,
                TilePosition::new(10, 0),
            )),
            0,
        );

        scheduler().advance(&mut world, 0);
        assert_eq!(world.actor_for(id), Some(near));
    }

    #[test]
    fn test_worker_race_must_match() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Scv, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::Pylon)), 0);

        scheduler().advance(&mut world, 0);
        assert_eq!(world.locate(id), Some(PlanSet::Scheduled));
    }

    #[test]
    fn test_gas_and_carrying_workers_skipped() {
        let mut world = WorldState::new();
        world
            .insert_actor(
                Actor::new(ActorId::from_raw(1), UnitType::Drone, Vec2::ZERO, 4.0)
                    .with_role(ActorRole::GatherGas),
            )
            .unwrap();
        world
            .insert_actor(
                Actor::new(ActorId::from_raw(2), UnitType::Drone, Vec2::ZERO, 4.0)
                    .with_role(ActorRole::GatherMinerals)
                    .carrying(true),
            )
            .unwrap();
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::Extractor)), 0);

        scheduler().advance(&mut world, 0);
        assert_eq!(world.locate(id), Some(PlanSet::Scheduled));

        world.set_carrying(ActorId::from_raw(2), false).unwrap();
        scheduler().advance(&mut world, 1);
        assert_eq!(world.actor_for(id), Some(ActorId::from_raw(2)));
    }

    #[test]
    fn test_unplaced_building_is_held() {
        let mut world = WorldState::new();
        let drone = add(&mut world, 1, UnitType::Drone, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::SpawningPool)), 0);

        scheduler().advance(&mut world, 0);
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::Reserved);
        assert!(world.directives().is_empty());

        world.place(id, TilePosition::new(0, 0)).unwrap();
        let report = scheduler().advance(&mut world, 1);
        assert_eq!(report.committed, 1);
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::MovingToBuild);
    }

    #[test]
    fn test_commit_waits_for_economy() {
        let mut world = WorldState::new();
        // 100 minerals short at 1 per frame: ready at frame 100.
        world.set_economy(Economy::new(100.0, 0.0, 1.0, 0.0));
        let drone = add(&mut world, 1, UnitType::Drone, TilePosition::new(0, 0).center());
        world.submit(
            PlanRequest::new(PlanPayload::building_at(
                UnitType::SpawningPool,
                TilePosition::new(0, 0),
            )),
            0,
        );
        let sched = ProductionScheduler::new(
            SchedulerConfig::new().with_travel_margin(40),
            MorphTable::standard(),
        );

        sched.advance(&mut world, 59);
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::Reserved);

        // The bank has not moved, so the estimate still says 100 frames out.
        sched.advance(&mut world, 60);
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::Reserved);

        world.set_economy(Economy::new(160.0, 0.0, 1.0, 0.0));
        sched.advance(&mut world, 60);
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::MovingToBuild);
    }

    #[test]
    fn test_unaffordable_without_income_never_commits() {
        let mut world = WorldState::new();
        world.set_economy(Economy::new(0.0, 0.0, 0.0, 0.0));
        let drone = add(&mut world, 1, UnitType::Drone, Vec2::ZERO);
        world.submit(
            PlanRequest::new(PlanPayload::building_at(
                UnitType::Hatchery,
                TilePosition::new(1, 1),
            )),
            0,
        );

        for frame in 0..10 {
            scheduler().advance(&mut world, frame);
        }
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::Reserved);
    }

    #[test]
    fn test_structure_morph_phase() {
        let mut world = WorldState::new();
        let hatch = add(&mut world, 1, UnitType::Hatchery, Vec2::ZERO);
        add(&mut world, 2, UnitType::Drone, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::Lair)), 0);

        let report = scheduler().advance(&mut world, 0);
        assert_eq!(report.assigned, 0);
        assert_eq!(report.structure_morphs, 1);
        assert_eq!(world.actor_for(id), Some(hatch));
        assert_eq!(world.plan(id).unwrap().state(), PlanState::Morphing);
    }

    #[test]
    fn test_structure_morph_phase_can_be_disabled() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Hatchery, Vec2::ZERO);
        add(&mut world, 2, UnitType::Drone, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::Lair)), 0);
        let sched = ProductionScheduler::new(
            SchedulerConfig::new().with_structure_morphs(false),
            MorphTable::standard(),
        );

        sched.advance(&mut world, 0);
        assert_eq!(world.locate(id), Some(PlanSet::Scheduled));
        assert_eq!(world.plan(id).unwrap().retries(), 0);
    }

    #[test]
    fn test_research_is_left_alone() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Drone, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::tech(TechType::Burrowing)), 0);

        let report = scheduler().advance(&mut world, 0);
        assert!(report.is_quiet());
        assert_eq!(world.locate(id), Some(PlanSet::Scheduled));
        assert_eq!(world.plan(id).unwrap().retries(), 0);
    }

    #[test]
    fn test_blocking_plan_holds_back_lower_priorities() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Larva, Vec2::ZERO);
        let pool = world.submit(
            PlanRequest::new(PlanPayload::building(UnitType::SpawningPool))
                .with_priority(1)
                .blocking(),
            0,
        );
        let drone = world.submit(
            PlanRequest::new(PlanPayload::unit(UnitType::Drone)).with_priority(2),
            0,
        );

        scheduler().advance(&mut world, 0);
        assert_eq!(world.locate(pool), Some(PlanSet::Scheduled));
        assert_eq!(world.locate(drone), Some(PlanSet::Scheduled));
        assert_eq!(world.plan(drone).unwrap().retries(), 0);

        let worker = add(&mut world, 2, UnitType::Drone, Vec2::ZERO);
        scheduler().advance(&mut world, 1);
        assert_eq!(world.actor_for(pool), Some(worker));
        assert_eq!(world.locate(drone), Some(PlanSet::Building));
    }

    #[test]
    fn test_blocking_structure_morph_holds_back_lower_priorities() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Larva, Vec2::ZERO);
        let lair = world.submit(
            PlanRequest::new(PlanPayload::building(UnitType::Lair))
                .with_priority(1)
                .blocking(),
            0,
        );
        let drone = world.submit(
            PlanRequest::new(PlanPayload::unit(UnitType::Drone)).with_priority(2),
            0,
        );
        let sched = scheduler();

        sched.advance(&mut world, 0);
        assert_eq!(world.locate(lair), Some(PlanSet::Scheduled));
        assert_eq!(world.locate(drone), Some(PlanSet::Scheduled));

        // The morph starts in its own phase; the drone follows next frame.
        let hatch = add(&mut world, 2, UnitType::Hatchery, Vec2::ZERO);
        sched.advance(&mut world, 1);
        assert_eq!(world.actor_for(lair), Some(hatch));
        assert_eq!(world.locate(drone), Some(PlanSet::Scheduled));

        sched.advance(&mut world, 2);
        assert_eq!(world.locate(drone), Some(PlanSet::Building));
    }

    #[test]
    fn test_blocking_research_holds_back_lower_priorities() {
        let mut world = WorldState::new();
        add(&mut world, 1, UnitType::Larva, Vec2::ZERO);
        let burrow = world.submit(
            PlanRequest::new(PlanPayload::tech(TechType::Burrowing))
                .with_priority(1)
                .blocking(),
            0,
        );
        let drone = world.submit(
            PlanRequest::new(PlanPayload::unit(UnitType::Drone)).with_priority(2),
            0,
        );
        let sched = scheduler();

        sched.advance(&mut world, 0);
        assert_eq!(world.locate(drone), Some(PlanSet::Scheduled));
        assert_eq!(world.plan(burrow).unwrap().retries(), 0);

        // Withdrawing the research lifts the hold.
        world.mark_impossible(burrow).unwrap();
        sched.advance(&mut world, 1);
        assert_eq!(world.locate(drone), Some(PlanSet::Building));
    }

    #[test]
    fn test_retries_count_frames_not_calls() {
        let mut world = WorldState::new();
        let id = world.submit(PlanRequest::new(PlanPayload::unit(UnitType::Drone)), 0);
        let sched = scheduler();

        sched.advance(&mut world, 0);
        sched.advance(&mut world, 0);
        sched.advance(&mut world, 1);
        assert_eq!(world.plan(id).unwrap().retries(), 2);
    }

    #[test]
    fn test_reclaim_emits_abandon() {
        let mut world = WorldState::new();
        let drone = add(&mut world, 1, UnitType::Drone, Vec2::ZERO);
        let id = world.submit(PlanRequest::new(PlanPayload::building(UnitType::SpawningPool)), 0);
        let sched = scheduler();
        sched.advance(&mut world, 0);
        world.drain_directives();

        world.mark_impossible(id).unwrap();
        let report = sched.advance(&mut world, 1);
        assert_eq!(report.reclaimed, 1);
        assert!(!world.is_bound(drone));
        assert_eq!(world.actor(drone).unwrap().role, ActorRole::Idle);
        assert_eq!(
            world.directives(),
            &[Directive::Abandon {
                actor: drone,
                plan: id
            }]
        );
    }
}
