//! Frame loop driving the scheduler through a scripted scenario.
//!
//! Each frame:
//!
//! 1. Apply the script's producer actions due this frame.
//! 2. Accrue one frame of income.
//! 3. Run the scheduler pass.
//! 4. Drain the directive outbox, pay for what started, and log it.
//! 5. Advance the frame counter.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use overmind_plan::{Frame, PlanId, PlanState};
use overmind_scheduler::{AdvanceReport, ProductionScheduler};
use overmind_world::{ActorRole, Directive, WorldState};

use crate::scenario::{Action, Scenario, ScriptedEvent};

/// Configuration for the frame loop.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Target frames per second.
    pub frame_rate: f64,
    /// Number of frames to run.
    pub max_frames: u32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            frame_rate: 24.0,
            max_frames: 1000,
        }
    }
}

/// The driver's frame loop state.
#[derive(Debug)]
pub struct TickLoop {
    frame: Frame,
    config: TickConfig,
    world: WorldState,
    scheduler: ProductionScheduler,
    script: VecDeque<ScriptedEvent>,
    /// Plan IDs in submission order, for resolving script references.
    submissions: Vec<PlanId>,
}

impl TickLoop {
    /// Build the world and scheduler from a scenario.
    ///
    /// # Errors
    ///
    /// Fails if the scenario lists the same actor twice.
    pub fn new(config: TickConfig, scenario: Scenario) -> Result<Self> {
        let mut world = WorldState::new();
        for actor in scenario.actors {
            world.insert_actor(actor)?;
        }
        if let Some(economy) = scenario.economy {
            world.set_economy(economy);
        }
        Ok(Self {
            frame: 0,
            config,
            world,
            scheduler: ProductionScheduler::new(scenario.scheduler, scenario.morphs),
            script: scenario.events.into(),
            submissions: Vec::new(),
        })
    }

    /// The next frame to be processed.
    #[must_use]
    pub fn frame(&self) -> Frame {
        self.frame
    }

    #[must_use]
    pub fn world(&self) -> &WorldState {
        &self.world
    }

    /// Plan ID of the `index`th submission, once it has fired.
    #[must_use]
    pub fn submission(&self, index: usize) -> Option<PlanId> {
        self.submissions.get(index).copied()
    }

    fn resolve(&self, index: usize) -> Result<PlanId> {
        self.submission(index)
            .with_context(|| format!("submission {index} has not been made"))
    }

    fn apply(&mut self, event: ScriptedEvent) -> Result<()> {
        let frame = event.frame;
        match event.action {
            Action::Submit(request) => {
                let id = self.world.submit(request, self.frame);
                info!(frame, plan = %id, index = self.submissions.len(), "plan submitted");
                self.submissions.push(id);
            }
            Action::Place { submission, site } => {
                let id = self.resolve(submission)?;
                self.world.place(id, site)?;
                debug!(frame, plan = %id, %site, "plan placed");
            }
            Action::ReadyAt {
                submission,
                frame: ready,
            } => {
                let id = self.resolve(submission)?;
                self.world.set_ready_at(id, Some(ready))?;
                debug!(frame, plan = %id, ready, "ready frame predicted");
            }
            Action::Complete { submission } => {
                let id = self.resolve(submission)?;
                self.complete(id)?;
            }
            Action::Impossible { submission } => {
                let id = self.resolve(submission)?;
                self.world.mark_impossible(id)?;
                info!(frame, plan = %id, "plan withdrawn");
            }
        }
        Ok(())
    }

    /// Finish a plan the way the engine would: a morphed actor becomes the
    /// new type, and every actor goes back to idle.
    fn complete(&mut self, id: PlanId) -> Result<()> {
        let morphed = self
            .world
            .plan(id)
            .filter(|plan| plan.state() == PlanState::Morphing)
            .and_then(|plan| plan.payload().unit_type());

        let actor = self.world.complete(id)?;
        if let Some(actor_id) = actor {
            if let Some(actor) = self.world.actor_mut(actor_id) {
                if let Some(unit_type) = morphed {
                    actor.unit_type = unit_type;
                }
                actor.role = ActorRole::Idle;
            }
        }
        info!(frame = self.frame, plan = %id, actor = ?actor, "plan complete");
        Ok(())
    }

    fn pay(&mut self, directive: &Directive) {
        let Some(plan) = self.world.plan(directive.plan()) else {
            return;
        };
        let price = plan.price();
        let Some(economy) = self.world.economy_mut() else {
            return;
        };
        if !economy.spend(price) {
            warn!(
                frame = self.frame,
                plan = %directive.plan(),
                minerals = economy.minerals,
                gas = economy.gas,
                "started before it was affordable"
            );
        }
    }

    /// Run one frame.
    ///
    /// # Errors
    ///
    /// Fails if a scripted action is rejected by the world state.
    pub fn tick(&mut self) -> Result<AdvanceReport> {
        while self
            .script
            .front()
            .is_some_and(|event| event.frame <= self.frame)
        {
            if let Some(event) = self.script.pop_front() {
                self.apply(event)?;
            }
        }

        if self.frame > 0 {
            if let Some(economy) = self.world.economy_mut() {
                economy.accrue(1);
            }
        }

        let report = self.scheduler.advance(&mut self.world, self.frame);

        for directive in self.world.drain_directives() {
            if !matches!(directive, Directive::Abandon { .. }) {
                self.pay(&directive);
            }
            info!(frame = self.frame, ?directive, "directive");
        }

        self.frame += 1;
        Ok(report)
    }

    /// Run the configured number of frames as fast as possible.
    ///
    /// # Errors
    ///
    /// Stops at the first failing frame.
    pub fn run(&mut self) -> Result<()> {
        info!(max_frames = self.config.max_frames, "starting unpaced run");
        for _ in 0..self.config.max_frames {
            self.tick()?;
        }
        self.summary();
        Ok(())
    }

    /// Run the configured number of frames at the configured frame rate.
    ///
    /// # Errors
    ///
    /// Stops at the first failing frame.
    pub async fn run_paced(&mut self) -> Result<()> {
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.frame_rate);
        let mut cadence = tokio::time::interval(frame_duration);
        cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            "starting frame loop"
        );

        for _ in 0..self.config.max_frames {
            cadence.tick().await;
            let start = Instant::now();
            self.tick()?;

            let elapsed = start.elapsed();
            if elapsed > frame_duration {
                warn!(
                    frame = self.frame - 1,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
        self.summary();
        Ok(())
    }

    fn summary(&self) {
        info!(
            frames = self.frame,
            submitted = self.submissions.len(),
            scheduled = self.world.scheduled().len(),
            executing = self.world.building().len(),
            complete = self.world.complete_plans().len(),
            impossible = self.world.impossible().len(),
            "run complete"
        );
    }
}
