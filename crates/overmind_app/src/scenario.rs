//! Scripted scenarios for the driver.
//!
//! A scenario is a JSON file holding the scheduler tunables, the morph
//! table, the starting actors and economy, and a frame-stamped script of
//! producer actions. Plans created by the script are referred to by their
//! submission index: the first `Submit` event is submission 0.

use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

use overmind_math::TilePosition;
use overmind_plan::{Frame, PlanRequest};
use overmind_scheduler::{MorphTable, SchedulerConfig, load_json};
use overmind_world::{Actor, Economy};

/// One producer action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub enum Action {
    /// Create a plan and queue it for assignment.
    Submit(PlanRequest),
    /// Choose the construction site of a submitted building plan.
    Place { submission: usize, site: TilePosition },
    /// Report a predicted ready frame for a submitted plan.
    ReadyAt { submission: usize, frame: Frame },
    /// The engine reported the plan's product finished.
    Complete { submission: usize },
    /// Strategy withdrew the plan.
    Impossible { submission: usize },
}

/// An action and the frame it fires on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScriptedEvent {
    pub frame: Frame,
    pub action: Action,
}

/// A complete scenario file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub scheduler: SchedulerConfig,
    pub morphs: MorphTable,
    pub economy: Option<Economy>,
    pub actors: Vec<Actor>,
    pub events: Vec<ScriptedEvent>,
}

impl Scenario {
    /// Load and validate a scenario file. Events are ordered by frame,
    /// keeping file order within a frame.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read or parsed, the morph table is
    /// invalid, or the script is inconsistent.
    pub fn load(path: &Path) -> Result<Self> {
        let mut scenario: Self =
            load_json(path).with_context(|| format!("loading scenario {}", path.display()))?;
        scenario.morphs.validate()?;
        scenario.events.sort_by_key(|event| event.frame);
        scenario.validate()?;
        Ok(scenario)
    }

    /// Check payloads and submission references. Runs on frame-ordered
    /// events, so a reference to a later submission is caught.
    fn validate(&self) -> Result<()> {
        let mut submitted = 0;
        for event in &self.events {
            match &event.action {
                Action::Submit(request) => {
                    ensure!(
                        request.payload.is_well_formed(),
                        "frame {}: malformed payload {}",
                        event.frame,
                        request.payload
                    );
                    submitted += 1;
                }
                Action::Place { submission, .. }
                | Action::ReadyAt { submission, .. }
                | Action::Complete { submission }
                | Action::Impossible { submission } => ensure!(
                    *submission < submitted,
                    "frame {}: submission {} has not been made yet",
                    event.frame,
                    submission
                ),
            }
        }
        Ok(())
    }

    /// Number of `Submit` events in the script.
    #[must_use]
    pub fn submissions(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event.action, Action::Submit(_)))
            .count()
    }

    /// The frame of the last scripted event.
    #[must_use]
    pub fn last_frame(&self) -> Frame {
        self.events.iter().map(|event| event.frame).max().unwrap_or(0)
    }
}
