//! Actors: the game units that execute plans.
//!
//! The unit-command layer owns the real game units. The world state mirrors
//! the handful of fields the scheduler needs to pick one: type, position,
//! speed, what it is doing, and whether it is holding minerals or gas.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use overmind_plan::UnitType;

/// A game unit identifier, as reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ActorId(u64);

impl ActorId {
    /// Create an actor ID from the engine's raw unit ID.
    #[must_use]
    pub const fn from_raw(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` identifier.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ActorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Actor({})", self.0)
    }
}

/// What an actor is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ActorRole {
    /// Available for anything.
    #[default]
    Idle,
    /// Mining minerals. Workers here may be pulled for construction.
    GatherMinerals,
    /// Harvesting gas. Never pulled for construction.
    GatherGas,
    /// Holding a building plan, waiting for its commit frame.
    Reserved,
    /// Committed to a building plan and on the way to the site.
    MovingToBuild,
    /// Training a unit.
    Training,
    /// Transforming into another type.
    Morphing,
}

impl ActorRole {
    /// Returns `true` for the two harvesting roles.
    #[must_use]
    pub fn is_gathering(self) -> bool {
        matches!(self, Self::GatherMinerals | Self::GatherGas)
    }
}

/// A controllable unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub unit_type: UnitType,
    /// Pixel position.
    pub position: Vec2,
    /// Pixels per frame.
    pub top_speed: f32,
    #[serde(default)]
    pub role: ActorRole,
    /// Holding a load of minerals or gas.
    #[serde(default)]
    pub carrying: bool,
}

impl Actor {
    /// Create an idle, empty-handed actor.
    #[must_use]
    pub fn new(id: ActorId, unit_type: UnitType, position: Vec2, top_speed: f32) -> Self {
        Self {
            id,
            unit_type,
            position,
            top_speed,
            role: ActorRole::Idle,
            carrying: false,
        }
    }

    /// Set the initial role.
    #[must_use]
    pub fn with_role(mut self, role: ActorRole) -> Self {
        self.role = role;
        self
    }

    /// Set the carrying flag.
    #[must_use]
    pub fn carrying(mut self, carrying: bool) -> Self {
        self.carrying = carrying;
        self
    }

    /// Returns `true` if this worker may be pulled for construction: idle or
    /// mining minerals, and not holding a load.
    #[must_use]
    pub fn can_construct(&self) -> bool {
        self.unit_type.is_worker()
            && !self.carrying
            && matches!(self.role, ActorRole::Idle | ActorRole::GatherMinerals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drone(role: ActorRole) -> Actor {
        Actor::new(ActorId::from_raw(1), UnitType::Drone, Vec2::ZERO, 5.0).with_role(role)
    }

    #[test]
    fn test_mineral_worker_can_construct() {
        assert!(drone(ActorRole::Idle).can_construct());
        assert!(drone(ActorRole::GatherMinerals).can_construct());
    }

    #[test]
    fn test_gas_worker_cannot_construct() {
        assert!(!drone(ActorRole::GatherGas).can_construct());
    }

    #[test]
    fn test_carrying_worker_cannot_construct() {
        assert!(!drone(ActorRole::GatherMinerals).carrying(true).can_construct());
    }

    #[test]
    fn test_non_worker_cannot_construct() {
        let ling = Actor::new(ActorId::from_raw(2), UnitType::Zergling, Vec2::ZERO, 5.6);
        assert!(!ling.can_construct());
    }

    #[test]
    fn test_actor_from_json_defaults() {
        let actor: Actor = serde_json::from_str(
            r#"{"id": 9, "unit_type": "Larva", "position": [64.0, 96.0], "top_speed": 0.0}"#,
        )
        .unwrap();
        assert_eq!(actor.role, ActorRole::Idle);
        assert!(!actor.carrying);
        assert_eq!(actor.position, Vec2::new(64.0, 96.0));
    }
}
