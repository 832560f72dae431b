//! Morph routing table.
//!
//! Some types are not built or trained from scratch but made by transforming
//! a living actor of another type: a Hatchery becomes a Lair, a Hydralisk
//! becomes a Lurker. The [`MorphTable`] maps each such target type to the
//! source type whose actors must be used. Routing is data; the scheduler has
//! no per-type branches.
//!
//! In JSON the table is a plain object from target to source:
//!
//! ```json
//! { "Lair": "Hatchery", "Lurker": "Hydralisk" }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use overmind_plan::UnitType;

use crate::error::ConfigError;

/// Target type → source type for every morph route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MorphTable {
    routes: BTreeMap<UnitType, UnitType>,
}

impl MorphTable {
    /// A table with no routes: everything is built or trained.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            routes: BTreeMap::new(),
        }
    }

    /// The standard Zerg morph routes.
    #[must_use]
    pub fn standard() -> Self {
        use UnitType::*;
        [
            (Lair, Hatchery),
            (Hive, Lair),
            (SunkenColony, CreepColony),
            (SporeColony, CreepColony),
            (GreaterSpire, Spire),
            (Lurker, Hydralisk),
            (Guardian, Mutalisk),
            (Devourer, Mutalisk),
        ]
        .into_iter()
        .fold(Self::empty(), |table, (target, from)| {
            table.with_route(target, from)
        })
    }

    /// Add or replace a route.
    #[must_use]
    pub fn with_route(mut self, target: UnitType, from: UnitType) -> Self {
        self.routes.insert(target, from);
        self
    }

    /// Parse a table from JSON and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed input and
    /// [`ConfigError::InvalidMorph`] for an unusable route.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// The source type for `target`, if it is made by morphing.
    #[must_use]
    pub fn source_of(&self, target: UnitType) -> Option<UnitType> {
        self.routes.get(&target).copied()
    }

    /// Returns `true` if `target` is made by morphing.
    #[must_use]
    pub fn is_morph(&self, target: UnitType) -> bool {
        self.routes.contains_key(&target)
    }

    /// Number of routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Returns `true` if the table has no routes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Check that every route is executable: a type never morphs into
    /// itself, and structures only morph from structures, units from units.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMorph`] for the first bad route.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (&target, &from) in &self.routes {
            if target == from {
                return Err(ConfigError::InvalidMorph {
                    target,
                    from,
                    reason: "a type cannot morph into itself",
                });
            }
            if target.is_building() != from.is_building() {
                return Err(ConfigError::InvalidMorph {
                    target,
                    from,
                    reason: "structures and units cannot morph into each other",
                });
            }
        }
        Ok(())
    }
}

impl Default for MorphTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_routes() {
        let table = MorphTable::standard();
        assert_eq!(table.source_of(UnitType::Lair), Some(UnitType::Hatchery));
        assert_eq!(table.source_of(UnitType::Lurker), Some(UnitType::Hydralisk));
        assert_eq!(table.source_of(UnitType::SpawningPool), None);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn test_standard_agrees_with_catalog() {
        let table = MorphTable::standard();
        for (target, from) in &table.routes {
            assert_eq!(target.produced_by(), Some(*from), "{target}");
        }
    }

    #[test]
    fn test_from_json() {
        let table = MorphTable::from_json(r#"{"Lair": "Hatchery", "Guardian": "Mutalisk"}"#).unwrap();
        assert_eq!(table.len(), 2);
        assert!(table.is_morph(UnitType::Guardian));
        assert!(!table.is_morph(UnitType::Hive));
    }

    #[test]
    fn test_rejects_self_morph() {
        let err = MorphTable::from_json(r#"{"Lair": "Lair"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidMorph { .. }));
    }

    #[test]
    fn test_rejects_unit_into_structure() {
        let err = MorphTable::empty()
            .with_route(UnitType::SunkenColony, UnitType::Drone)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("SunkenColony <- Drone"));
    }

    #[test]
    fn test_unknown_type_is_parse_error() {
        let err = MorphTable::from_json(r#"{"Lair": "Nydus"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
