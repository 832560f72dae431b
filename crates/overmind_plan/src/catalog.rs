//! Game type catalog and price tables.
//!
//! Every [`Plan`](crate::Plan) payload names one of the types here. A plan's
//! cost is always looked up from its payload type through [`UnitType::price`],
//! [`TechType::price`] or [`UpgradeType::price`]; it is never stored on the
//! plan itself.
//!
//! Supply is counted in half-units, the way the game engine reports it: a
//! Zergling pair costs 1 supply and is listed as `1`, a Drone as `2`.

use serde::{Deserialize, Serialize};

/// The playable races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Race {
    Zerg,
    Terran,
    Protoss,
}

/// Resources needed to start an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Price {
    pub minerals: u32,
    pub gas: u32,
    /// Supply, in half-units.
    pub supply: u32,
}

impl Price {
    /// Free.
    pub const ZERO: Self = Self::new(0, 0, 0);

    /// Create a price.
    #[must_use]
    pub const fn new(minerals: u32, gas: u32, supply: u32) -> Self {
        Self {
            minerals,
            gas,
            supply,
        }
    }

    /// Returns `true` if the given stock covers the mineral and gas cost.
    #[must_use]
    pub fn affordable_with(&self, minerals: u32, gas: u32) -> bool {
        self.minerals <= minerals && self.gas <= gas
    }
}

impl std::ops::Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price {
            minerals: self.minerals + rhs.minerals,
            gas: self.gas + rhs.gas,
            supply: self.supply + rhs.supply,
        }
    }
}

impl std::iter::Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, |acc, p| acc + p)
    }
}

// ── Units and structures ────────────────────────────────────────────────────

/// Every unit and structure type a plan can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UnitType {
    // Zerg units
    Larva,
    Drone,
    Overlord,
    Zergling,
    Hydralisk,
    Lurker,
    Mutalisk,
    Guardian,
    Devourer,
    Scourge,
    Queen,
    Ultralisk,
    Defiler,
    // Zerg structures
    Hatchery,
    Lair,
    Hive,
    CreepColony,
    SunkenColony,
    SporeColony,
    Extractor,
    SpawningPool,
    EvolutionChamber,
    HydraliskDen,
    Spire,
    GreaterSpire,
    QueensNest,
    UltraliskCavern,
    DefilerMound,
    // Terran units
    Scv,
    Marine,
    Firebat,
    Medic,
    Vulture,
    SiegeTank,
    // Terran structures
    CommandCenter,
    SupplyDepot,
    Refinery,
    Barracks,
    Bunker,
    Academy,
    EngineeringBay,
    Factory,
    // Protoss units
    Probe,
    Zealot,
    Dragoon,
    // Protoss structures
    Nexus,
    Pylon,
    Assimilator,
    Gateway,
    Forge,
    PhotonCannon,
    CyberneticsCore,
}

impl UnitType {
    /// The race this type belongs to.
    #[must_use]
    pub fn race(self) -> Race {
        use UnitType::*;
        match self {
            Larva | Drone | Overlord | Zergling | Hydralisk | Lurker | Mutalisk | Guardian
            | Devourer | Scourge | Queen | Ultralisk | Defiler | Hatchery | Lair | Hive
            | CreepColony | SunkenColony | SporeColony | Extractor | SpawningPool
            | EvolutionChamber | HydraliskDen | Spire | GreaterSpire | QueensNest
            | UltraliskCavern | DefilerMound => Race::Zerg,
            Scv | Marine | Firebat | Medic | Vulture | SiegeTank | CommandCenter | SupplyDepot
            | Refinery | Barracks | Bunker | Academy | EngineeringBay | Factory => Race::Terran,
            Probe | Zealot | Dragoon | Nexus | Pylon | Assimilator | Gateway | Forge
            | PhotonCannon | CyberneticsCore => Race::Protoss,
        }
    }

    /// Returns `true` for structures.
    #[must_use]
    pub fn is_building(self) -> bool {
        use UnitType::*;
        matches!(
            self,
            Hatchery
                | Lair
                | Hive
                | CreepColony
                | SunkenColony
                | SporeColony
                | Extractor
                | SpawningPool
                | EvolutionChamber
                | HydraliskDen
                | Spire
                | GreaterSpire
                | QueensNest
                | UltraliskCavern
                | DefilerMound
                | CommandCenter
                | SupplyDepot
                | Refinery
                | Barracks
                | Bunker
                | Academy
                | EngineeringBay
                | Factory
                | Nexus
                | Pylon
                | Assimilator
                | Gateway
                | Forge
                | PhotonCannon
                | CyberneticsCore
        )
    }

    /// Returns `true` for construction-capable workers.
    #[must_use]
    pub fn is_worker(self) -> bool {
        matches!(self, UnitType::Drone | UnitType::Scv | UnitType::Probe)
    }

    /// Returns `true` for refinery-class structures workers harvest gas from.
    #[must_use]
    pub fn is_refinery(self) -> bool {
        matches!(
            self,
            UnitType::Extractor | UnitType::Refinery | UnitType::Assimilator
        )
    }

    /// Returns `true` for actors that spawn new units: larvae and the
    /// structures that train units.
    #[must_use]
    pub fn is_spawner(self) -> bool {
        use UnitType::*;
        matches!(
            self,
            Larva | CommandCenter | Barracks | Factory | Nexus | Gateway
        )
    }

    /// The type of actor that normally produces this one.
    ///
    /// For units this is the spawner or, for morphs, the unit being
    /// transformed. For structures it is the race's worker, or the structure
    /// being upgraded in place. Whether a morph route is taken is decided by
    /// the scheduler's morph table, not by this function.
    #[must_use]
    pub fn produced_by(self) -> Option<UnitType> {
        use UnitType::*;
        let producer = match self {
            Larva => return None,
            Drone | Overlord | Zergling | Hydralisk | Mutalisk | Scourge | Queen | Ultralisk
            | Defiler => Larva,
            Lurker => Hydralisk,
            Guardian | Devourer => Mutalisk,
            Lair => Hatchery,
            Hive => Lair,
            SunkenColony | SporeColony => CreepColony,
            GreaterSpire => Spire,
            Hatchery | CreepColony | Extractor | SpawningPool | EvolutionChamber
            | HydraliskDen | Spire | QueensNest | UltraliskCavern | DefilerMound => Drone,
            Scv => CommandCenter,
            Marine | Firebat | Medic => Barracks,
            Vulture | SiegeTank => Factory,
            CommandCenter | SupplyDepot | Refinery | Barracks | Bunker | Academy
            | EngineeringBay | Factory => Scv,
            Probe => Nexus,
            Zealot | Dragoon => Gateway,
            Nexus | Pylon | Assimilator | Gateway | Forge | PhotonCannon | CyberneticsCore => {
                Probe
            }
        };
        Some(producer)
    }

    /// Mineral, gas and supply cost.
    ///
    /// Morphed types list the additional cost paid on top of the source.
    #[must_use]
    pub fn price(self) -> Price {
        use UnitType::*;
        match self {
            Larva => Price::ZERO,
            Drone => Price::new(50, 0, 2),
            Overlord => Price::new(100, 0, 0),
            Zergling => Price::new(50, 0, 1),
            Hydralisk => Price::new(75, 25, 2),
            Lurker => Price::new(50, 100, 2),
            Mutalisk => Price::new(100, 100, 4),
            Guardian => Price::new(50, 100, 0),
            Devourer => Price::new(150, 50, 0),
            Scourge => Price::new(25, 75, 1),
            Queen => Price::new(100, 100, 4),
            Ultralisk => Price::new(200, 200, 8),
            Defiler => Price::new(50, 150, 4),
            Hatchery => Price::new(300, 0, 0),
            Lair => Price::new(150, 100, 0),
            Hive => Price::new(200, 150, 0),
            CreepColony => Price::new(75, 0, 0),
            SunkenColony => Price::new(50, 0, 0),
            SporeColony => Price::new(50, 0, 0),
            Extractor => Price::new(50, 0, 0),
            SpawningPool => Price::new(200, 0, 0),
            EvolutionChamber => Price::new(75, 0, 0),
            HydraliskDen => Price::new(100, 50, 0),
            Spire => Price::new(200, 150, 0),
            GreaterSpire => Price::new(100, 150, 0),
            QueensNest => Price::new(150, 100, 0),
            UltraliskCavern => Price::new(150, 200, 0),
            DefilerMound => Price::new(100, 100, 0),
            Scv => Price::new(50, 0, 2),
            Marine => Price::new(50, 0, 2),
            Firebat => Price::new(50, 25, 2),
            Medic => Price::new(50, 25, 2),
            Vulture => Price::new(75, 0, 4),
            SiegeTank => Price::new(150, 100, 4),
            CommandCenter => Price::new(400, 0, 0),
            SupplyDepot => Price::new(100, 0, 0),
            Refinery => Price::new(100, 0, 0),
            Barracks => Price::new(150, 0, 0),
            Bunker => Price::new(100, 0, 0),
            Academy => Price::new(150, 0, 0),
            EngineeringBay => Price::new(125, 0, 0),
            Factory => Price::new(200, 100, 0),
            Probe => Price::new(50, 0, 2),
            Zealot => Price::new(100, 0, 4),
            Dragoon => Price::new(125, 50, 4),
            Nexus => Price::new(400, 0, 0),
            Pylon => Price::new(100, 0, 0),
            Assimilator => Price::new(100, 0, 0),
            Gateway => Price::new(150, 0, 0),
            Forge => Price::new(150, 0, 0),
            PhotonCannon => Price::new(150, 0, 0),
            CyberneticsCore => Price::new(200, 0, 0),
        }
    }
}

impl std::fmt::Display for UnitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

// ── Research ────────────────────────────────────────────────────────────────

/// Researchable abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TechType {
    Burrowing,
    LurkerAspect,
    Consume,
    SpawnBroodlings,
    StimPacks,
    TankSiegeMode,
    PsionicStorm,
}

impl TechType {
    /// Mineral and gas cost.
    #[must_use]
    pub fn price(self) -> Price {
        match self {
            TechType::Burrowing => Price::new(100, 100, 0),
            TechType::LurkerAspect => Price::new(200, 200, 0),
            TechType::Consume => Price::new(100, 100, 0),
            TechType::SpawnBroodlings => Price::new(100, 100, 0),
            TechType::StimPacks => Price::new(100, 100, 0),
            TechType::TankSiegeMode => Price::new(150, 150, 0),
            TechType::PsionicStorm => Price::new(200, 200, 0),
        }
    }
}

impl std::fmt::Display for TechType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// Levelled upgrades. Prices are for the first level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum UpgradeType {
    MetabolicBoost,
    MuscularAugments,
    GroovedSpines,
    PneumatizedCarapace,
    ZergMeleeAttacks,
    ZergMissileAttacks,
    ZergCarapace,
    U238Shells,
    SingularityCharge,
    LegEnhancements,
}

impl UpgradeType {
    /// Mineral and gas cost.
    #[must_use]
    pub fn price(self) -> Price {
        match self {
            UpgradeType::MetabolicBoost => Price::new(100, 100, 0),
            UpgradeType::MuscularAugments => Price::new(150, 150, 0),
            UpgradeType::GroovedSpines => Price::new(150, 150, 0),
            UpgradeType::PneumatizedCarapace => Price::new(150, 150, 0),
            UpgradeType::ZergMeleeAttacks => Price::new(100, 100, 0),
            UpgradeType::ZergMissileAttacks => Price::new(100, 100, 0),
            UpgradeType::ZergCarapace => Price::new(150, 150, 0),
            UpgradeType::U238Shells => Price::new(150, 150, 0),
            UpgradeType::SingularityCharge => Price::new(150, 150, 0),
            UpgradeType::LegEnhancements => Price::new(150, 150, 0),
        }
    }
}

impl std::fmt::Display for UpgradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}
