use serde::{Deserialize, Serialize};

use crate::{is_default, prelude::*};

/// Skill points every unit starts with
pub const START_SKILL_POINTS: f32 = 2.0;

/// Skill points can never exceed this
pub const MAX_SKILL_POINTS: f32 = 11.0;

/// Healing never brings health above this
pub const MAX_HEAL_HEALTH: f32 = 100.0;

/// Index of a unit in the roster, stable for the whole session
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Ally,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseStats {
    pub health: f32,
    pub attack: f32,
    pub speed: i32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    #[default]
    Human,
    Elf,
    Dwarf,
    Orc,
    Goblin,
    Troll,
}

impl UnitKind {
    pub const ALL: [UnitKind; 6] = [
        UnitKind::Human,
        UnitKind::Elf,
        UnitKind::Dwarf,
        UnitKind::Orc,
        UnitKind::Goblin,
        UnitKind::Troll,
    ];

    pub fn faction(&self) -> Faction {
        match self {
            UnitKind::Human | UnitKind::Elf | UnitKind::Dwarf => Faction::Ally,
            UnitKind::Orc | UnitKind::Goblin | UnitKind::Troll => Faction::Enemy,
        }
    }

    pub fn base_stats(&self) -> BaseStats {
        let (health, attack, speed) = match self {
            UnitKind::Human => (100.0, 15.0, 3),
            UnitKind::Elf => (80.0, 20.0, 4),
            UnitKind::Dwarf => (120.0, 10.0, 2),
            UnitKind::Orc => (90.0, 18.0, 3),
            UnitKind::Goblin => (60.0, 12.0, 4),
            UnitKind::Troll => (200.0, 25.0, 2),
        };
        BaseStats {
            health,
            attack,
            speed,
        }
    }

    /// Terrain granting +1 movement to units of this kind starting their turn on it
    pub fn home_terrain(&self) -> Option<TerrainKind> {
        match self {
            UnitKind::Human => Some(TerrainKind::Plain),
            UnitKind::Elf => Some(TerrainKind::Forest),
            UnitKind::Dwarf => Some(TerrainKind::Mountain),
            UnitKind::Orc => Some(TerrainKind::Swamp),
            UnitKind::Goblin | UnitKind::Troll => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Human => "Human",
            UnitKind::Elf => "Elf",
            UnitKind::Dwarf => "Dwarf",
            UnitKind::Orc => "Orc",
            UnitKind::Goblin => "Goblin",
            UnitKind::Troll => "Troll",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            UnitKind::Human => "Hum",
            UnitKind::Elf => "Elf",
            UnitKind::Dwarf => "Dwf",
            UnitKind::Orc => "Orc",
            UnitKind::Goblin => "Gob",
            UnitKind::Troll => "Trl",
        }
    }
}

/// Who issues the commands of a unit
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Controller {
    #[default]
    Human,
    Machine,
}

/// Set by self-only skills, cleared when the unit's next turn starts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusFlags {
    /// Incoming damage is halved
    pub shielded: bool,
    pub vanished: bool,

    /// Sight radius is doubled
    pub eagle_vision: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pub at: Coord,
    pub health: f32,
    pub attack: f32,

    /// Movement budget of the current turn
    pub speed: i32,

    pub skill_points: f32,
    pub max_skill_points: f32,

    #[serde(default, skip_serializing_if = "is_default")]
    pub weapon: Option<Weapon>,

    #[serde(default, skip_serializing_if = "is_default")]
    pub status: StatusFlags,

    #[serde(default, skip_serializing_if = "is_default")]
    pub controller: Controller,
}

impl Unit {
    pub fn new(id: UnitId, kind: UnitKind, at: Coord) -> Self {
        let base = kind.base_stats();
        Self {
            id,
            kind,
            at,
            health: base.health,
            attack: base.attack,
            speed: base.speed,
            skill_points: START_SKILL_POINTS,
            max_skill_points: MAX_SKILL_POINTS,
            weapon: None,
            status: StatusFlags::default(),
            controller: Controller::default(),
        }
    }

    pub fn with_controller(self, controller: Controller) -> Self {
        Self { controller, ..self }
    }

    pub fn faction(&self) -> Faction {
        self.kind.faction()
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0.0
    }

    pub fn is_alive(&self) -> bool {
        !self.is_defeated()
    }

    pub fn is_hostile(&self, other: &Unit) -> bool {
        self.faction() != other.faction()
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.skill_points >= cost
    }

    pub fn regenerate_skill_points(&mut self, amount: f32) {
        self.skill_points = (self.skill_points + amount).min(self.max_skill_points);
    }

    /// Potion healing, the result is clamped to [`MAX_HEAL_HEALTH`] even for units above it
    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount).min(MAX_HEAL_HEALTH);
    }

    /// Skill healing, capped at [`MAX_HEAL_HEALTH`] but never lowers the current health
    pub fn recover(&mut self, amount: f32) {
        let healed = (self.health + amount).min(MAX_HEAL_HEALTH);
        self.health = healed.max(self.health);
    }

    /// Damage is not clamped, health may go negative
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let amount = if self.status.shielded {
            amount / 2.0
        } else {
            amount
        };
        self.health -= amount;
        amount
    }
}
