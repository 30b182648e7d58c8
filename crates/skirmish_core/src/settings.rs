use serde::{Deserialize, Serialize};

use crate::{is_default, prelude::*};

/// Where a roster unit starts and who controls it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSettings {
    pub kind: UnitKind,

    /// Relative to the map center, moved to the nearest free tile if blocked
    #[serde(default, skip_serializing_if = "is_default")]
    pub offset: Coord,

    #[serde(default, skip_serializing_if = "is_default")]
    pub controller: Controller,
}

impl SpawnSettings {
    pub fn new(kind: UnitKind, offset: Coord, controller: Controller) -> Self {
        Self {
            kind,
            offset,
            controller,
        }
    }
}

/// Everything needed to start a session, stored as ron
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub width: i32,
    pub height: i32,

    /// Random when missing
    #[serde(skip_serializing_if = "is_default")]
    pub seed: Option<u64>,

    /// Tiles costing more than the unit speed are out of reach
    #[serde(skip_serializing_if = "is_default")]
    pub terrain_cost_aware: bool,

    pub layout: Layout,
    pub residual: ResidualFill,
    pub items: ItemSettings,

    /// Turn order follows this list
    pub roster: Vec<SpawnSettings>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            width: 96,
            height: 96,
            seed: None,
            terrain_cost_aware: false,
            layout: Layout::default(),
            residual: ResidualFill::default(),
            items: ItemSettings::default(),
            roster: vec![
                SpawnSettings::new(UnitKind::Elf, Coord::ZERO, Controller::Human),
                SpawnSettings::new(UnitKind::Human, Coord::new(3, 3), Controller::Human),
                SpawnSettings::new(UnitKind::Orc, Coord::new(-3, -3), Controller::Machine),
            ],
        }
    }
}

impl GameSettings {
    pub fn from_string(config_str: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(config_str)?)
    }

    pub fn to_string_pretty(&self) -> Result<String, SettingsError> {
        let config = ron::ser::PrettyConfig::default()
            .compact_arrays(true)
            .depth_limit(3);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    pub fn with_seed(self, seed: Option<u64>) -> Self {
        Self {
            seed: seed.or(self.seed),
            ..self
        }
    }
}
