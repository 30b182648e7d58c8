use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prelude::*;

pub const DEFAULT_ATTACK_BOOST: f32 = 5.0;
pub const DEFAULT_HEALTH_BOOST: f32 = 20.0;

/// Held by a unit once picked up, the boost is already part of the unit attack
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub attack_boost: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon(Weapon),
    HealthPotion { health_boost: f32 },
}

impl ItemKind {
    pub fn name(&self) -> &'static str {
        match self {
            ItemKind::Weapon(_) => "Weapon",
            ItemKind::HealthPotion { .. } => "Health Potion",
        }
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            ItemKind::Weapon(_) => "/+ ",
            ItemKind::HealthPotion { .. } => "(+)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub at: Coord,
    pub kind: ItemKind,
}

impl Item {
    pub fn weapon(at: Coord, attack_boost: f32) -> Self {
        Self {
            at,
            kind: ItemKind::Weapon(Weapon { attack_boost }),
        }
    }

    pub fn potion(at: Coord, health_boost: f32) -> Self {
        Self {
            at,
            kind: ItemKind::HealthPotion { health_boost },
        }
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemSettings {
    pub weapons: usize,
    pub potions: usize,
    pub attack_boost: f32,
    pub health_boost: f32,
}

impl Default for ItemSettings {
    fn default() -> Self {
        Self {
            weapons: 10,
            potions: 10,
            attack_boost: DEFAULT_ATTACK_BOOST,
            health_boost: DEFAULT_HEALTH_BOOST,
        }
    }
}

/// Scatters weapons then potions on distinct free tiles.
/// A tile is free when it isn't obstructed and no unit stands on it.
/// When the map runs out of free tiles the remaining items are dropped.
pub fn populate_items<R: Rng + ?Sized>(
    map: &Map,
    occupied: &[Coord],
    settings: &ItemSettings,
    rng: &mut R,
) -> Vec<Item> {
    let free: Vec<Coord> = map
        .iter()
        .filter_map(|(xy, tile)| tile.filter(|t| !t.obstructs()).map(|_| xy))
        .filter(|xy| !occupied.contains(xy))
        .collect();
    let wanted = settings.weapons + settings.potions;
    if free.len() < wanted {
        debug!(target: "map.gen", "only {} free tiles for {} items", free.len(), wanted);
    }
    let spots: Vec<Coord> = free.choose_multiple(rng, wanted).copied().collect();
    let (weapons, potions) = spots.split_at(settings.weapons.min(spots.len()));
    weapons
        .iter()
        .map(|xy| Item::weapon(*xy, settings.attack_boost))
        .chain(potions.iter().map(|xy| Item::potion(*xy, settings.health_boost)))
        .collect()
}
