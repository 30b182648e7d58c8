use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Tunables of the movement range computation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementRules {
    /// Also exclude tiles whose move cost is above the unit speed
    pub terrain_cost_aware: bool,
}

/// Every tile the unit may move to this turn.
/// Range based, not path based: a tile counts when it lies within the Manhattan
/// diamond of radius `unit.speed`, whatever sits in between.
/// The tile the unit stands on is included.
pub fn accessible_tiles(unit: &Unit, map: &Map, rules: &MovementRules) -> HashSet<Coord> {
    unit.at
        .diamond(unit.speed)
        .filter(|xy| {
            let Some(Some(tile)) = map.get(xy) else {
                return false;
            };
            !tile.obstructs() && (!rules.terrain_cost_aware || tile.move_cost() <= unit.speed)
        })
        .collect()
}

/// Sight radius given by the tile the unit stands on, doubled by eagle vision
pub fn sight_radius(unit: &Unit, map: &Map) -> i32 {
    let base = map
        .get(&unit.at)
        .and_then(|tile| tile.map(|t| t.visibility()))
        .unwrap_or(0);
    if unit.status.eagle_vision {
        base * 2
    } else {
        base
    }
}

/// In bounds tiles within the sight radius of the unit
pub fn visible_tiles(unit: &Unit, map: &Map) -> HashSet<Coord> {
    unit.at
        .diamond(sight_radius(unit, map))
        .filter(|xy| map.contains(xy))
        .collect()
}

/// Budget for the turn that is starting: the base speed of the kind, +1 on its
/// home terrain, -1 inside venom, never negative
pub fn movement_budget(unit: &Unit, map: &Map, effects: &[AreaEffect]) -> i32 {
    let mut speed = unit.kind.base_stats().speed;
    let standing = map.get(&unit.at).and_then(|tile| tile.map(|t| t.kind));
    if standing.is_some() && standing == unit.kind.home_terrain() {
        speed += 1;
    }
    if effects
        .iter()
        .any(|e| e.kind == EffectKind::Venom && e.contains(&unit.at))
    {
        speed -= 1;
    }
    speed.max(0)
}

/// Closest tile to `from` that is in bounds, not obstructed and not in `taken`.
/// Ties are broken in diamond order.
pub fn nearest_open(map: &Map, from: Coord, taken: &[Coord]) -> Option<Coord> {
    let reach = map.width() + map.height();
    (0..=reach).find_map(|radius| {
        from.diamond(radius)
            .filter(|xy| xy.distance(&from) == radius)
            .find(|xy| {
                matches!(map.get(xy), Some(Some(tile)) if !tile.obstructs()) && !taken.contains(xy)
            })
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::c;

    fn unit_at(kind: UnitKind, at: Coord, speed: i32) -> Unit {
        Unit {
            speed,
            ..Unit::new(UnitId(0), kind, at)
        }
    }

    #[test]
    fn obstacles_and_bounds_are_excluded() {
        let map = parse_map(
            r"
--- <>> ---
--- --- ---",
        )
        .unwrap();
        let unit = unit_at(UnitKind::Human, c!(0, 0), 2);
        let tiles = accessible_tiles(&unit, &map, &MovementRules::default());
        let expected: HashSet<Coord> = [c!(0, 0), c!(0, 1), c!(1, 1), c!(2, 0)].into();
        // (2, 0) is past the obstacle, range doesn't care about paths
        assert_eq!(tiles, expected);
    }

    #[test]
    fn cost_aware_rules_drop_expensive_tiles() {
        let map = parse_map("--- ^^^ ~~~").unwrap();
        let unit = unit_at(UnitKind::Human, c!(0, 0), 2);
        let relaxed = accessible_tiles(&unit, &map, &MovementRules::default());
        assert!(relaxed.contains(&c!(1, 0)));
        let strict = accessible_tiles(
            &unit,
            &map,
            &MovementRules {
                terrain_cost_aware: true,
            },
        );
        assert!(!strict.contains(&c!(1, 0)));
        assert!(strict.contains(&c!(2, 0)));
    }

    #[test]
    fn zero_speed_keeps_the_own_tile() {
        let map = parse_map("--- ---").unwrap();
        let unit = unit_at(UnitKind::Troll, c!(1, 0), 0);
        let tiles = accessible_tiles(&unit, &map, &MovementRules::default());
        assert_eq!(tiles, [c!(1, 0)].into());
    }

    #[test]
    fn budget_terrain_bonus_and_venom() {
        let map = parse_map("### --- ---").unwrap();
        let elf = unit_at(UnitKind::Elf, c!(0, 0), 0);
        assert_eq!(movement_budget(&elf, &map, &[]), 5);
        let venom = AreaEffect::new(EffectKind::Venom, c!(1, 0));
        assert_eq!(movement_budget(&elf, &map, &[venom]), 4);
        let troll = unit_at(UnitKind::Troll, c!(2, 0), 0);
        assert_eq!(movement_budget(&troll, &map, &[venom]), 1);
    }

    #[test]
    fn eagle_vision_doubles_sight() {
        let map = parse_map(
            r"
--- --- --- --- --- --- --- --- ---
--- --- --- --- ### --- --- --- ---",
        )
        .unwrap();
        let mut elf = unit_at(UnitKind::Elf, c!(4, 1), 4);
        assert_eq!(sight_radius(&elf, &map), 3);
        let before = visible_tiles(&elf, &map).len();
        elf.status.eagle_vision = true;
        assert_eq!(sight_radius(&elf, &map), 6);
        assert!(visible_tiles(&elf, &map).len() > before);
    }

    #[test]
    fn nearest_open_skips_obstacles() {
        let map = parse_map(
            r"
<>> <>> ---
<>> --- ---",
        )
        .unwrap();
        // both are two steps away, the upper row comes first
        assert_eq!(nearest_open(&map, c!(0, 0), &[]), Some(c!(2, 0)));
        assert_eq!(nearest_open(&map, c!(0, 0), &[c!(2, 0)]), Some(c!(1, 1)));
        let wall = parse_map("<>> <>>").unwrap();
        assert_eq!(nearest_open(&wall, c!(0, 0), &[]), None);
    }
}
