use crate::prelude::*;


/// Game on a hand written map, the first unit starts. Fixed seed, no items.
pub fn scenario(map: &str, roster: &[(UnitKind, Coord)]) -> Game {
    let units = roster
        .iter()
        .enumerate()
        .map(|(i, (kind, at))| Unit::new(UnitId(i as u32), *kind, *at))
        .collect();
    Game::from_parts(
        parse_map(map).unwrap(),
        units,
        vec![],
        MovementRules::default(),
        session_rng(Some(0)),
    )
}
