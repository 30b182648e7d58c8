use tracing::error;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActMove {
    pub unit: UnitId,
    pub to: Coord,
}

impl Act for ActMove {
    type Precondition = UnitId;

    fn generate(pre: &Self::Precondition, game: &Game) -> Vec<Self> {
        let Ok(unit) = game.acting_unit(*pre) else {
            return vec![];
        };
        let mut destinations: Vec<Coord> = game.accessible_tiles(unit).into_iter().collect();
        // hash sets have no stable order, the machine rng needs one
        destinations.sort_by_key(|xy| (xy.y, xy.x));
        destinations
            .into_iter()
            .map(|to| ActMove { unit: *pre, to })
            .filter(|act| act.validate(game).is_ok())
            .collect()
    }

    fn validate(&self, game: &Game) -> Result<(), CommandError> {
        let unit = game.acting_unit(self.unit)?;
        if !game.accessible_tiles(unit).contains(&self.to) {
            return Err(CommandError::InvalidDestination(self.to));
        }
        if game.unit_at(&self.to).is_some_and(|other| other.id != self.unit) {
            return Err(CommandError::Occupied(self.to));
        }
        Ok(())
    }

    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError> {
        let Some(unit) = game.units.get_mut(self.unit.index()) else {
            error!(target: "game.turn", "the moving unit doesn't exist (act: {:?}, dump: {})", self, game.view());
            return Err(CommandError::UnknownUnit(self.unit));
        };
        let from = unit.at;
        unit.at = self.to;
        let picked = pick_up_item(unit, &mut game.items);
        Ok(GameEvent::Moved {
            unit: self.unit,
            from,
            to: self.to,
            picked,
        })
    }
}
