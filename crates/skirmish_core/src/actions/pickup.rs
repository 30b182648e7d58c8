use tracing::error;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActPickup {
    pub unit: UnitId,
}

impl Act for ActPickup {
    type Precondition = UnitId;

    /// Picking up doesn't end the turn
    const RESOLVES_TURN: bool = false;

    fn generate(pre: &Self::Precondition, game: &Game) -> Vec<Self> {
        let act = ActPickup { unit: *pre };
        act.validate(game).is_ok().then_some(act).into_iter().collect()
    }

    fn validate(&self, game: &Game) -> Result<(), CommandError> {
        let unit = game.acting_unit(self.unit)?;
        if game.items.iter().any(|item| item.at == unit.at) {
            Ok(())
        } else {
            Err(CommandError::NoItemHere)
        }
    }

    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError> {
        let Some(unit) = game.units.get_mut(self.unit.index()) else {
            error!(target: "game.turn", "the unit picking up doesn't exist (act: {:?}, dump: {})", self, game.view());
            return Err(CommandError::UnknownUnit(self.unit));
        };
        let items = pick_up_item(unit, &mut game.items);
        Ok(GameEvent::PickedUp {
            unit: self.unit,
            items,
        })
    }
}
