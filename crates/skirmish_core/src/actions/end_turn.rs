use tracing::trace;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActEndTurn;

impl Act for ActEndTurn {
    type Precondition = ();

    /// Resolves by itself when used as a pass
    const RESOLVES_TURN: bool = false;

    fn generate(_: &Self::Precondition, game: &Game) -> Vec<Self> {
        ActEndTurn.validate(game).is_ok().then_some(ActEndTurn).into_iter().collect()
    }

    fn validate(&self, game: &Game) -> Result<(), CommandError> {
        match game.turn.phase {
            Phase::GameOver(_) => Err(CommandError::GameOver),
            _ => Ok(()),
        }
    }

    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError> {
        if let Phase::AwaitingCommand(unit) = game.turn.phase {
            trace!(target: "game.turn", "{} passes", unit);
            game.resolve_turn();
        }
        let next = game.advance();
        Ok(GameEvent::TurnPassed { next })
    }
}

#[cfg(test)]
mod test {
    use crate::{c, prelude::*, test::scenario};

    #[test]
    fn pass_resolves_then_advances() {
        let mut game = scenario(
            "--- --- ---",
            &[(UnitKind::Human, c!(0, 0)), (UnitKind::Orc, c!(2, 0))],
        );
        game.end_turn().unwrap();
        assert_eq!(game.turn.round_counter, 1);
        assert_eq!(game.turn.phase, Phase::AwaitingCommand(UnitId(1)));
    }

    #[test]
    fn defeated_units_are_skipped() {
        let mut game = scenario(
            "--- --- --- ---",
            &[
                (UnitKind::Human, c!(0, 0)),
                (UnitKind::Goblin, c!(1, 0)),
                (UnitKind::Elf, c!(2, 0)),
                (UnitKind::Orc, c!(3, 0)),
            ],
        );
        game.units[1].health = -3.0;
        game.end_turn().unwrap();
        assert_eq!(game.turn.current, UnitId(2));
        game.end_turn().unwrap();
        game.end_turn().unwrap();
        // round robin back to the first unit
        assert_eq!(game.turn.current, UnitId(0));
    }
}
