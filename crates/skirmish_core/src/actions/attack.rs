use tracing::error;

use crate::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActAttack {
    pub unit: UnitId,
    pub target: UnitId,
}

impl Act for ActAttack {
    type Precondition = UnitId;

    const CHECKS_GAME_OVER: bool = true;

    fn generate(pre: &Self::Precondition, game: &Game) -> Vec<Self> {
        let Ok(unit) = game.acting_unit(*pre) else {
            return vec![];
        };
        opponents_by_distance(&game.units, unit)
            .into_iter()
            .map(|target| ActAttack { unit: *pre, target })
            .collect()
    }

    fn validate(&self, game: &Game) -> Result<(), CommandError> {
        let unit = game.acting_unit(self.unit)?;
        let target = game
            .unit(self.target)
            .ok_or(CommandError::UnknownUnit(self.target))?;
        validate_opponent(unit, target)
    }

    fn apply(&self, game: &mut Game) -> Result<GameEvent, CommandError> {
        let Some(attacker) = game.unit(self.unit).cloned() else {
            error!(target: "game.combat", "the attacker doesn't exist (act: {:?}, dump: {})", self, game.view());
            return Err(CommandError::UnknownUnit(self.unit));
        };
        let Some(target) = game.units.get_mut(self.target.index()) else {
            error!(target: "game.combat", "the target doesn't exist (act: {:?}, dump: {})", self, game.view());
            return Err(CommandError::UnknownUnit(self.target));
        };
        let strike = attack(&attacker, target)?;
        Ok(GameEvent::Attacked {
            unit: self.unit,
            strike,
        })
    }
}

#[cfg(test)]
mod test {
    use crate::{c, prelude::*, test::scenario};

    use super::*;

    #[test]
    fn attack_has_no_range() {
        let mut game = scenario(
            r"
--- --- --- --- --- --- --- ---",
            &[(UnitKind::Elf, c!(0, 0)), (UnitKind::Troll, c!(7, 0))],
        );
        let outcome = game.issue_attack(UnitId(0), UnitId(1)).unwrap();
        assert!(matches!(outcome, CommandOutcome::Applied(GameEvent::Attacked { .. })));
        assert_eq!(game.units[1].health, 180.0);
        assert_eq!(game.turn.phase, Phase::TurnResolved);
        assert_eq!(game.turn.round_counter, 1);
    }

    #[test]
    fn friendly_and_self_targets_are_rejected() {
        let mut game = scenario(
            "--- --- ---",
            &[
                (UnitKind::Elf, c!(0, 0)),
                (UnitKind::Human, c!(1, 0)),
                (UnitKind::Orc, c!(2, 0)),
            ],
        );
        assert_eq!(
            game.issue_attack(UnitId(0), UnitId(1)),
            Err(CommandError::FriendlyTarget)
        );
        assert_eq!(
            game.issue_attack(UnitId(0), UnitId(0)),
            Err(CommandError::SelfTarget)
        );
        assert_eq!(
            game.issue_attack(UnitId(0), UnitId(9)),
            Err(CommandError::UnknownUnit(UnitId(9)))
        );
        assert_eq!(game.turn.round_counter, 0);
    }

    #[test]
    fn generated_targets_are_living_opponents() {
        let mut game = scenario(
            "--- --- --- ---",
            &[
                (UnitKind::Elf, c!(0, 0)),
                (UnitKind::Orc, c!(3, 0)),
                (UnitKind::Goblin, c!(2, 0)),
                (UnitKind::Human, c!(1, 0)),
            ],
        );
        game.units[2].health = 0.0;
        let acts = ActAttack::generate(&UnitId(0), &game);
        assert_eq!(
            acts,
            vec![ActAttack {
                unit: UnitId(0),
                target: UnitId(1)
            }]
        );
    }
}
